use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use memory::{ImageStore, UserRegistry};
use persona::{ConversationState, PersonaConfig, RandomChance, Responder};
use runtime::{commands, load_admins, Args, Dispatcher, Job, LogTail, Poller, TelegramClient, Worker};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let logs = LogTail::init(args.log_level).context("installing logger")?;

    let dir = &args.config_dir;
    let config = PersonaConfig::load(dir).context("loading persona config")?;
    let admins = load_admins(dir).context("loading owner.json")?;

    let backend = llm::backend_from_env()?;
    let model = llm::model_from_env(backend);
    let client = llm::client_from_env(backend)?;
    log::info!("using {backend:?} backend with model {model}");
    let responder = Responder::new(&config, client, model);

    let registry = UserRegistry::load(dir.join("users.json")).await?;
    let images = ImageStore::load(dir.join("images.json")).await?;
    let state = ConversationState::with_users(registry.ids().iter().copied());

    let (worker_chance, dispatch_chance) = match args.seed {
        Some(seed) => (RandomChance::seeded(seed), RandomChance::seeded(seed.wrapping_add(1))),
        None => (RandomChance::from_entropy(), RandomChance::from_entropy()),
    };

    let telegram = Arc::new(TelegramClient::new(&args.telegram_api_url, &args.telegram_token));
    let (tx, rx) = mpsc::channel::<Job>(64);
    let worker = Worker::new(
        responder,
        state,
        Box::new(worker_chance),
        registry,
        telegram.clone(),
        config.start_messages.clone(),
    )
    .with_logs(logs);
    tokio::spawn(worker.run(rx));

    if let Err(e) = telegram.set_my_commands(&commands::menu()).await {
        log::warn!("could not set the command menu: {e}");
    }

    let mut dispatcher = Dispatcher::new(
        telegram.clone(),
        images,
        admins,
        tx,
        Box::new(dispatch_chance),
    );
    let mut poller = Poller::new(telegram, args.poll_timeout);
    poller
        .skip_backlog()
        .await
        .context("dropping pending updates")?;

    log::info!("start polling");
    tokio::select! {
        _ = poller.run(&mut dispatcher) => {}
        _ = tokio::signal::ctrl_c() => log::info!("Exi is shutting down"),
    }
    Ok(())
}
