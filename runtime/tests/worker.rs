use llm::MockLLMClient;
use memory::UserRegistry;
use persona::{ConversationState, Inbound, PersonaConfig, Responder, ScriptedChance};
use runtime::commands::text;
use runtime::{Job, LogTail, RecordingTransport, Worker};
use std::sync::Arc;
use tokio::sync::mpsc;

const CHAT: i64 = 3;

fn config() -> PersonaConfig {
    PersonaConfig {
        greetings: vec!["hello there!".into()],
        greeting_words: vec!["hi".into()],
        start_messages: vec!["welcome back".into()],
        system_prompt: "CHAT".into(),
        fallback: "oops".into(),
        ..Default::default()
    }
}

async fn worker(
    dir: &tempfile::TempDir,
    client: MockLLMClient,
) -> (Worker, Arc<RecordingTransport>) {
    let cfg = config();
    let registry = UserRegistry::load(dir.path().join("users.json")).await.unwrap();
    let state = ConversationState::with_users(registry.ids().iter().copied());
    let transport = Arc::new(RecordingTransport::new());
    let worker = Worker::new(
        Responder::new(&cfg, Arc::new(client), "mock"),
        state,
        Box::new(ScriptedChance::new()),
        registry,
        transport.clone(),
        cfg.start_messages.clone(),
    );
    (worker, transport)
}

#[tokio::test]
async fn start_welcomes_once_then_uses_start_lines() {
    let dir = tempfile::tempdir().unwrap();
    let (mut worker, transport) = worker(&dir, MockLLMClient::new()).await;
    worker.handle(Job::Start { chat: CHAT, user: 42 }).await;
    worker.handle(Job::Start { chat: CHAT, user: 42 }).await;
    assert_eq!(transport.texts(), vec![text::WELCOME, "welcome back"]);
    assert_eq!(worker.state().user_count(), 1);

    let reloaded = UserRegistry::load(dir.path().join("users.json")).await.unwrap();
    assert_eq!(reloaded.ids(), &[42]);
}

#[tokio::test]
async fn text_jobs_run_the_pipeline_and_count_replies() {
    let dir = tempfile::tempdir().unwrap();
    let client = MockLLMClient::new()
        .answer("insult detector", "none")
        .answer("mood module", "sweet")
        .answer("roleplay analysis module", "unknown")
        .answer("CHAT", "doing great");
    let (mut worker, transport) = worker(&dir, client).await;
    worker
        .handle(Job::Text {
            chat: CHAT,
            message: Inbound::new("hi", 8),
        })
        .await;
    worker
        .handle(Job::Text {
            chat: CHAT,
            message: Inbound::new("how are you", 8),
        })
        .await;
    assert_eq!(transport.texts(), vec!["hello there!", "doing great"]);
    assert_eq!(worker.state().reply_count(), 2);
}

#[tokio::test]
async fn status_reports_counters_and_log_tail() {
    let dir = tempfile::tempdir().unwrap();
    let (worker, transport) = worker(&dir, MockLLMClient::new()).await;
    let logs = LogTail::default();
    logs.push("[INFO] started".into());
    let mut worker = worker.with_logs(logs);
    worker.handle(Job::Start { chat: CHAT, user: 1 }).await;
    worker.handle(Job::Status { chat: CHAT }).await;

    let texts = transport.texts();
    let status = texts.last().unwrap();
    assert!(status.starts_with("🧠 Bot status:\n• Uptime: 00:00:0"));
    assert!(status.contains("• Users: 1"));
    assert!(status.contains("• Replies sent: 0"));
    assert!(status.ends_with("📝 Recent logs:\n[INFO] started"));
}

#[tokio::test]
async fn run_drains_the_queue_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let (worker, transport) = worker(&dir, MockLLMClient::new()).await;
    let (tx, rx) = mpsc::channel(4);
    for _ in 0..3 {
        tx.send(Job::Text {
            chat: CHAT,
            message: Inbound::new("hi", 8),
        })
        .await
        .unwrap();
    }
    drop(tx);
    worker.run(rx).await;
    assert_eq!(transport.texts().len(), 3);
}

#[tokio::test]
async fn unsaved_user_is_not_counted() {
    let dir = tempfile::tempdir().unwrap();
    let (mut worker, transport) = worker(&dir, MockLLMClient::new()).await;
    let path = dir.path().join("users.json");
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    worker.handle(Job::Start { chat: CHAT, user: 42 }).await;
    assert_eq!(worker.state().user_count(), 0);

    std::fs::remove_dir(&path).unwrap();
    worker.handle(Job::Start { chat: CHAT, user: 42 }).await;
    worker.handle(Job::Start { chat: CHAT, user: 42 }).await;
    assert_eq!(worker.state().user_count(), 1);
    assert_eq!(
        transport.texts(),
        vec![text::WELCOME, text::WELCOME, "welcome back"]
    );
}
