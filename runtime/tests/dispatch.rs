use async_trait::async_trait;
use llm::{ChatRequest, LLMClient, LLMError};
use memory::{ImageStore, UserRegistry};
use persona::{ConversationState, PersonaConfig, Responder, ScriptedChance};
use runtime::commands::text;
use runtime::telegram::Update;
use runtime::{Dispatcher, Job, RecordingTransport, Sent, Worker};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const ADMIN: i64 = 1;
const CHAT: i64 = 77;

struct Harness {
    _dir: tempfile::TempDir,
    transport: Arc<RecordingTransport>,
    jobs: mpsc::Receiver<Job>,
    dispatcher: Dispatcher,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let images = ImageStore::load(dir.path().join("images.json")).await.unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let (tx, jobs) = mpsc::channel(8);
    let dispatcher = Dispatcher::new(
        transport.clone(),
        images,
        HashSet::from([ADMIN]),
        tx,
        Box::new(ScriptedChance::new()),
    )
    .with_flood_pause(Duration::ZERO);
    Harness {
        _dir: dir,
        transport,
        jobs,
        dispatcher,
    }
}

fn update(from: i64, message: serde_json::Value) -> Update {
    let mut message = message;
    message["message_id"] = json!(1);
    message["chat"] = json!({"id": CHAT});
    message["from"] = json!({"id": from});
    serde_json::from_value(json!({"update_id": 1, "message": message})).unwrap()
}

fn text_update(from: i64, body: &str) -> Update {
    update(from, json!({"text": body}))
}

#[tokio::test]
async fn plain_text_is_queued_for_the_worker() {
    let mut h = harness().await;
    h.dispatcher.dispatch(text_update(5, "how are you")).await;
    match h.jobs.try_recv().unwrap() {
        Job::Text { chat, message } => {
            assert_eq!(chat, CHAT);
            assert_eq!(message.body, "how are you");
            assert_eq!(message.author_id, 5);
        }
        other => panic!("unexpected job {other:?}"),
    }
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn start_and_status_go_to_the_worker() {
    let mut h = harness().await;
    h.dispatcher.dispatch(text_update(5, "/start")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/status")).await;
    assert_eq!(h.jobs.try_recv().unwrap(), Job::Start { chat: CHAT, user: 5 });
    assert_eq!(h.jobs.try_recv().unwrap(), Job::Status { chat: CHAT });
}

#[tokio::test]
async fn admin_commands_are_refused_to_others() {
    let mut h = harness().await;
    for cmd in ["/status", "/ping", "/artcount", "/listimages 3", "/removeimage a", "/ownhelp"] {
        h.dispatcher.dispatch(text_update(5, cmd)).await;
    }
    assert!(h.jobs.try_recv().is_err());
    let texts = h.transport.texts();
    assert_eq!(texts.len(), 6);
    assert!(texts.iter().all(|t| t == text::ACCESS_DENIED));
}

#[tokio::test]
async fn photos_and_image_documents_are_collected() {
    let mut h = harness().await;
    h.dispatcher
        .dispatch(update(
            5,
            json!({"photo": [
                {"file_id": "thumb", "width": 90, "height": 60},
                {"file_id": "full", "width": 1280, "height": 960}
            ]}),
        ))
        .await;
    h.dispatcher
        .dispatch(update(5, json!({"document": {"file_id": "doc-img", "mime_type": "image/png"}})))
        .await;
    h.dispatcher
        .dispatch(update(5, json!({"document": {"file_id": "doc-pdf", "mime_type": "application/pdf"}})))
        .await;
    h.dispatcher
        .dispatch(update(5, json!({"photo": [{"file_id": "full", "width": 1, "height": 1}]})))
        .await;
    assert_eq!(
        h.dispatcher.images().list(),
        &["full".to_string(), "doc-img".to_string()]
    );
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn list_images_shows_newest_first_with_ids() {
    let mut h = harness().await;
    for id in ["a", "b", "c"] {
        h.dispatcher
            .dispatch(update(5, json!({"document": {"file_id": id, "mime_type": "image/jpeg"}})))
            .await;
    }
    h.dispatcher.dispatch(text_update(ADMIN, "/listimages 2")).await;
    assert_eq!(
        h.transport.sent(),
        vec![
            Sent::Text {
                chat: CHAT,
                text: "📂 Showing the last 2 pictures:".into()
            },
            Sent::Photo {
                chat: CHAT,
                file_id: "c".into(),
                caption: "c".into()
            },
            Sent::Photo {
                chat: CHAT,
                file_id: "b".into(),
                caption: "b".into()
            },
        ]
    );
}

#[tokio::test]
async fn gallery_commands_on_empty_store() {
    let mut h = harness().await;
    h.dispatcher.dispatch(text_update(ADMIN, "/listimages")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/artcount")).await;
    h.dispatcher.dispatch(text_update(5, "/randomart")).await;
    assert_eq!(
        h.transport.texts(),
        vec![text::GALLERY_EMPTY, text::GALLERY_EMPTY, text::RANDOM_ART_EMPTY]
    );
}

#[tokio::test]
async fn remove_image_reports_counts() {
    let mut h = harness().await;
    for id in ["a", "b"] {
        h.dispatcher
            .dispatch(update(5, json!({"document": {"file_id": id, "mime_type": "image/jpeg"}})))
            .await;
    }
    h.dispatcher.dispatch(text_update(ADMIN, "/removeimage a, x")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/removeimage")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/removeimage zzz")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/artcount")).await;
    assert_eq!(
        h.transport.texts(),
        vec![
            "✅ Removed: 1 pictures\n⚠️ Not found: 1 pictures".to_string(),
            text::REMOVE_USAGE.to_string(),
            "⚠️ Not found: 1 pictures".to_string(),
            "📂 1 pictures in the collection.".to_string(),
        ]
    );
}

#[tokio::test]
async fn random_art_sends_a_stored_picture() {
    let mut h = harness().await;
    h.dispatcher
        .dispatch(update(5, json!({"document": {"file_id": "only", "mime_type": "image/gif"}})))
        .await;
    h.dispatcher.dispatch(text_update(5, "/randomart")).await;
    assert_eq!(
        h.transport.sent(),
        vec![Sent::Photo {
            chat: CHAT,
            file_id: "only".into(),
            caption: text::RANDOM_ART_CAPTION.into()
        }]
    );
}

#[tokio::test]
async fn help_ping_and_unknown_commands() {
    let mut h = harness().await;
    h.dispatcher.dispatch(text_update(5, "/help")).await;
    h.dispatcher.dispatch(text_update(ADMIN, "/ping")).await;
    h.dispatcher.dispatch(text_update(5, "/dance now")).await;
    assert_eq!(
        h.transport.texts(),
        vec![text::HELP, text::PONG, text::UNKNOWN[0]]
    );
}

#[tokio::test]
async fn full_queue_answers_busy_instead_of_waiting() {
    let mut h = harness().await;
    for i in 0..9 {
        h.dispatcher.dispatch(text_update(5, &format!("message {i}"))).await;
    }
    assert_eq!(h.transport.texts(), vec![text::BUSY]);
    let mut queued = 0;
    while h.jobs.try_recv().is_ok() {
        queued += 1;
    }
    assert_eq!(queued, 8);
}

/// Model that never answers.
struct Stalled;

#[async_trait]
impl LLMClient for Stalled {
    async fn chat(&self, _model: &str, _request: &ChatRequest) -> Result<String, LLMError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn stalled_model_does_not_block_commands() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let cfg = PersonaConfig::default();
    let registry = UserRegistry::load(dir.path().join("users.json")).await.unwrap();
    let worker = Worker::new(
        Responder::new(&cfg, Arc::new(Stalled), "mock"),
        ConversationState::default(),
        Box::new(ScriptedChance::new()),
        registry,
        transport.clone(),
        Vec::new(),
    );
    let (tx, rx) = mpsc::channel(2);
    tokio::spawn(worker.run(rx));
    let images = ImageStore::load(dir.path().join("images.json")).await.unwrap();
    let mut dispatcher = Dispatcher::new(
        transport.clone(),
        images,
        HashSet::from([ADMIN]),
        tx,
        Box::new(ScriptedChance::new()),
    );

    let handled = tokio::time::timeout(Duration::from_secs(5), async {
        for i in 0..10 {
            dispatcher.dispatch(text_update(5, &format!("tell me a story {i}"))).await;
        }
        dispatcher.dispatch(text_update(5, "/help")).await;
    })
    .await;
    assert!(handled.is_ok());

    let texts = transport.texts();
    assert_eq!(texts.last().map(String::as_str), Some(text::HELP));
    assert!(texts.iter().any(|t| t == text::BUSY));
}
