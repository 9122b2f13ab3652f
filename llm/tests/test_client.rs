use llm::{ChatRequest, DeepSeekClient, LLMClient, LLMError, OllamaClient};

use mock_server::{spawn_completions_server, spawn_generate_server};

#[tokio::test]
async fn deepseek_sends_system_and_user_messages() {
    let (url, captured, shutdown) = spawn_completions_server("playful", 200).await;
    let client = DeepSeekClient::new(&url, Some("secret".into()));
    let req = ChatRequest::new("classify", "hello there")
        .max_tokens(5)
        .temperature(0.0);
    let out = client.chat("deepseek-chat", &req).await.unwrap();
    assert_eq!(out, "playful");

    let bodies = captured.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["model"], "deepseek-chat");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "classify");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "hello there");
    assert_eq!(body["max_tokens"], 5);
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["authorization"], "Bearer secret");
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn deepseek_omits_unset_sampling_fields() {
    let (url, captured, shutdown) = spawn_completions_server("free text", 200).await;
    let client = DeepSeekClient::new(format!("{url}/"), None);
    let out = client
        .chat("deepseek-chat", &ChatRequest::new("sys", "hi"))
        .await
        .unwrap();
    assert_eq!(out, "free text");
    let body = captured.lock().unwrap()[0].clone();
    assert!(body.get("max_tokens").is_none());
    assert!(body.get("temperature").is_none());
    assert!(body["authorization"].is_null());
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn deepseek_surfaces_http_status() {
    let (url, _captured, shutdown) = spawn_completions_server("nope", 500).await;
    let client = DeepSeekClient::new(&url, None);
    let res = client
        .chat("deepseek-chat", &ChatRequest::new("sys", "hi"))
        .await;
    assert!(matches!(res, Err(LLMError::Status(500, _))));
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn deepseek_unreachable_is_an_error() {
    let client = DeepSeekClient::new("http://127.0.0.1:9", None);
    let res = client
        .chat("deepseek-chat", &ChatRequest::new("sys", "hi"))
        .await;
    assert!(res.is_err());
}

#[tokio::test]
async fn ollama_forwards_system_prompt() {
    let (url, captured, shutdown) = spawn_generate_server("angry").await;
    let client = OllamaClient::new(&url).unwrap();
    let req = ChatRequest::new("pick a mood", "you suck")
        .max_tokens(5)
        .temperature(0.0);
    let out = client.chat("gemma3:27b", &req).await.unwrap();
    assert_eq!(out, "angry");
    let body = captured.lock().unwrap()[0].clone();
    assert_eq!(body["prompt"], "you suck");
    assert_eq!(body["system"], "pick a mood");
    assert_eq!(body["model"], "gemma3:27b");
    let _ = shutdown.send(()).await;
}
