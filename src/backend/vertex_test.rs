use super::*;
use mockito::Matcher;

const TEST_MODEL: &str = "gemini-1.5-pro";
const GENERATE_PATH: &str =
    "/v1/projects/acme-test/locations/us-central1/publishers/google/models/gemini-1.5-pro:generateContent";

fn test_key() -> ServiceAccountKey {
    ServiceAccountKey {
        project_id: Some("acme-test".to_string()),
        ..ServiceAccountKey::default()
    }
}

fn setup_backend(url: &str) -> VertexAi {
    VertexAi::new(&test_key(), TEST_MODEL)
        .expect("failed to build backend")
        .with_endpoint(url)
        .with_access_token("test_token")
}

fn model_reply(text: &str) -> String {
    serde_json::to_string(&GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: "model".to_string(),
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
    })
    .unwrap()
}

#[test]
fn test_provider_role() {
    assert_eq!(provider_role(Role::System), "user");
    assert_eq!(provider_role(Role::User), "user");
    assert_eq!(provider_role(Role::Assistant), "model");
}

#[test]
fn test_missing_project_id() {
    let err = VertexAi::new(&ServiceAccountKey::default(), TEST_MODEL).unwrap_err();
    assert!(matches!(err, CredentialsError::MissingProjectId));
}

#[tokio::test]
async fn test_ask_maps_roles_and_splits_history() {
    let mut server = mockito::Server::new_async().await;

    // All four messages are role-mapped; the first three land in history and
    // the last one is sent as the new user turn.
    let handler = server
        .mock("POST", GENERATE_PATH)
        .match_header("Authorization", "Bearer test_token")
        .match_body(Matcher::Json(serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "You are a SQL assistant."}]},
                {"role": "user", "parts": [{"text": "Hello"}]},
                {"role": "model", "parts": [{"text": "Hi, ask me anything."}]},
                {"role": "user", "parts": [{"text": "How many users are there?"}]}
            ]
        })))
        .with_status(200)
        .with_body(model_reply("SELECT COUNT(*) FROM users;"))
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let messages = vec![
        Message::new_system("You are a SQL assistant."),
        Message::new_user("Hello"),
        Message::new_assistant("Hi, ask me anything."),
        Message::new_user("How many users are there?"),
    ];

    let answer = backend
        .ask(messages, CancellationToken::new())
        .await
        .expect("failed to ask");

    assert_eq!(answer, "SELECT COUNT(*) FROM users;");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_single_message_has_no_history() {
    let mut server = mockito::Server::new_async().await;

    let handler = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::Json(serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "ping"}]}
            ]
        })))
        .with_status(200)
        .with_body(model_reply("pong"))
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let answer = backend
        .ask(vec![Message::new_user("ping")], CancellationToken::new())
        .await
        .expect("failed to ask");

    assert_eq!(answer, "pong");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_takes_last_part_across_candidates() {
    let body = serde_json::to_string(&GenerateContentResponse {
        candidates: vec![
            Candidate {
                content: Some(Content {
                    role: "model".to_string(),
                    parts: vec![Part::text("partA"), Part::text("partB")],
                }),
                finish_reason: None,
            },
            Candidate {
                content: Some(Content {
                    role: "model".to_string(),
                    parts: vec![Part::text("partC")],
                }),
                finish_reason: Some("STOP".to_string()),
            },
        ],
    })
    .unwrap();

    let mut server = mockito::Server::new_async().await;
    let handler = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let answer = backend
        .ask(vec![Message::new_user("q")], CancellationToken::new())
        .await
        .expect("failed to ask");

    // Parts are not concatenated, the last one observed wins.
    assert_eq!(answer, "partC");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_empty_candidates() {
    let mut server = mockito::Server::new_async().await;
    let handler = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let answer = backend
        .ask(vec![Message::new_user("q")], CancellationToken::new())
        .await
        .expect("failed to ask");

    assert_eq!(answer, "");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_candidate_without_content() {
    let mut server = mockito::Server::new_async().await;
    let handler = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let answer = backend
        .ask(vec![Message::new_user("q")], CancellationToken::new())
        .await
        .expect("failed to ask");

    assert_eq!(answer, "");
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_api_error() {
    let mut server = mockito::Server::new_async().await;
    let handler = server
        .mock("POST", GENERATE_PATH)
        .with_status(400)
        .with_body(
            r#"{"error": {"code": 400, "message": "Invalid request", "status": "INVALID_ARGUMENT"}}"#,
        )
        .create_async()
        .await;

    let backend = setup_backend(&server.url());
    let err = backend
        .ask(vec![Message::new_user("q")], CancellationToken::new())
        .await
        .unwrap_err();

    let vertex_err = err
        .downcast_ref::<VertexError>()
        .expect("expected a VertexError");
    assert_eq!(vertex_err.http_code, 400);
    assert_eq!(vertex_err.message, "Invalid request");
    assert_eq!(vertex_err.status.as_deref(), Some("INVALID_ARGUMENT"));
    assert!(format!("{:#}", err).contains("vertex api error"));
    handler.assert_async().await;
}

#[tokio::test]
async fn test_ask_cancelled() {
    let mut server = mockito::Server::new_async().await;
    // The handler must never be reached once the token is cancelled.
    let handler = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(model_reply("too late"))
        .expect(0)
        .create_async()
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let backend = setup_backend(&server.url());
    let err = backend
        .ask(vec![Message::new_user("q")], token)
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("request cancelled"));
    handler.assert_async().await;
}
