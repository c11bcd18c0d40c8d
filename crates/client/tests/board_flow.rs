//! Drives the client against the real router served on an ephemeral port.

use std::sync::Arc;

use assert_matches::assert_matches;
use taskdeck_api::auth::jwt::JwtConfig;
use taskdeck_api::config::{ServerConfig, StoreBackend};
use taskdeck_api::router::build_app_router;
use taskdeck_api::state::AppState;
use taskdeck_client::{auth, ApiError, Board, TaskdeckApi};
use taskdeck_core::project::CreateProject;
use taskdeck_core::signup::SignupForm;
use taskdeck_core::todo::{CreateTodo, Priority};
use taskdeck_db::MemoryStore;

const PASSWORD: &str = "client_password_1";

async fn spawn_server() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "client-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    };
    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), store)
}

fn signup_form(email: &str) -> SignupForm {
    SignupForm {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        confirm_password: PASSWORD.to_string(),
        full_name: Some("Client User".to_string()),
        accept_terms: true,
    }
}

async fn signed_in_api(url: &str, email: &str) -> TaskdeckApi {
    let mut api = TaskdeckApi::new(url);
    auth::signup(&mut api, &signup_form(email)).await.unwrap();
    api
}

fn todo(title: &str, priority: Priority) -> CreateTodo {
    CreateTodo {
        title: Some(title.to_string()),
        priority: Some(priority),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_signup_then_login() {
    let (url, _store) = spawn_server().await;
    let mut api = TaskdeckApi::new(&url);

    let session = auth::signup(&mut api, &signup_form("flow@test.com"))
        .await
        .unwrap();
    assert_eq!(session.user.email, "flow@test.com");
    assert_eq!(session.user.full_name.as_deref(), Some("Client User"));
    assert!(api.is_authenticated());

    auth::logout(&mut api);
    assert!(!api.is_authenticated());

    let session = auth::login(&mut api, "flow@test.com", PASSWORD).await.unwrap();
    assert_eq!(session.expires_in, 15 * 60);
    assert!(api.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let (url, _store) = spawn_server().await;
    let mut api = TaskdeckApi::new(&url);

    let err = auth::login(&mut api, "nobody@test.com", PASSWORD)
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ApiError::Api { status: 401, ref message } if message == "Invalid login credentials"
    );
    assert!(!api.is_authenticated());
}

#[tokio::test]
async fn test_board_load_add_toggle_remove() {
    let (url, _store) = spawn_server().await;
    let api = signed_in_api(&url, "board@test.com").await;

    let project = api
        .create_project(&CreateProject {
            name: Some("Work".into()),
            color: None,
        })
        .await
        .unwrap();
    api.create_todo(&todo("existing", Priority::Medium))
        .await
        .unwrap();

    let mut board = Board::new(api.clone());
    board.load().await.unwrap();
    assert_eq!(board.todos().count(), 1);
    assert_eq!(board.projects().len(), 1);

    let urgent = board
        .add(CreateTodo {
            project_id: Some(project.id),
            ..todo("urgent", Priority::High)
        })
        .await
        .unwrap()
        .expect("non-blank title is created");

    let first = board.todos().next().unwrap();
    assert_eq!(first.todo.id, urgent);
    assert_eq!(first.project.as_ref().map(|p| p.name.as_str()), Some("Work"));

    let view = board.view();
    assert_eq!(view.high_priority.len(), 1);
    assert_eq!(view.other.len(), 1);

    board.toggle(urgent).await.unwrap();
    assert!(board.get(urgent).unwrap().todo.completed);
    let view = board.view();
    assert!(view.high_priority.is_empty());
    assert_eq!(view.other.len(), 1);

    // Server agrees with the local mirror.
    let server_side = api.list_todos().await.unwrap();
    let remote = server_side.iter().find(|t| t.todo.id == urgent).unwrap();
    assert!(remote.todo.completed);

    board.remove(urgent).await.unwrap();
    assert!(board.get(urgent).is_none());
    assert_eq!(api.list_todos().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_request_leaves_board_unchanged() {
    let (url, store) = spawn_server().await;
    let api = signed_in_api(&url, "outage@test.com").await;

    let mut board = Board::new(api);
    board.load().await.unwrap();
    let id = board
        .add(todo("keep me", Priority::Low))
        .await
        .unwrap()
        .unwrap();

    store
        .set_unavailable(Some("database is down".into()))
        .await;

    let err = board.toggle(id).await.unwrap_err();
    assert_matches!(err, ApiError::Api { status: 500, .. });
    assert!(!board.get(id).unwrap().todo.completed);

    let err = board.remove(id).await.unwrap_err();
    assert_eq!(err.to_string(), "database is down");
    assert!(board.get(id).is_some());

    assert!(board.add(todo("lost", Priority::High)).await.is_err());
    assert_eq!(board.todos().count(), 1);
}

#[tokio::test]
async fn test_requests_without_session_are_rejected() {
    let (url, _store) = spawn_server().await;
    let mut board = Board::new(TaskdeckApi::new(&url));

    let err = board.load().await.unwrap_err();
    assert_matches!(err, ApiError::Api { status: 401, .. });
}
