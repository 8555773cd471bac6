use super::*;
use axum::{http::HeaderMap, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn session_handler(headers: HeaderMap) -> Json<Value> {
    let user = headers
        .get("cookie")
        .and_then(|value| value.to_str().ok())
        .and_then(|cookie| cookie.strip_prefix("session_user="))
        .map(|id| json!({ "id": id }));
    Json(json!({ "user": user }))
}

async fn spawn_session_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/session", get(session_handler));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn http_session_reads_the_user_behind_the_cookie() {
    let url = spawn_session_server().await;
    let session = HttpSession::new(&url, Some("u-7")).expect("session");
    assert_eq!(session.current_user().await, Some(UserId::from("u-7")));
}

#[tokio::test]
async fn http_session_without_cookie_is_anonymous() {
    let url = spawn_session_server().await;
    let session = HttpSession::new(&url, None).expect("session");
    assert_eq!(session.current_user().await, None);
}

#[tokio::test]
async fn unreachable_auth_endpoint_resolves_to_no_user() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let session = HttpSession::new(&format!("http://{addr}"), Some("u-7")).expect("session");
    assert_eq!(session.current_user().await, None);
}

#[test]
fn settings_fall_back_to_backend_for_session_lookups() {
    let settings = ClientSettings {
        backend_url: "http://articles.test".into(),
        auth_url: None,
        session: Some("u-1".into()),
    };
    let session = HttpSession::from_settings(&settings).expect("session");
    assert_eq!(session.session_url, "http://articles.test/session");
}

#[tokio::test]
async fn fixed_sessions() {
    assert_eq!(
        StaticSession::new("u-1").current_user().await,
        Some(UserId::from("u-1"))
    );
    assert_eq!(MissingSession.current_user().await, None);
}
