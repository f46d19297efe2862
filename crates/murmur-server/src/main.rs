use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use murmur_api::{AppState, AppStateInner, accounts, messages};

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            get(messages::get_all_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_messages_by_user),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("MURMUR_DB_PATH").unwrap_or_else(|_| "murmur.db".into());
    let host = std::env::var("MURMUR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MURMUR_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;

    // Init database, injected into both services
    let db = Arc::new(murmur_db::Database::open(&PathBuf::from(&db_path))?);
    let state: AppState = Arc::new(AppStateInner::new(db));

    let app = create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Murmur server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use murmur_types::models::{Account, Message};
    use tower::ServiceExt;

    fn app() -> Router {
        let db = Arc::new(murmur_db::Database::open_in_memory().unwrap());
        create_router(Arc::new(AppStateInner::new(db)))
    }

    fn req(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn register_returns_account_and_rejects_duplicates() {
        let app = app();

        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/register",
                r#"{"username":"bob","password":"pass"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let account: Account = json_body(response).await;
        assert_eq!(account.account_id, 1);
        assert_eq!(account.username, "bob");
        assert_eq!(account.password, "pass");

        // Same username again: 400, storage unchanged.
        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/register",
                r#"{"username":"bob","password":"other"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_rejects_empty_username_and_short_password() {
        let app = app();

        for body in [
            r#"{"username":"","password":"pass"}"#,
            r#"{"username":"carol","password":"abc"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(req("POST", "/register", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        }
    }

    #[tokio::test]
    async fn login_matches_exactly_or_401s() {
        let app = app();
        app.clone()
            .oneshot(req(
                "POST",
                "/register",
                r#"{"username":"bob","password":"pass"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/login",
                r#"{"username":"bob","password":"pass"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let account: Account = json_body(response).await;
        assert_eq!(account.username, "bob");

        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/login",
                r#"{"username":"bob","password":"wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn message_lifecycle_create_read_update_delete() {
        let app = app();
        app.clone()
            .oneshot(req(
                "POST",
                "/register",
                r#"{"username":"bob","password":"pass"}"#,
            ))
            .await
            .unwrap();

        // Create
        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/messages",
                r#"{"posted_by":1,"message_text":"hi","time_posted_epoch":1000}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let posted: Message = json_body(response).await;
        assert_eq!(posted.message_text, "hi");
        let id = posted.message_id;

        // Read back, individually and in the full list
        let response = app
            .clone()
            .oneshot(get_req(&format!("/messages/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Message = json_body(response).await;
        assert_eq!(fetched, posted);

        let response = app.clone().oneshot(get_req("/messages")).await.unwrap();
        let all: Vec<Message> = json_body(response).await;
        assert_eq!(all, vec![posted.clone()]);

        // Update
        let response = app
            .clone()
            .oneshot(req(
                "PATCH",
                &format!("/messages/{id}"),
                r#"{"message_text":"edited"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Message = json_body(response).await;
        assert_eq!(updated.message_text, "edited");
        assert_eq!(updated.time_posted_epoch, 1000);

        // Delete echoes the record as it stood
        let response = app
            .clone()
            .oneshot(delete_req(&format!("/messages/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: Message = json_body(response).await;
        assert_eq!(deleted.message_text, "edited");

        // Gone now: 200 with empty bodies
        let response = app
            .clone()
            .oneshot(get_req(&format!("/messages/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());

        let response = app
            .clone()
            .oneshot(delete_req(&format!("/messages/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn create_and_update_enforce_the_text_gate() {
        let app = app();

        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/messages",
                r#"{"posted_by":1,"message_text":"","time_posted_epoch":1000}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let long = "x".repeat(256);
        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/messages",
                &format!(r#"{{"posted_by":1,"message_text":"{long}","time_posted_epoch":1000}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Valid message, then an invalid patch leaves it untouched
        let response = app
            .clone()
            .oneshot(req(
                "POST",
                "/messages",
                r#"{"posted_by":1,"message_text":"keep me","time_posted_epoch":1000}"#,
            ))
            .await
            .unwrap();
        let posted: Message = json_body(response).await;

        let response = app
            .clone()
            .oneshot(req(
                "PATCH",
                &format!("/messages/{}", posted.message_id),
                r#"{"message_text":""}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(get_req(&format!("/messages/{}", posted.message_id)))
            .await
            .unwrap();
        let unchanged: Message = json_body(response).await;
        assert_eq!(unchanged.message_text, "keep me");

        // Valid text against an unknown id still fails
        let response = app
            .clone()
            .oneshot(req(
                "PATCH",
                "/messages/999",
                r#"{"message_text":"valid"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn messages_by_user_filters_and_defaults_to_empty() {
        let app = app();

        for body in [
            r#"{"posted_by":1,"message_text":"one","time_posted_epoch":1000}"#,
            r#"{"posted_by":2,"message_text":"two","time_posted_epoch":2000}"#,
            r#"{"posted_by":1,"message_text":"three","time_posted_epoch":3000}"#,
        ] {
            app.clone()
                .oneshot(req("POST", "/messages", body))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(get_req("/accounts/1/messages"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let messages: Vec<Message> = json_body(response).await;
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.posted_by == 1));

        // No messages: an empty array, not an error.
        let response = app
            .clone()
            .oneshot(get_req("/accounts/42/messages"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"[]");
    }
}
