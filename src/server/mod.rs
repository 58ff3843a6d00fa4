//! Content server - serves post listings and rendered posts as JSON

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{PageMeta, PostIndex, PostLoader, PostSummary};
use crate::Site;

/// Server state
struct ServerState {
    loader: PostLoader,
    index: PostIndex,
}

/// Start the content server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router for a site
pub fn router(site: &Site) -> Router {
    let state = Arc::new(ServerState {
        loader: PostLoader::new(site),
        index: PostIndex::new(site),
    });

    Router::new()
        .route("/api/posts", get(list_handler))
        .route("/api/posts/:id", get(post_handler))
        .route("/api/posts/:id/meta", get(meta_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_handler(State(state): State<Arc<ServerState>>) -> Response {
    match tokio::task::spawn_blocking(move || state.index.list_posts()).await {
        Ok(posts) => Json::<Vec<PostSummary>>(posts).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match tokio::task::spawn_blocking(move || state.loader.get(&id)).await {
        Ok(Some(post)) => Json(&*post).into_response(),
        Ok(None) => not_found().await,
        Err(e) => internal_error(e),
    }
}

async fn meta_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match tokio::task::spawn_blocking(move || state.loader.page_metadata(&id)).await {
        Ok(meta) => Json(meta).into_response(),
        Err(e) => {
            tracing::error!("Metadata task failed: {}", e);
            Json(PageMeta::not_found()).into_response()
        }
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Page not found" })),
    )
        .into_response()
}

fn internal_error(e: tokio::task::JoinError) -> Response {
    tracing::error!("Request task failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tower::ServiceExt;

    fn site_with_posts() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join("page_2.md"), "# Two\nAuthor: Bob\nsecond").unwrap();
        fs::write(site.posts_dir.join("page_1.md"), "# One\nfirst").unwrap();
        (dir, site)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_posts() {
        let (_dir, site) = site_with_posts();
        let (status, body) = get_json(router(&site), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "1");
        assert_eq!(body[1]["author"], "Bob");
    }

    #[tokio::test]
    async fn test_get_post() {
        let (_dir, site) = site_with_posts();
        let (status, body) = get_json(router(&site), "/api/posts/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Two");
        assert!(body["content"].as_str().unwrap().contains("markdown-p"));
    }

    #[tokio::test]
    async fn test_missing_post_is_404() {
        let (_dir, site) = site_with_posts();
        let (status, body) = get_json(router(&site), "/api/posts/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Page not found");

        let (status, _) = get_json(router(&site), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_meta() {
        let (_dir, site) = site_with_posts();
        let (status, body) = get_json(router(&site), "/api/posts/2/meta").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "A blog post by Bob about cybersecurity");

        let (status, body) = get_json(router(&site), "/api/posts/99/meta").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Post Not Found");
    }
}
