use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use common::log;
use common::scores::FileLeaderboardStore;

use crate::api::{self, ApiState};
use crate::miniapp::{self, MiniAppState};
use crate::server_config::INDEX_FILE_NAME;

pub struct WebServerSettings {
    pub port: u16,
    pub public_dir: PathBuf,
    pub data_file: PathBuf,
    pub base_url: Option<String>,
}

pub fn build_router(store: Arc<FileLeaderboardStore>, public_dir: &Path, base_url: Option<String>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/score", post(api::submit_score))
        .route("/api/leaderboard", get(api::leaderboard))
        .route("/api/players/{player_id}/best", get(api::player_best))
        .route("/api", any(api::not_found))
        .route("/api/{*rest}", any(api::not_found))
        .with_state(ApiState { store });

    let miniapp_routes = Router::new()
        .route("/api/miniapp-config", get(miniapp::miniapp_config))
        .route("/.well-known/farcaster.json", get(miniapp::farcaster_manifest))
        .with_state(MiniAppState { base_url });

    // Client-side routes all land on the game page.
    let static_files = ServeDir::new(public_dir)
        .fallback(ServeFile::new(public_dir.join(INDEX_FILE_NAME)));

    Router::new()
        .merge(api_routes)
        .merge(miniapp_routes)
        .fallback_service(static_files)
        .layer(cors)
}

pub async fn run_web_server(
    settings: WebServerSettings,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let store = Arc::new(FileLeaderboardStore::new(&settings.data_file));
    let app = build_router(store, &settings.public_dir, settings.base_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log!("Retro Snake server listening on {}", addr);
    log!("Static files directory: {}", settings.public_dir.display());
    log!("Leaderboard file: {}", settings.data_file.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use common::PlayerId;
    use common::scores::api::{ErrorResponse, PlayerBestResponse, ScoreResponse, ScoreSubmission};
    use common::scores::{HttpLeaderboardStore, LeaderboardEntry, LeaderboardStore, StoreError};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    struct TestServer {
        _dir: tempfile::TempDir,
        router: Router,
    }

    fn test_server() -> TestServer {
        let dir = tempfile::tempdir().unwrap();
        let public_dir = dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), "<html>snake</html>").unwrap();
        std::fs::write(public_dir.join("game.js"), "// game").unwrap();

        let store = Arc::new(FileLeaderboardStore::new(dir.path().join("leaderboard.json")));
        let router = build_router(store, &public_dir, None);
        TestServer { _dir: dir, router }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn json<T: DeserializeOwned>(body: &[u8]) -> T {
        serde_json::from_slice(body).unwrap()
    }

    fn post_score(player_id: &str, score: u32) -> Request<Body> {
        let body = serde_json::json!({
            "playerId": player_id,
            "playerName": format!("{} name", player_id),
            "score": score,
        });
        Request::post("/api/score")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_and_read_leaderboard() {
        let server = test_server();

        let (status, body) = send(&server.router, post_score("p1", 40)).await;
        assert_eq!(status, StatusCode::OK);
        let response: ScoreResponse = json(&body);
        assert!(response.success);
        assert_eq!(response.score, 40);
        assert_eq!(response.rank, Some(1));

        let (_, body) = send(&server.router, post_score("p2", 90)).await;
        assert_eq!(json::<ScoreResponse>(&body).rank, Some(1));

        let (status, body) = send(&server.router, get("/api/leaderboard")).await;
        assert_eq!(status, StatusCode::OK);
        let board: Vec<LeaderboardEntry> = json(&body);
        let scores: Vec<u32> = board.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 40]);
    }

    #[tokio::test]
    async fn test_player_best() {
        let server = test_server();
        send(&server.router, post_score("p1", 70)).await;
        send(&server.router, post_score("p1", 30)).await;

        let (status, body) = send(&server.router, get("/api/players/p1/best")).await;
        assert_eq!(status, StatusCode::OK);
        let best: PlayerBestResponse = json(&body);
        assert_eq!(best.best_score, 70);

        let (_, body) = send(&server.router, get("/api/players/nobody/best")).await;
        assert_eq!(json::<PlayerBestResponse>(&body).best_score, 0);
    }

    #[tokio::test]
    async fn test_empty_player_id_is_rejected() {
        let server = test_server();
        let (status, body) = send(&server.router, post_score("", 50)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!json::<ErrorResponse>(&body).error.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_score_body_is_json_400() {
        let server = test_server();
        let request = Request::post("/api/score")
            .header("content-type", "application/json")
            .body(Body::from("{\"playerId\": \"p1\", \"score\": \"lots\"}"))
            .unwrap();
        let (status, body) = send(&server.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!json::<ErrorResponse>(&body).error.is_empty());

        let request = Request::post("/api/score").body(Body::from("score=10")).unwrap();
        let (status, body) = send(&server.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!json::<ErrorResponse>(&body).error.is_empty());
    }

    #[tokio::test]
    async fn test_http_store_against_running_server() {
        let server = test_server();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = server.router.clone();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        let client = HttpLeaderboardStore::new(&format!("http://{}", addr)).unwrap();
        let submit = |id: &str, score: u32| ScoreSubmission {
            player_id: PlayerId::from(id),
            player_name: format!("{} name", id),
            score,
        };

        assert_eq!(client.add_score(submit("p1", 40)).await.unwrap(), Some(1));
        assert_eq!(client.add_score(submit("p2", 90)).await.unwrap(), Some(1));
        assert_eq!(client.add_score(submit("odd/id?x#y", 20)).await.unwrap(), Some(3));

        let top = client.top_scores().await.unwrap();
        let ids: Vec<&str> = top.iter().map(|e| e.player_id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1", "odd/id?x#y"]);
        assert_eq!(top[0].player_name, "p2 name");

        assert_eq!(client.player_best_score(&PlayerId::from("p1")).await.unwrap(), 40);
        assert_eq!(client.player_best_score(&PlayerId::from("odd/id?x#y")).await.unwrap(), 20);
        assert_eq!(client.player_best_score(&PlayerId::from("nobody")).await.unwrap(), 0);

        let rejected = client.add_score(submit("", 10)).await;
        assert!(matches!(rejected, Err(StoreError::Status(400))));
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json_404() {
        let server = test_server();
        let (status, body) = send(&server.router, get("/api/does-not-exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json::<ErrorResponse>(&body).error, "API endpoint not found");
    }

    #[tokio::test]
    async fn test_static_files_and_index_fallback() {
        let server = test_server();

        let (status, body) = send(&server.router, get("/game.js")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"// game");

        let (status, body) = send(&server.router, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<html>snake</html>");

        let (status, body) = send(&server.router, get("/some/client/route")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<html>snake</html>");
    }

    #[tokio::test]
    async fn test_miniapp_endpoints() {
        let server = test_server();
        let request = Request::get("/api/miniapp-config")
            .header("host", "snake.local:3000")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&server.router, request).await;
        assert_eq!(status, StatusCode::OK);
        let config: serde_json::Value = json(&body);
        assert_eq!(config["button"]["action"]["url"], "http://snake.local:3000");

        let (status, body) = send(&server.router, get("/.well-known/farcaster.json")).await;
        assert_eq!(status, StatusCode::OK);
        let manifest: serde_json::Value = json(&body);
        assert!(manifest["accountAssociation"]["header"].is_string());
    }
}
