//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// 스트리밍 API 라우트 생성
pub fn routes() -> Router<AppState> {
    Router::new()
        // 세션 초기화
        .route("/init", get(handlers::init::init_session))
        // 트리 빌드 제출
        .route("/tree", post(handlers::tree::submit_tree))
        // 실시간 스트림 (SSE)
        .route("/events", get(handlers::stream::subscribe))
}
