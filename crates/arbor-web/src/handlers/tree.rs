//! 트리 빌드 제출 핸들러.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::session_id;
use crate::error::ApiError;
use crate::queue::{Job, SubmitOutcome};
use crate::AppState;

/// 제출 요청 본문
#[derive(Debug, Deserialize)]
pub struct TreeRequest {
    /// 레벨당 자식 수 (음수 불가)
    pub data: Vec<u32>,
}

/// 제출 수락 응답 DTO
#[derive(Debug, Serialize)]
pub struct TreeAccepted {
    /// 결과가 전달될 세션 id
    pub session_id: String,
}

/// 트리 빌드 작업 제출
///
/// POST /tree
///
/// 수락 응답은 처리 완료를 기다리지 않는다 — 결과는 /events
/// 스트림으로 전달된다 (fire-and-forget).
pub async fn submit_tree(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = session_id(&headers).ok_or(ApiError::Unauthorized)?;

    let request: TreeRequest = serde_json::from_str(&body)
        .map_err(|e| ApiError::BadRequest(format!("본문 파싱 실패: {e}")))?;

    info!("세션 {} 제출 수신: {:?}", session_id, request.data);

    match state.queue.submit(Job {
        session_id: session_id.clone(),
        levels: request.data,
    }) {
        SubmitOutcome::Accepted => Ok((
            StatusCode::ACCEPTED,
            Json(TreeAccepted { session_id }),
        )),
        SubmitOutcome::Busy => {
            warn!("워커 바쁨, 세션 {} 제출 거절", session_id);
            Err(ApiError::Busy)
        }
    }
}
