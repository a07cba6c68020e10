//! 세션 초기화 핸들러.

use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::{session_id, SESSION_COOKIE};

/// 세션 초기화 응답 DTO
#[derive(Debug, Serialize)]
pub struct InitResponse {
    /// 세션 id (기존 또는 새로 발급)
    pub session_id: String,
}

/// 세션 초기화
///
/// GET /init
///
/// 세션 쿠키가 없으면 새 id를 발급하여 쿠키로 내려준다.
/// 이미 있으면 그대로 돌려준다 (멱등).
pub async fn init_session(headers: HeaderMap) -> Response {
    if let Some(existing) = session_id(&headers) {
        return Json(InitResponse {
            session_id: existing,
        })
        .into_response();
    }

    let new_id = Uuid::new_v4().to_string();
    info!("새 세션 발급: {}", new_id);
    let cookie = format!("{SESSION_COOKIE}={new_id}; Path=/; SameSite=Lax");
    (
        [(header::SET_COOKIE, cookie)],
        Json(InitResponse { session_id: new_id }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn mints_cookie_when_absent() {
        let response = init_session(HeaderMap::new()).await;
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn idempotent_when_cookie_present() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

        let response = init_session(headers).await;
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }
}
