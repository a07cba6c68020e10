//! API 핸들러 모듈.

pub mod init;
pub mod stream;
pub mod tree;

use axum::http::{header, HeaderMap};

/// 세션 쿠키 이름
pub(crate) const SESSION_COOKIE: &str = "session";

/// 요청 헤더에서 세션 id를 추출한다
pub(crate) fn session_id(headers: &HeaderMap) -> Option<String> {
    headers.get_all(header::COOKIE).iter().find_map(|value| {
        let raw = value.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
    })
}
