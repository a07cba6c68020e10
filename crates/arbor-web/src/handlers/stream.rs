//! SSE 구독 핸들러.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{error, info};

use super::session_id;
use crate::error::ApiError;
use crate::hub::SessionHub;
use crate::AppState;

/// 구독 연결 종료 시 세션 채널을 정리하는 가드
///
/// 스트림과 함께 버려진다 — 클라이언트 연결 끊김과 서버측 채널
/// 닫힘 양쪽 모두에서 발동하며, 허브의 close는 멱등하다.
struct ChannelGuard {
    hub: Arc<SessionHub>,
    session_id: String,
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        info!("세션 {} 구독 종료, 채널 정리", self.session_id);
        self.hub.close(&self.session_id);
    }
}

/// 세션 이벤트 스트림 구독
///
/// GET /events
///
/// 스냅샷마다 `data: <json>` 프레임 하나를 쓰고, 유휴 상태에서는
/// keep-alive 주기로 `: ping` 프레임을 쓴다. 채널이 닫히면 스트림을
/// 종료한다. 세션당 활성 구독자는 하나뿐이다 (중복 구독은 409).
pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let session = session_id(&headers).ok_or(ApiError::Unauthorized)?;

    let rx = state
        .hub
        .subscribe(&session)
        .map_err(|e| ApiError::Conflict(e.to_string()))?;
    info!("세션 {} 구독 시작", session);

    let guard = ChannelGuard {
        hub: state.hub.clone(),
        session_id: session,
    };

    // 스냅샷 → SSE 프레임. 직렬화에 실패한 프레임은 건너뛰고 계속한다.
    let stream = ReceiverStream::new(rx).filter_map(move |snapshot| {
        let _keep_until_stream_drop = &guard;
        match serde_json::to_string(&snapshot) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(e) => {
                error!("스냅샷 직렬화 실패, 프레임 건너뜀: {}", e);
                None
            }
        }
    });

    Ok(Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(state.keep_alive).text("ping")))
}
