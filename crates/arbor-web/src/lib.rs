//! # arbor-web
//!
//! 트리 빌드 결과를 SSE로 스트리밍하는 HTTP 서버.
//!
//! ## 구성
//! - [`hub`] — 세션 id → 스냅샷 채널 레지스트리 (팬아웃 단위)
//! - [`queue`] — 제로 큐잉 승인 제어 작업 큐 + 단일 워커
//! - [`handlers`] — /init, /tree, /events 핸들러
//!
//! 단일 프로세스/인메모리 설계: 세션과 대기 작업은 재시작 시 사라진다.

pub mod error;
pub mod handlers;
pub mod hub;
pub mod queue;
pub mod routes;

use arbor_core::config::AppConfig;
use axum::Router;
use hub::SessionHub;
use queue::WorkQueue;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// 스트리밍 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 세션 허브
    pub hub: Arc<SessionHub>,
    /// 작업 큐 핸들
    pub queue: WorkQueue,
    /// SSE keep-alive 핑 주기
    pub keep_alive: Duration,
}

/// 트리 빌드 스트리밍 서버
pub struct StreamServer {
    config: AppConfig,
    state: AppState,
}

impl StreamServer {
    /// 새 서버 생성 — 허브와 워커를 함께 기동한다
    pub fn new(config: AppConfig) -> Self {
        let hub = Arc::new(SessionHub::new(config.stream.channel_capacity));
        let queue = WorkQueue::start(
            hub.clone(),
            Duration::from_secs(config.stream.job_deadline_secs),
        );
        let state = AppState {
            hub,
            queue,
            keep_alive: Duration::from_secs(config.stream.keep_alive_secs),
        };
        Self { config, state }
    }

    /// 라우터 반환 (테스트용)
    pub fn router(&self) -> Router {
        Self::build_router(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 리슨 소켓 바인드 실패만 기동 치명 에러다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let app = Self::build_router(self.state);

        let addr: SocketAddr = self.config.bind_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("잘못된 바인드 주소 {}: {}", self.config.bind_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!("스트리밍 서버 시작: http://{}", addr);

        // Graceful shutdown과 함께 서버 실행
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("스트리밍 서버 종료");
        Ok(())
    }

    fn build_router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::routes()
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds() {
        let server = StreamServer::new(AppConfig::default_config());
        let _router = server.router();
    }

    #[tokio::test]
    async fn state_reflects_config_tunables() {
        let mut config = AppConfig::default_config();
        config.stream.keep_alive_secs = 2;

        let server = StreamServer::new(config);
        assert_eq!(server.state.keep_alive, Duration::from_secs(2));
    }
}
