//! 애플리케이션 설정 구조체.
//!
//! 리슨 주소와 스트리밍 튜너블(세션 채널 용량, 작업 데드라인, keep-alive 주기)을
//! 정의한다. 파일 로드/저장은 [`crate::config_manager`]가 담당한다.

use serde::{Deserialize, Serialize};

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 스트리밍 코어 설정
    #[serde(default)]
    pub stream: StreamConfig,
}

/// HTTP 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 바인드 호스트
    pub host: String,
    /// 바인드 포트
    pub port: u16,
}

/// 스트리밍 코어 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// 세션별 스냅샷 채널 용량
    pub channel_capacity: usize,
    /// 작업당 처리 데드라인 (초)
    pub job_deadline_secs: u64,
    /// SSE keep-alive 핑 주기 (초)
    pub keep_alive_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 50,
            job_deadline_secs: 120,
            keep_alive_secs: 5,
        }
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            stream: StreamConfig::default(),
        }
    }

    /// 바인드 주소 문자열 반환 (예: "127.0.0.1:8080")
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
