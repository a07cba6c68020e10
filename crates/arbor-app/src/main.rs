//! # arbor-app
//!
//! ARBOR 서버 바이너리 진입점.
//! CLI 인자 파싱, 설정 로드, 서버 와이어링, 종료 신호 처리.

use anyhow::{Context, Result};
use arbor_core::config::AppConfig;
use arbor_core::config_manager::ConfigManager;
use arbor_web::StreamServer;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// ARBOR 트리 빌드 스트리밍 서버
///
/// 세션별 SSE 스트림으로 트리 빌드 결과를 전달한다
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 바인드 호스트
    #[arg(long)]
    host: Option<String>,

    /// 바인드 포트
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 세션 채널 용량
    #[arg(long)]
    channel_capacity: Option<usize>,

    /// 작업당 처리 데드라인 (초)
    #[arg(long)]
    job_deadline: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// 설정 파일 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
fn resolve_config_path(args: &Args) -> Result<PathBuf> {
    if let Some(ref path) = args.config {
        return Ok(path.clone());
    }
    let dirs = ProjectDirs::from("io", "arbor", "arbor")
        .context("플랫폼 설정 디렉토리 결정 실패")?;
    Ok(dirs.config_dir().join("config.json"))
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(capacity) = args.channel_capacity {
        config.stream.channel_capacity = capacity;
    }
    if let Some(deadline) = args.job_deadline {
        config.stream.job_deadline_secs = deadline;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "arbor={},arbor_app={},arbor_core={},arbor_web={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("ARBOR 서버 시작");

    // 설정 로드
    let config_path = resolve_config_path(&args)?;
    let manager = ConfigManager::with_path(config_path.clone())
        .with_context(|| format!("설정 로드 실패: {}", config_path.display()))?;
    let mut config = manager.get();

    // CLI 인자로 설정 오버라이드
    apply_overrides(&mut config, &args);
    info!("리슨 주소: {}", config.bind_addr());

    // 종료 신호 처리 (Ctrl-C)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("종료 신호 핸들러 등록 실패");
            return;
        }
        info!("Ctrl-C 수신, 종료 시작");
        let _ = shutdown_tx.send(true);
    });

    // 서버 실행 — 바인드 실패만 기동 치명 에러
    StreamServer::new(config)
        .run(shutdown_rx)
        .await
        .context("서버 실행 실패")?;

    info!("ARBOR 서버 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_take_precedence() {
        let args = Args::parse_from([
            "arbor",
            "--port",
            "9000",
            "--channel-capacity",
            "10",
            "--job-deadline",
            "60",
        ]);
        let mut config = AppConfig::default_config();
        apply_overrides(&mut config, &args);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.stream.channel_capacity, 10);
        assert_eq!(config.stream.job_deadline_secs, 60);
        // 지정하지 않은 값은 기본값 유지
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn explicit_config_path_wins() {
        let args = Args::parse_from(["arbor", "--config", "/tmp/arbor.json"]);
        let path = resolve_config_path(&args).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/arbor.json"));
    }
}
