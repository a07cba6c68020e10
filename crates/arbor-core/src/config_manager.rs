//! 설정 파일 관리.
//!
//! 지정된 경로의 JSON 파일에서 설정을 로드/저장한다.
//! 파일이 없으면 기본 설정을 생성하여 저장한다.

use crate::config::AppConfig;
use crate::error::CoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 관리자
///
/// 설정 파일의 로드/저장을 관리한다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 현재 설정
    config: AppConfig,
    /// 설정 파일 경로
    config_path: PathBuf,
}

impl ConfigManager {
    /// 지정된 경로로 설정 관리자 생성
    ///
    /// 설정 파일이 없으면 기본 설정을 생성하고 저장한다.
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        // 설정 디렉토리 생성
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Config(format!(
                        "설정 디렉토리 생성 실패: {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
                info!("설정 디렉토리 생성: {}", parent.display());
            }
        }

        // 설정 파일 로드 또는 기본값 생성
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default_config();
            Self::save_to_file(&config_path, &default_config)?;
            info!("기본 설정 파일 생성: {}", config_path.display());
            default_config
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 현재 설정 반환 (복제본)
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// 설정 업데이트 및 파일 저장
    pub fn update(&mut self, new_config: AppConfig) -> Result<(), CoreError> {
        self.config = new_config;
        Self::save_to_file(&self.config_path, &self.config)?;
        debug!("설정 저장 완료: {}", self.config_path.display());
        Ok(())
    }

    /// 파일에서 설정 로드
    fn load_from_file(path: &Path) -> Result<AppConfig, CoreError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", path.display(), e)))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .map_err(|e| CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e)))?;
        debug!("설정 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 설정을 파일에 저장
    fn save_to_file(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)
            .map_err(|e| CoreError::Config(format!("설정 파일 쓰기 실패: {}: {}", path.display(), e)))?;
        Ok(())
    }
}
