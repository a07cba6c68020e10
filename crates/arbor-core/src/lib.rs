//! # arbor-core
//!
//! ARBOR 도메인 모델, 에러 타입, 설정.
//! 전송 레이어(arbor-web)가 의존하는 핵심 타입을 제공하며,
//! HTTP/채널 관련 의존성은 갖지 않는다.
//!
//! ## 구조
//!
//! - [`tree`] — 트리 스냅샷 데이터 구조체 (serde Serialize/Deserialize)
//! - [`builder`] — 레벨 스펙으로부터 트리 생성
//! - [`traversal`] — BFS/DFS 깊이 계산
//! - [`palette`] — 깊이별 노드 색상 팔레트
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod builder;
pub mod config;
pub mod config_manager;
pub mod error;
pub mod palette;
pub mod traversal;
pub mod tree;
