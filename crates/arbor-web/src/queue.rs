//! 작업 큐와 워커.
//!
//! 제출은 비블로킹 승인 제어를 따른다: 워커가 유휴 상태일 때만
//! 수락하고, 처리 중이면 즉시 거절한다 (제로 큐잉 정책).
//! 수락된 작업은 단일 워커가 순차 처리하며, 작업당 데드라인을
//! 넘기면 버리고 로그만 남긴다.

use crate::hub::SessionHub;
use arbor_core::builder::build_tree;
use arbor_core::tree::TreeNode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;
use tracing::{error, info};

/// 스냅샷 빌더 — (레벨 스펙) → 트리
///
/// 워커의 blocking 스레드에서 실행된다.
pub type Builder = Arc<dyn Fn(&[u32]) -> TreeNode + Send + Sync>;

/// 빌드 작업
#[derive(Debug, Clone)]
pub struct Job {
    /// 결과를 받을 세션 id
    pub session_id: String,
    /// 레벨당 자식 수
    pub levels: Vec<u32>,
}

/// 제출 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 워커가 작업을 받음
    Accepted,
    /// 워커가 처리 중 — 큐잉하지 않고 거절
    Busy,
}

/// 작업 큐 핸들
///
/// 복제 가능. 모든 핸들이 버려지면 워커는 남은 작업 없이 종료한다.
#[derive(Clone)]
pub struct WorkQueue {
    tx: mpsc::UnboundedSender<(Job, OwnedSemaphorePermit)>,
    /// 단일 워커 슬롯. 퍼밋은 제출 시점에 잡혀 작업 완료까지 유지된다.
    slot: Arc<Semaphore>,
}

impl WorkQueue {
    /// 기본 트리 빌더로 큐를 만들고 워커를 기동한다
    pub fn start(hub: Arc<SessionHub>, deadline: Duration) -> Self {
        Self::with_builder(hub, deadline, Arc::new(|levels: &[u32]| build_tree(levels)))
    }

    /// 지정한 빌더로 큐를 만들고 워커를 기동한다
    pub fn with_builder(hub: Arc<SessionHub>, deadline: Duration, builder: Builder) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(worker_loop(rx, hub, deadline, builder));
        Self {
            tx,
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// 작업 제출 (비블로킹)
    ///
    /// 워커가 유휴면 `Accepted`, 처리 중이면 즉시 `Busy`.
    pub fn submit(&self, job: Job) -> SubmitOutcome {
        let permit = match self.slot.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => return SubmitOutcome::Busy,
        };

        // 워커가 이미 종료했으면 (셧다운 중) 거절
        if self.tx.send((job, permit)).is_err() {
            return SubmitOutcome::Busy;
        }
        SubmitOutcome::Accepted
    }
}

/// 워커 루프
///
/// 작업을 하나씩 꺼내 데드라인 안에서 빌더를 실행하고,
/// 성공한 스냅샷만 허브에 발행한다. 제출 채널이 닫히면 종료한다.
async fn worker_loop(
    mut rx: UnboundedReceiver<(Job, OwnedSemaphorePermit)>,
    hub: Arc<SessionHub>,
    deadline: Duration,
    builder: Builder,
) {
    info!("워커 시작");
    while let Some((job, permit)) = rx.recv().await {
        let session_id = job.session_id;
        let levels = job.levels;
        info!("세션 {} 작업 처리 시작: {:?}", session_id, levels);

        let builder = builder.clone();
        let built = timeout(
            deadline,
            tokio::task::spawn_blocking(move || builder(&levels)),
        )
        .await;

        match built {
            Ok(Ok(snapshot)) => {
                hub.publish(&session_id, snapshot);
                info!("세션 {} 작업 처리 완료", session_id);
            }
            Ok(Err(e)) => {
                error!("세션 {} 빌더 패닉: {}", session_id, e);
            }
            Err(_) => {
                error!("세션 {} 작업 데드라인 초과, 작업 버림", session_id);
            }
        }

        // 작업 완료 — 다음 제출을 받을 수 있다
        drop(permit);
    }
    info!("워커 종료");
}
