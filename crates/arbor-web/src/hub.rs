//! 세션 허브.
//!
//! 세션 id → 스냅샷 채널 레지스트리의 단일 소유자.
//! 레지스트리 락은 조회/삽입/삭제 동안에만 잡으며,
//! 채널 입출력은 락 밖에서 수행한다.

use arbor_core::tree::TreeNode;
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// 구독 실패 에러
#[derive(Debug, Error)]
pub enum HubError {
    /// 같은 세션에 이미 활성 구독자가 있음
    #[error("세션 {0}에 이미 활성 구독자가 있음")]
    AlreadySubscribed(String),
}

/// 세션 하나의 채널 엔트리
///
/// 수신단은 구독자가 가져가면 `None`이 된다. 엔트리가 레지스트리에서
/// 제거되면 송신단이 닫혀 구독자는 스트림 종료를 관측한다.
struct SessionEntry {
    tx: mpsc::Sender<TreeNode>,
    rx: Option<mpsc::Receiver<TreeNode>>,
}

/// 세션별 스냅샷 팬아웃 허브
pub struct SessionHub {
    /// 세션 채널 용량
    capacity: usize,
    /// 세션 id → 채널 레지스트리
    streams: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionHub {
    /// 새 허브 생성
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// 세션 채널의 수신단을 가져온다
    ///
    /// 채널이 없으면 생성한다. 수신단은 세션당 하나뿐이며,
    /// 이미 다른 구독자가 가져갔으면 [`HubError::AlreadySubscribed`].
    pub fn subscribe(&self, session_id: &str) -> Result<mpsc::Receiver<TreeNode>, HubError> {
        let mut streams = self.streams.lock();
        let entry = streams
            .entry(session_id.to_string())
            .or_insert_with(|| Self::new_entry(self.capacity));
        entry
            .rx
            .take()
            .ok_or_else(|| HubError::AlreadySubscribed(session_id.to_string()))
    }

    /// 세션 채널에 스냅샷을 비블로킹으로 넣는다
    ///
    /// 채널이 없으면 생성한다. 채널이 가득 차면 새 스냅샷을 버리고
    /// 경고를 남긴다 — 느린 구독자가 워커를 멈추게 해서는 안 된다.
    pub fn publish(&self, session_id: &str, snapshot: TreeNode) {
        let tx = {
            let mut streams = self.streams.lock();
            streams
                .entry(session_id.to_string())
                .or_insert_with(|| Self::new_entry(self.capacity))
                .tx
                .clone()
        };

        match tx.try_send(snapshot) {
            Ok(()) => debug!("세션 {} 스냅샷 발행", session_id),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("세션 {} 채널 가득 참, 스냅샷 버림", session_id);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("세션 {} 채널 닫힘, 스냅샷 버림", session_id);
            }
        }
    }

    /// 세션 채널을 닫고 레지스트리에서 제거한다
    ///
    /// 멱등: 없는 세션을 닫아도 아무 일도 하지 않는다.
    /// 활성 구독자는 스트림 종료를 관측한다.
    pub fn close(&self, session_id: &str) {
        let removed = self.streams.lock().remove(session_id);
        if removed.is_some() {
            debug!("세션 {} 채널 닫힘", session_id);
        }
    }

    /// 세션 채널 존재 여부
    pub fn contains(&self, session_id: &str) -> bool {
        self.streams.lock().contains_key(session_id)
    }

    fn new_entry(capacity: usize) -> SessionEntry {
        let (tx, rx) = mpsc::channel(capacity);
        SessionEntry { tx, rx: Some(rx) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::builder::build_tree;

    fn snapshot(levels: &[u32]) -> TreeNode {
        build_tree(levels)
    }

    #[tokio::test]
    async fn publish_then_subscribe_delivers_in_fifo_order() {
        let hub = SessionHub::new(8);
        hub.publish("s1", snapshot(&[1]));
        hub.publish("s1", snapshot(&[2]));

        let mut rx = hub.subscribe("s1").unwrap();
        assert_eq!(rx.recv().await.unwrap().children.len(), 1);
        assert_eq!(rx.recv().await.unwrap().children.len(), 2);
    }

    #[tokio::test]
    async fn full_channel_drops_new_snapshot() {
        let hub = SessionHub::new(1);
        hub.publish("s1", snapshot(&[1]));
        hub.publish("s1", snapshot(&[2])); // 용량 초과, 버려짐

        let mut rx = hub.subscribe("s1").unwrap();
        assert_eq!(rx.recv().await.unwrap().children.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn second_subscriber_is_rejected() {
        let hub = SessionHub::new(8);
        let _rx = hub.subscribe("s1").unwrap();
        assert!(matches!(
            hub.subscribe("s1"),
            Err(HubError::AlreadySubscribed(_))
        ));
    }

    #[tokio::test]
    async fn close_ends_active_reader() {
        let hub = SessionHub::new(8);
        let mut rx = hub.subscribe("s1").unwrap();
        hub.close("s1");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let hub = SessionHub::new(8);
        hub.publish("s1", snapshot(&[1]));
        hub.close("s1");
        hub.close("s1"); // 두 번째 호출은 no-op
        assert!(!hub.contains("s1"));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let hub = SessionHub::new(8);
        hub.publish("s1", snapshot(&[1]));

        let mut rx2 = hub.subscribe("s2").unwrap();
        assert!(rx2.try_recv().is_err());

        let mut rx1 = hub.subscribe("s1").unwrap();
        assert!(rx1.recv().await.is_some());
    }

    #[tokio::test]
    async fn resubscribe_after_close_gets_fresh_channel() {
        let hub = SessionHub::new(8);
        let _rx = hub.subscribe("s1").unwrap();
        hub.close("s1");

        // 새 채널이므로 다시 구독 가능
        let mut rx = hub.subscribe("s1").unwrap();
        hub.publish("s1", snapshot(&[1]));
        assert!(rx.recv().await.is_some());
    }
}
