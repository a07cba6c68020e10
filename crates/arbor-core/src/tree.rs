//! 트리 스냅샷 데이터 구조체.
//!
//! 하나의 빌드 작업 결과를 표현하며, 전송 레이어는 이 구조를
//! 불투명한 직렬화 가능 페이로드로만 다룬다.

use serde::{Deserialize, Serialize};

/// 다중 자식 트리 노드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// 노드 값 (전위 순서 일련번호)
    pub val: u32,
    /// 자식 노드들
    pub children: Vec<TreeNode>,
    /// 순회 방문 여부
    #[serde(rename = "isVisited")]
    pub is_visited: bool,
    /// 표시용 메타데이터
    pub metadata: TreeMetadata,
}

/// 노드 표시용 메타데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeMetadata {
    /// 노드 레이블 ("root" 또는 "child")
    pub label: String,
    /// 노드 색상 (graphviz 색상 이름)
    pub color: String,
    /// 루트 기준 깊이 (루트 = 0)
    pub depth: usize,
}

impl TreeNode {
    /// 새 노드 생성 (자식 없음)
    pub fn new(val: u32, label: &str, color: &str, depth: usize) -> Self {
        Self {
            val,
            children: Vec::new(),
            is_visited: false,
            metadata: TreeMetadata {
                label: label.to_string(),
                color: color.to_string(),
                depth,
            },
        }
    }

    /// 전체 노드 수 (자기 자신 포함)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_field_names() {
        let node = TreeNode::new(1, "root", "gold", 0);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"val\":1"));
        assert!(json.contains("\"isVisited\":false"));
        assert!(json.contains("\"Label\":\"root\""));
        assert!(json.contains("\"Color\":\"gold\""));
        assert!(json.contains("\"Depth\":0"));
    }

    #[test]
    fn node_count_counts_self_and_descendants() {
        let mut root = TreeNode::new(1, "root", "gold", 0);
        root.children.push(TreeNode::new(2, "child", "firebrick", 1));
        root.children.push(TreeNode::new(3, "child", "firebrick", 1));
        assert_eq!(root.node_count(), 3);
    }
}
