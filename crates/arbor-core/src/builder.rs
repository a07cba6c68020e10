//! 레벨 스펙으로부터 트리 생성.
//!
//! 레벨 스펙은 레벨당 노드별 자식 수의 나열이다. 예: `[2, 3]`은
//! 루트에 자식 2개, 그 각각에 자식 3개를 붙인다.
//! 노드 일련번호는 루트 1부터 시작하여, 한 노드의 자식들에 먼저
//! 번호를 부여한 뒤 각 자식의 하위 트리로 내려가며 이어진다.

use crate::palette::color_for_depth;
use crate::tree::TreeNode;

/// 레벨 스펙으로 트리를 생성한다
///
/// 빈 스펙이면 루트 노드 하나만 반환한다.
pub fn build_tree(levels: &[u32]) -> TreeNode {
    let mut root = TreeNode::new(1, "root", color_for_depth(0), 0);
    attach_children(&mut root, levels, 2, 1);
    root
}

/// `node`의 하위 트리를 채우고 다음 일련번호를 반환한다
///
/// 일련번호는 가변 참조 공유 없이 누산값으로 전달된다.
fn attach_children(node: &mut TreeNode, levels: &[u32], mut counter: u32, depth: usize) -> u32 {
    if depth > levels.len() {
        return counter;
    }

    for _ in 0..levels[depth - 1] {
        node.children
            .push(TreeNode::new(counter, "child", color_for_depth(depth), depth));
        counter += 1;
    }

    for child in &mut node.children {
        counter = attach_children(child, levels, counter, depth + 1);
    }
    counter
}
