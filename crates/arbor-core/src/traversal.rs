//! BFS/DFS 트리 깊이 계산.

use crate::tree::TreeNode;
use std::collections::VecDeque;

/// 레벨 순회(BFS)로 트리 깊이를 계산한다
///
/// 루트만 있는 트리의 깊이는 1이다.
pub fn bfs_depth(root: &TreeNode) -> usize {
    let mut queue: VecDeque<&TreeNode> = VecDeque::from([root]);
    let mut depth = 0;

    while !queue.is_empty() {
        for _ in 0..queue.len() {
            if let Some(node) = queue.pop_front() {
                queue.extend(node.children.iter());
            }
        }
        depth += 1;
    }
    depth
}

/// 재귀(DFS)로 트리 깊이를 계산한다
pub fn dfs_depth(root: &TreeNode) -> usize {
    1 + root
        .children
        .iter()
        .map(dfs_depth)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;

    #[test]
    fn root_only_depth_is_one() {
        let tree = build_tree(&[]);
        assert_eq!(bfs_depth(&tree), 1);
        assert_eq!(dfs_depth(&tree), 1);
    }

    #[test]
    fn bfs_and_dfs_agree() {
        for spec in [&[2u32, 2][..], &[3, 1, 2][..], &[1, 1, 1, 1][..]] {
            let tree = build_tree(spec);
            assert_eq!(bfs_depth(&tree), dfs_depth(&tree));
            assert_eq!(bfs_depth(&tree), spec.len() + 1);
        }
    }

    #[test]
    fn uneven_tree_depth_is_longest_path() {
        // 수동 구성: 루트 아래 한쪽 가지만 깊은 트리
        let mut root = build_tree(&[2]);
        root.children[0]
            .children
            .push(TreeNode::new(4, "child", "green", 2));
        assert_eq!(dfs_depth(&root), 3);
        assert_eq!(bfs_depth(&root), 3);
    }
}
