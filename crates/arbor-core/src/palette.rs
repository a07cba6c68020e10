//! 깊이별 노드 색상 팔레트.

/// 트리 레벨에 매핑되는 색상 목록 (graphviz 색상 이름)
pub const COLORS: [&str; 7] = [
    "gold",
    "firebrick",
    "green",
    "darksalmon",
    "aquamarine",
    "moccasin",
    "turquoise",
];

/// 주어진 깊이의 노드 색상 반환
///
/// 팔레트 길이를 넘는 깊이는 모듈러로 순환한다.
pub fn color_for_depth(depth: usize) -> &'static str {
    COLORS[depth % COLORS.len()]
}
