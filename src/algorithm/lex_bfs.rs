//! 字典序广度优先搜索（Lex-BFS）
//!
//! 每次从待处理顶点中取出标签字典序最大的一个。弹出顶点 `v` 时，
//! 把当前倒计数（尚未弹出的顶点数）追加到 `v` 每个未处理邻居的标签末尾。
//! 得到的顺序的逆序可用于弦图判定。

use crate::graph::{Graph, VertexId};
use crate::types::{Direction, VisitState};
use smallvec::SmallVec;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// 顶点标签：发现时追加的倒计数序列
pub type Label = SmallVec<[usize; 8]>;

/// Lex-BFS 结果
#[derive(Debug, Clone)]
pub struct LexBfsResult {
    /// 顶点弹出顺序
    pub order: Vec<VertexId>,
    /// 结束时每个顶点的标签（按顶点 ID 下标）
    pub labels: Vec<Label>,
}

/// 每次运行独立的状态
struct LexBfsState {
    labels: Vec<Label>,
    states: Vec<VisitState>,
}

/// 字典序广度优先搜索
pub struct LexBfs<'g> {
    graph: &'g Graph,
}

impl<'g> LexBfs<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 计算全图的 Lex-BFS 顺序
    pub fn order(&self) -> Vec<VertexId> {
        self.run().order
    }

    /// 计算顺序并保留最终标签
    pub fn run(&self) -> LexBfsResult {
        let n = self.graph.vertex_count();
        let mut state = LexBfsState {
            labels: vec![Label::new(); n],
            states: vec![VisitState::White; n],
        };
        let mut order = Vec::with_capacity(n);

        // 只有仍为白色的顶点才开始新一轮，避免跨连通分量比较标签
        let mut remaining = n;
        let mut components = 0;
        for root in self.graph.vertex_ids() {
            if state.states[root.index()] == VisitState::White {
                remaining = self.visit_component(root, remaining, &mut state, &mut order);
                components += 1;
            }
        }

        debug!(
            vertices = n,
            components,
            "lex-bfs finished"
        );

        LexBfsResult {
            order,
            labels: state.labels,
        }
    }

    /// 处理 `root` 所在的连通分量，返回剩余未弹出的顶点数
    fn visit_component(
        &self,
        root: VertexId,
        mut remaining: usize,
        state: &mut LexBfsState,
        order: &mut Vec<VertexId>,
    ) -> usize {
        let mut frontier = vec![root];
        state.states[root.index()] = VisitState::Gray;

        while let Some(pos) = select_max(&frontier, &state.labels) {
            let v = frontier.remove(pos);
            remaining -= 1;
            order.push(v);
            trace!(vertex = %v, tag = remaining, "lex-bfs pop");

            for w in self.graph.neighborhood(v, Direction::Both) {
                if w == v {
                    continue;
                }
                match state.states[w.index()] {
                    VisitState::Blue => {}
                    VisitState::Gray => state.labels[w.index()].push(remaining),
                    VisitState::White => {
                        state.labels[w.index()].push(remaining);
                        state.states[w.index()] = VisitState::Gray;
                        frontier.push(w);
                    }
                }
            }

            state.states[v.index()] = VisitState::Blue;
        }

        remaining
    }
}

/// 比较两个标签
///
/// 逐位比较，第一个不同的位置决定大小；一方先结束时较短者更小。
pub fn compare_labels(a: &[usize], b: &[usize]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// 在候选中找出标签最大者的位置，并列时取最先入队的
fn select_max(frontier: &[VertexId], labels: &[Label]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in frontier.iter().enumerate() {
        match best {
            Some(b)
                if compare_labels(&labels[v.index()], &labels[frontier[b].index()])
                    != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(names: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::undirected("test");
        for name in names {
            g.insert_vertex(*name);
        }
        for (s, t) in edges {
            g.insert_edge_by_name(s, t, 0).unwrap();
        }
        g
    }

    fn names(g: &Graph, order: &[VertexId]) -> Vec<String> {
        order
            .iter()
            .map(|&v| g.vertex_name(v).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compare_labels() {
        assert_eq!(compare_labels(&[3, 2], &[3, 1]), Ordering::Greater);
        assert_eq!(compare_labels(&[2], &[3]), Ordering::Less);
        // 前缀更小
        assert_eq!(compare_labels(&[3], &[3, 1]), Ordering::Less);
        assert_eq!(compare_labels(&[], &[0]), Ordering::Less);
        assert_eq!(compare_labels(&[4, 1], &[4, 1]), Ordering::Equal);
        assert_eq!(compare_labels(&[], &[]), Ordering::Equal);
    }

    #[test]
    fn test_select_max_prefers_first_on_tie() {
        let labels: Vec<Label> = vec![
            Label::from_slice(&[3]),
            Label::from_slice(&[3]),
            Label::from_slice(&[3, 1]),
        ];
        let frontier = [VertexId::new(0), VertexId::new(1)];
        assert_eq!(select_max(&frontier, &labels), Some(0));

        let frontier = [VertexId::new(0), VertexId::new(1), VertexId::new(2)];
        assert_eq!(select_max(&frontier, &labels), Some(2));

        assert_eq!(select_max(&[], &labels), None);
    }

    #[test]
    fn test_lex_bfs_four_cycle() {
        let g = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
        );
        let result = LexBfs::new(&g).run();

        assert_eq!(names(&g, &result.order), vec!["a", "b", "d", "c"]);

        let label = |name: &str| result.labels[g.find_vertex(name).unwrap().index()].to_vec();
        assert_eq!(label("a"), Vec::<usize>::new());
        assert_eq!(label("b"), vec![3]);
        assert_eq!(label("d"), vec![3]);
        assert_eq!(label("c"), vec![2, 1]);
    }

    #[test]
    fn test_lex_bfs_prefers_greater_label() {
        // a-b, a-c, a-d, b-c：弹出 b 后 c 的标签 [3,2] 大于 d 的 [3]
        let g = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "d"), ("a", "c"), ("b", "c")],
        );
        let order = LexBfs::new(&g).order();
        assert_eq!(names(&g, &order), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_lex_bfs_components() {
        let g = build(&["a", "b", "x", "y", "z"], &[("a", "b"), ("y", "z")]);
        let order = LexBfs::new(&g).order();

        assert_eq!(names(&g, &order), vec!["a", "b", "x", "y", "z"]);
    }

    #[test]
    fn test_lex_bfs_is_permutation() {
        let g = build(
            &["a", "b", "c", "d", "e", "f"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "e"), ("e", "e"), ("f", "a")],
        );
        let mut order = LexBfs::new(&g).order();
        assert_eq!(order.len(), g.vertex_count());
        order.sort();
        order.dedup();
        assert_eq!(order.len(), g.vertex_count());
    }

    #[test]
    fn test_lex_bfs_empty_graph() {
        let g = Graph::undirected("empty");
        assert!(LexBfs::new(&g).order().is_empty());
    }
}
