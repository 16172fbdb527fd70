//! 完美消去序列验证与弦图判定

use super::lex_bfs::LexBfs;
use crate::graph::{Graph, VertexId};
use crate::types::{Direction, VisitState};
use tracing::debug;

/// 完美消去序列验证器
pub struct PerfectElimination<'g> {
    graph: &'g Graph,
}

impl<'g> PerfectElimination<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 图是否为弦图
    ///
    /// Lex-BFS 顺序的逆序是完美消去序列当且仅当图是弦图。有向图恒为 false。
    pub fn is_chordal(&self) -> bool {
        if self.graph.is_directed() {
            return false;
        }
        let mut order = LexBfs::new(self.graph).order();
        order.reverse();
        self.verify(&order)
    }

    /// 检查 `order` 是否为完美消去序列
    ///
    /// 第 `i` 步用 `i` 标记 `v` 的所有邻居，找到序列中 `v` 之后第一个仍未消去的邻居 `w`，
    /// 要求 `v` 其余未消去的邻居都与 `w` 相邻，然后消去 `v`。
    /// `order` 必须恰好包含图中每个顶点一次。
    pub fn verify(&self, order: &[VertexId]) -> bool {
        if self.graph.is_directed() {
            return false;
        }
        if !self.is_permutation(order) {
            debug!(len = order.len(), "elimination order is not a vertex permutation");
            return false;
        }

        let n = self.graph.vertex_count();
        let mut tags: Vec<Option<usize>> = vec![None; n];
        let mut states = vec![VisitState::White; n];

        for (i, &v) in order.iter().enumerate() {
            let mut neighborhood_size = 0;
            for u in self.graph.neighborhood(v, Direction::Both) {
                if u == v {
                    continue;
                }
                tags[u.index()] = Some(i);
                if states[u.index()] == VisitState::White {
                    neighborhood_size += 1;
                }
            }

            let live_neighbor = |u: VertexId| {
                u != v && tags[u.index()] == Some(i) && states[u.index()] == VisitState::White
            };

            if let Some(w) = order[i..].iter().copied().find(|&w| live_neighbor(w)) {
                let shared = self
                    .graph
                    .neighborhood(w, Direction::Both)
                    .into_iter()
                    .filter(|&u| u != w && live_neighbor(u))
                    .count();

                // 减一是排除 w 本身
                if shared + 1 < neighborhood_size {
                    debug!(
                        step = i,
                        vertex = %v,
                        next = %w,
                        shared,
                        neighborhood_size,
                        "elimination step failed"
                    );
                    return false;
                }
            }

            states[v.index()] = VisitState::Blue;
        }

        true
    }

    /// 顶点集合是否两两相邻
    pub fn is_clique(&self, vertices: &[VertexId]) -> bool {
        vertices.iter().all(|&v| {
            vertices
                .iter()
                .all(|&w| v == w || self.graph.adjacent(v, w))
        })
    }

    /// 顶点的邻域是否构成团。有向图恒为 false。
    pub fn is_simplicial(&self, v: VertexId) -> bool {
        if self.graph.is_directed() {
            return false;
        }
        let neighbors: Vec<VertexId> = self
            .graph
            .neighborhood(v, Direction::Both)
            .into_iter()
            .filter(|&u| u != v)
            .collect();
        self.is_clique(&neighbors)
    }

    fn is_permutation(&self, order: &[VertexId]) -> bool {
        let n = self.graph.vertex_count();
        if order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for v in order {
            match seen.get_mut(v.index()) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}
