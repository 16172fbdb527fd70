//! 最大匹配算法
//!
//! 反复寻找增广路并翻转路上每条边的匹配状态，直到从任何未覆盖顶点出发都找不到增广路。
//! 没有花（blossom）收缩，只保证在二分图和森林上得到最大匹配；
//! 一般图上得到的是一个合法但不一定最大的匹配。

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// 匹配结果图的名字
pub const MATCHING_GRAPH_NAME: &str = "Max Matching";

/// 增广路搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// 交错深度优先搜索
    #[default]
    Dfs,
    /// 从起点生长交错树，每次扩展一条边界边
    FrontierTree,
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfs" => Ok(SearchStrategy::Dfs),
            "frontier" | "frontier-tree" | "tree" => Ok(SearchStrategy::FrontierTree),
            _ => Err(format!("未知的搜索策略: {}", s)),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Dfs => write!(f, "dfs"),
            SearchStrategy::FrontierTree => write!(f, "frontier"),
        }
    }
}

/// DFS 栈帧
struct Frame {
    vertex: VertexId,
    /// 下一条边须处于的匹配状态
    want_matched: bool,
    /// 在 出边++入边 中的下一个位置
    cursor: usize,
}

/// 匹配过程的状态：边是否在匹配中、顶点是否被覆盖，以及搜索用的标记
pub struct MatchingState<'g> {
    graph: &'g Graph,
    strategy: SearchStrategy,
    matched: Vec<bool>,
    covered: Vec<bool>,
    visited: Vec<bool>,
    in_tree: Vec<bool>,
}

impl<'g> MatchingState<'g> {
    /// 空匹配
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            strategy: SearchStrategy::default(),
            matched: vec![false; graph.edge_count()],
            covered: vec![false; n],
            visited: vec![false; n],
            in_tree: vec![false; n],
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn is_matched(&self, edge: EdgeId) -> bool {
        self.matched.get(edge.index()).copied().unwrap_or(false)
    }

    pub fn is_covered(&self, vertex: VertexId) -> bool {
        self.covered.get(vertex.index()).copied().unwrap_or(false)
    }

    /// 当前匹配中的边（按边 ID 顺序）
    pub fn matched_edges(&self) -> Vec<EdgeId> {
        self.graph
            .edges()
            .iter()
            .map(|e| e.id())
            .filter(|&e| self.is_matched(e))
            .collect()
    }

    /// 当前被覆盖的顶点（按顶点插入顺序）
    pub fn covered_vertices(&self) -> Vec<VertexId> {
        self.graph
            .vertex_ids()
            .filter(|&v| self.is_covered(v))
            .collect()
    }

    /// 寻找一条增广路
    ///
    /// 依次尝试每个未覆盖顶点，返回第一条找到的路径，边按从起点向外的顺序排列。
    /// 起点在搜索前即标记为已访问，所以不会返回长度为零的路径。
    pub fn find_augmenting_path(&mut self) -> Option<Vec<EdgeId>> {
        for root in self.graph.vertex_ids() {
            if self.covered[root.index()] {
                continue;
            }
            let path = match self.strategy {
                SearchStrategy::Dfs => self.search_from(root),
                SearchStrategy::FrontierTree => self.grow_tree_from(root),
            };
            if let Some(path) = path {
                trace!(root = %root, len = path.len(), "augmenting path found");
                return Some(path);
            }
        }
        None
    }

    /// 沿路径翻转匹配状态，并标记路上的端点为已覆盖
    pub fn flip(&mut self, path: &[EdgeId]) {
        for &id in path {
            let Some(edge) = self.graph.edge(id) else {
                continue;
            };
            self.matched[id.index()] = !self.matched[id.index()];
            self.covered[edge.source().index()] = true;
            self.covered[edge.target().index()] = true;
        }
    }

    /// 转换为匹配结果
    pub fn into_matching(self, rounds: usize) -> Matching {
        Matching {
            edges: self.matched_edges(),
            covered: self.covered_vertices(),
            rounds,
            strategy: self.strategy,
        }
    }

    // ==================== 交错 DFS ====================

    /// 显式栈的交错 DFS。第一条边必须不在匹配中，之后交替；
    /// 到达一个未覆盖且未访问的顶点即找到增广路。
    fn search_from(&mut self, root: VertexId) -> Option<Vec<EdgeId>> {
        self.visited.iter_mut().for_each(|f| *f = false);
        self.visited[root.index()] = true;

        let mut stack = vec![Frame {
            vertex: root,
            want_matched: false,
            cursor: 0,
        }];
        let mut path: Vec<EdgeId> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            match self.next_candidate(frame) {
                Some((edge, w)) => {
                    path.push(edge);
                    if !self.covered[w.index()] {
                        return Some(path);
                    }
                    self.visited[w.index()] = true;
                    let want_matched = !frame.want_matched;
                    stack.push(Frame {
                        vertex: w,
                        want_matched,
                        cursor: 0,
                    });
                }
                None => {
                    stack.pop();
                    path.pop();
                }
            }
        }

        None
    }

    /// 从栈帧的游标处继续，找下一条匹配状态符合且对端未访问的边（先出边后入边）
    fn next_candidate(&self, frame: &mut Frame) -> Option<(EdgeId, VertexId)> {
        let vertex = self.graph.vertex(frame.vertex)?;
        let outgoing = vertex.outgoing();
        let incoming = vertex.incoming();

        while frame.cursor < outgoing.len() + incoming.len() {
            let (id, via_outgoing) = if frame.cursor < outgoing.len() {
                (outgoing[frame.cursor], true)
            } else {
                (incoming[frame.cursor - outgoing.len()], false)
            };
            frame.cursor += 1;

            if self.matched[id.index()] != frame.want_matched {
                continue;
            }
            let Some(edge) = self.graph.edge(id) else {
                continue;
            };
            let w = if via_outgoing {
                edge.target()
            } else {
                edge.source()
            };
            if !self.visited[w.index()] {
                return Some((id, w));
            }
        }

        None
    }

    // ==================== 交错树 ====================

    /// 从 `root` 生长交错树：外层顶点经非匹配边扩展到树外顶点 `w`，
    /// `w` 未覆盖则找到增广路，否则把 `w` 和它的配偶一起加入树中。
    fn grow_tree_from(&mut self, root: VertexId) -> Option<Vec<EdgeId>> {
        let n = self.graph.vertex_count();
        self.in_tree.iter_mut().for_each(|f| *f = false);
        let mut outer = vec![false; n];
        let mut parent: Vec<Option<EdgeId>> = vec![None; n];

        self.in_tree[root.index()] = true;
        outer[root.index()] = true;

        while let Some((edge, w)) = self.frontier_edge(&outer) {
            self.in_tree[w.index()] = true;
            parent[w.index()] = Some(edge);

            if !self.covered[w.index()] {
                return Some(self.tree_path(w, &parent));
            }

            let Some((mate_edge, mate)) = self.mate(w) else {
                continue;
            };
            if self.in_tree[mate.index()] {
                continue;
            }
            self.in_tree[mate.index()] = true;
            outer[mate.index()] = true;
            parent[mate.index()] = Some(mate_edge);
        }

        None
    }

    /// 第一条边界边：一端是外层树顶点，另一端不在树中，且边不在匹配中
    fn frontier_edge(&self, outer: &[bool]) -> Option<(EdgeId, VertexId)> {
        for u in self.graph.vertex_ids() {
            if !outer[u.index()] {
                continue;
            }
            for (edge, w) in self.graph.incident(u) {
                if w != u && !self.in_tree[w.index()] && !self.matched[edge.id().index()] {
                    return Some((edge.id(), w));
                }
            }
        }
        None
    }

    /// 覆盖顶点 `w` 的匹配边及其另一端
    fn mate(&self, w: VertexId) -> Option<(EdgeId, VertexId)> {
        self.graph
            .incident(w)
            .find(|(edge, other)| *other != w && self.matched[edge.id().index()])
            .map(|(edge, other)| (edge.id(), other))
    }

    /// 沿父边从 `end` 回溯到根，返回从根出发的路径
    fn tree_path(&self, end: VertexId, parent: &[Option<EdgeId>]) -> Vec<EdgeId> {
        let mut path = Vec::new();
        let mut current = end;
        while let Some(edge) = parent[current.index()] {
            path.push(edge);
            match self.graph.opposite(edge, current) {
                Some(prev) => current = prev,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// 匹配结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matching {
    /// 匹配边（按边 ID 顺序）
    pub edges: Vec<EdgeId>,
    /// 被覆盖的顶点（按顶点插入顺序）
    pub covered: Vec<VertexId>,
    /// 增广次数
    pub rounds: usize,
    /// 使用的搜索策略
    pub strategy: SearchStrategy,
}

impl Matching {
    /// 匹配大小（边数）
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    /// 把匹配物化为一张新图：包含所有被覆盖的顶点和所有匹配边，端点按名字重新解析
    pub fn to_graph(&self, source: &Graph) -> Result<Graph> {
        let mut result = Graph::new(MATCHING_GRAPH_NAME, source.is_directed());

        for &v in &self.covered {
            let name = source
                .vertex_name(v)
                .ok_or_else(|| Error::VertexNotFound(v.to_string()))?;
            result.insert_vertex(name);
        }

        let mut weighted = false;
        for &id in &self.edges {
            let edge = source
                .edge(id)
                .ok_or_else(|| Error::EdgeNotFound(id.to_string()))?;
            let endpoint = |v: VertexId| {
                source
                    .vertex_name(v)
                    .ok_or_else(|| Error::VertexNotFound(v.to_string()))
            };
            result.insert_edge_by_name(
                endpoint(edge.source())?,
                endpoint(edge.target())?,
                edge.weight(),
            )?;
            weighted |= edge.weight() != 0;
        }
        result.set_weighted(weighted);

        Ok(result)
    }
}

/// 最大匹配
pub struct MaximumMatching<'g> {
    graph: &'g Graph,
    strategy: SearchStrategy,
}

impl<'g> MaximumMatching<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// 反复增广直到找不到增广路
    pub fn run(&self) -> Matching {
        let mut state = MatchingState::new(self.graph).with_strategy(self.strategy);
        let mut rounds = 0;

        while let Some(path) = state.find_augmenting_path() {
            state.flip(&path);
            rounds += 1;
            trace!(round = rounds, len = path.len(), "augmented");
        }

        let matching = state.into_matching(rounds);
        debug!(
            size = matching.size(),
            rounds,
            strategy = %self.strategy,
            "maximum matching finished"
        );
        matching
    }

    /// 计算匹配并物化为新图
    pub fn to_graph(&self) -> Result<Graph> {
        self.run().to_graph(self.graph)
    }
}
