//! 图数据结构
//!
//! 顶点和边分别存放在两个数组中，ID 即下标。顶点的出边/入边列表只保存边 ID，
//! 因此一条边只有一个所有者（边数组），不存在重复释放或悬垂引用。

use super::edge::{Edge, EdgeId};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use crate::types::{Direction, Weight};
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::trace;

/// 内存图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// 图名
    name: String,
    /// 是否有向
    directed: bool,
    /// 是否带权
    weighted: bool,
    /// 顶点（插入顺序即遍历顺序）
    vertices: Vec<Vertex>,
    /// 边
    edges: Vec<Edge>,
}

impl Graph {
    /// 创建空图
    pub fn new(name: impl Into<String>, directed: bool) -> Self {
        Self {
            name: name.into(),
            directed,
            ..Self::default()
        }
    }

    /// 创建空的无向图
    pub fn undirected(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// 创建空的有向图
    pub fn directed(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// 不检查重名：重名顶点可以插入，但 `find_vertex` 只会找到第一个。
    pub fn insert_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        let vertex = Vertex::new(id, name);
        trace!(vertex = %id, name = vertex.name(), "insert vertex");
        self.vertices.push(vertex);
        id
    }

    /// 按名字查找顶点（线性扫描，重名时返回第一个）
    pub fn find_vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.name() == name)
            .map(|v| v.id())
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// 获取顶点名
    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.vertex(id).map(|v| v.name())
    }

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// 所有顶点 ID（插入顺序）
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|v| v.id())
    }

    /// 是否包含该顶点
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 边追加到 `source` 的出边列表和 `target` 的入边列表。不做去重。
    pub fn insert_edge(&mut self, source: VertexId, target: VertexId, weight: Weight) -> Result<EdgeId> {
        if !self.contains_vertex(source) {
            return Err(Error::VertexNotFound(format!("源顶点 {} 不存在", source)));
        }
        if !self.contains_vertex(target) {
            return Err(Error::VertexNotFound(format!("目标顶点 {} 不存在", target)));
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge::new(id, source, target, weight));
        self.vertices[source.index()].push_outgoing(id);
        self.vertices[target.index()].push_incoming(id);
        trace!(edge = %id, %source, %target, weight, "insert edge");

        Ok(id)
    }

    /// 按顶点名添加边
    pub fn insert_edge_by_name(&mut self, source: &str, target: &str, weight: Weight) -> Result<EdgeId> {
        let s = self
            .find_vertex(source)
            .ok_or_else(|| Error::VertexNotFound(source.to_string()))?;
        let t = self
            .find_vertex(target)
            .ok_or_else(|| Error::VertexNotFound(target.to_string()))?;
        self.insert_edge(s, t, weight)
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 获取顶点的所有出边
    pub fn outgoing_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertex(id)
            .map(|v| v.outgoing())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&e| self.edge(e))
    }

    /// 获取顶点的所有入边
    pub fn incoming_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertex(id)
            .map(|v| v.incoming())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&e| self.edge(e))
    }

    /// 与顶点关联的所有边及对端：先出边，再入边
    pub fn incident(&self, id: VertexId) -> impl Iterator<Item = (&Edge, VertexId)> + '_ {
        self.outgoing_edges(id)
            .map(|e| (e, e.target()))
            .chain(self.incoming_edges(id).map(|e| (e, e.source())))
    }

    // ==================== 邻居查询 ====================

    /// 顶点的度
    ///
    /// 无向图中每条边只存一个方向，所以 `Both` 返回 `2 × |入边|`；
    /// 有向图的 `Both` 是入度与出度之和。
    pub fn degree(&self, id: VertexId, direction: Direction) -> usize {
        let Some(v) = self.vertex(id) else {
            return 0;
        };
        match direction {
            Direction::Incoming => v.incoming().len(),
            Direction::Outgoing => v.outgoing().len(),
            Direction::Both if self.directed => v.incoming().len() + v.outgoing().len(),
            Direction::Both => 2 * v.incoming().len(),
        }
    }

    /// 顶点的邻域（去重，保持首次出现的顺序）
    pub fn neighborhood(&self, id: VertexId, direction: Direction) -> IndexSet<VertexId> {
        let mut result = IndexSet::new();
        if matches!(direction, Direction::Outgoing | Direction::Both) {
            result.extend(self.outgoing_edges(id).map(|e| e.target()));
        }
        if matches!(direction, Direction::Incoming | Direction::Both) {
            result.extend(self.incoming_edges(id).map(|e| e.source()));
        }
        result
    }

    /// 两个不同顶点之间是否有边（任一方向）
    ///
    /// `adjacent(v, v)` 恒为 false，即使存在自环。
    pub fn adjacent(&self, v: VertexId, w: VertexId) -> bool {
        if v == w {
            return false;
        }
        self.incident(v).any(|(_, other)| other == w)
    }

    /// 给定边和一个端点，返回另一个端点
    pub fn opposite(&self, edge: EdgeId, v: VertexId) -> Option<VertexId> {
        self.edge(edge)?.opposite(v)
    }

    // ==================== 复制 ====================

    /// 完整复制
    pub fn copy_graph(&self) -> Result<Graph> {
        self.copy_subgraph(&[])
    }

    /// 复制子图：跳过 `excluded` 中列出名字的顶点以及与它们关联的边
    ///
    /// 边的端点在新图中按名字重新解析，不会携带原图的顶点 ID。
    pub fn copy_subgraph(&self, excluded: &[&str]) -> Result<Graph> {
        let excluded: HashSet<&str> = excluded.iter().copied().collect();
        let mut copy = Graph::new(self.name.clone(), self.directed);
        copy.weighted = self.weighted;

        for v in &self.vertices {
            if !excluded.contains(v.name()) {
                copy.insert_vertex(v.name());
            }
        }

        for v in &self.vertices {
            for edge in self.outgoing_edges(v.id()) {
                let source = &self.vertices[edge.source().index()];
                let target = &self.vertices[edge.target().index()];
                if excluded.contains(source.name()) || excluded.contains(target.name()) {
                    continue;
                }
                copy.insert_edge_by_name(source.name(), target.name(), edge.weight())?;
            }
        }

        Ok(copy)
    }
}
