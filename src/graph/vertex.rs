//! 顶点定义

use crate::graph::edge::EdgeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内顶点数组的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 顶点
///
/// 出边和入边列表只保存边 ID，边本身归图的边数组所有。
/// 无向边 `a -- b` 只出现在 `a` 的出边列表和 `b` 的入边列表中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 顶点名（查找用的键）
    name: String,
    /// 出边
    outgoing: Vec<EdgeId>,
    /// 入边
    incoming: Vec<EdgeId>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取顶点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取出边
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// 获取入边
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub(crate) fn push_outgoing(&mut self, edge: EdgeId) {
        self.outgoing.push(edge);
    }

    pub(crate) fn push_incoming(&mut self, edge: EdgeId) {
        self.incoming.push(edge);
    }
}
