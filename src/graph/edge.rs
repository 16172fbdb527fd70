//! 边定义

use crate::graph::vertex::VertexId;
use crate::types::{Weight, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（图内边数组的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源顶点
    source: VertexId,
    /// 目标顶点
    target: VertexId,
    /// 权重
    weight: Weight,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, weight: Weight) -> Self {
        Self {
            id,
            source,
            target,
            weight,
        }
    }

    /// 创建默认权重的边
    pub fn unweighted(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self::new(id, source, target, DEFAULT_WEIGHT)
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源顶点
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 获取目标顶点
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// 获取权重
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// 是否为自环
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// 给定一个端点，返回另一个端点；`v` 不是端点时返回 None
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.source {
            Some(self.target)
        } else if v == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}
