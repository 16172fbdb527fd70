//! lexgraph - 基于字典序广度优先搜索的图算法库
//!
//! 提供：
//! - 以顶点名索引的有向/无向图存储
//! - Lex-BFS 与完美消去序列（弦图判定）
//! - 基于增广路的最大匹配
//! - DOT 格式的读写

pub mod algorithm;
pub mod cli;
pub mod dot;
pub mod error;
pub mod graph;
pub mod types;

// 重导出常用类型
pub use algorithm::{LexBfs, Matching, MaximumMatching, PerfectElimination, SearchStrategy};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use types::{Direction, VisitState, Weight};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
