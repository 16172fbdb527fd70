//! 图算法模块
//!
//! 包含字典序广度优先搜索、弦图判定和最大匹配算法。
//! 各算法只借用图的不可变引用，运行状态保存在各自的上下文中。

mod elimination;
mod lex_bfs;
mod matching;

pub use elimination::PerfectElimination;
pub use lex_bfs::{compare_labels, Label, LexBfs, LexBfsResult};
pub use matching::{
    Matching, MatchingState, MaximumMatching, SearchStrategy, MATCHING_GRAPH_NAME,
};
