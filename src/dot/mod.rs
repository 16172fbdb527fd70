//! DOT 格式交换
//!
//! 读取 DOT 的一个子集并以固定格式写回。边权保存在 `peso` 属性中。

mod reader;
mod writer;

pub use reader::{read_file, read_from, read_graph, DotReader};
pub use writer::{to_dot_string, write_graph};

/// 边权属性名
pub const WEIGHT_ATTRIBUTE: &str = "peso";
