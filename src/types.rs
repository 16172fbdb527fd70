//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 边权重
pub type Weight = i64;

/// 未指定权重时的默认值
pub const DEFAULT_WEIGHT: Weight = 0;

/// 遍历方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Both
    }
}

/// 顶点在算法中的状态（颜色）
///
/// 各算法在自己的上下文中维护，从不写回顶点本身。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitState {
    /// 尚未发现
    White,
    /// 已发现、待处理
    Gray,
    /// 已处理（或已消去）
    Blue,
}

impl Default for VisitState {
    fn default() -> Self {
        VisitState::White
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VisitState::White => "white",
            VisitState::Gray => "gray",
            VisitState::Blue => "blue",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Direction::default(), Direction::Both);
        assert_eq!(VisitState::default(), VisitState::White);
        assert_eq!(DEFAULT_WEIGHT, 0);
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&Direction::Incoming).unwrap();
        assert_eq!(json, "\"Incoming\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Incoming);
    }
}
