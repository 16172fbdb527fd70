//! 摘要输出
//!
//! 文本模式用 `colored` 高亮标签，JSON 模式直接序列化。

use crate::algorithm::{Matching, SearchStrategy};
use crate::graph::Graph;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

/// 图的基本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub name: String,
    pub directed: bool,
    pub weighted: bool,
    pub vertices: usize,
    pub edges: usize,
}

impl GraphSummary {
    pub fn of(graph: &Graph) -> Self {
        Self {
            name: graph.name().to_string(),
            directed: graph.is_directed(),
            weighted: graph.is_weighted(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }

    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        line(&mut out, color, "名称", &self.name);
        line(
            &mut out,
            color,
            "类型",
            if self.directed { "有向" } else { "无向" },
        );
        line(
            &mut out,
            color,
            "权重",
            if self.weighted { "带权" } else { "不带权" },
        );
        line(&mut out, color, "顶点数", &self.vertices.to_string());
        line(&mut out, color, "边数", &self.edges.to_string());
        out
    }
}

/// 最大匹配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingSummary {
    pub strategy: SearchStrategy,
    pub size: usize,
    pub rounds: usize,
    /// 匹配边的端点名
    pub edges: Vec<(String, String)>,
}

impl MatchingSummary {
    pub fn of(matching: &Matching, graph: &Graph) -> Self {
        let edges = matching
            .edges
            .iter()
            .filter_map(|&id| graph.edge(id))
            .filter_map(|e| {
                Some((
                    graph.vertex_name(e.source())?.to_string(),
                    graph.vertex_name(e.target())?.to_string(),
                ))
            })
            .collect();

        Self {
            strategy: matching.strategy,
            size: matching.size(),
            rounds: matching.rounds,
            edges,
        }
    }

    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        line(&mut out, color, "搜索策略", &self.strategy.to_string());
        line(&mut out, color, "增广次数", &self.rounds.to_string());
        line(&mut out, color, "最大匹配大小", &self.size.to_string());
        out
    }
}

/// 一次运行的完整报告
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub graph: GraphSummary,
    pub dot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chordal: Option<bool>,
    pub matching: MatchingSummary,
    pub matching_dot: String,
}

impl Report {
    pub fn render(&self, color: bool) -> String {
        let mut out = self.graph.render(color);
        out.push('\n');
        out.push_str(&self.dot);

        if let Some(chordal) = self.chordal {
            out.push('\n');
            line(
                &mut out,
                color,
                "弦图",
                if chordal { "是" } else { "否" },
            );
        }

        out.push('\n');
        out.push_str(&self.matching_dot);
        out.push('\n');
        out.push_str(&self.matching.render(color));
        out
    }
}

fn line(out: &mut String, color: bool, label: &str, value: &str) {
    if color {
        let _ = writeln!(out, "{}: {}", label.bold().cyan(), value.green());
    } else {
        let _ = writeln!(out, "{}: {}", label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::MaximumMatching;

    fn path() -> Graph {
        let mut g = Graph::undirected("path");
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let c = g.insert_vertex("c");
        g.insert_edge(a, b, 0).unwrap();
        g.insert_edge(b, c, 2).unwrap();
        g.set_weighted(true);
        g
    }

    #[test]
    fn test_graph_summary_render() {
        let summary = GraphSummary::of(&path());
        assert_eq!(
            summary.render(false),
            "名称: path\n类型: 无向\n权重: 带权\n顶点数: 3\n边数: 2\n"
        );
    }

    #[test]
    fn test_matching_summary() {
        let g = path();
        let m = MaximumMatching::new(&g).run();
        let summary = MatchingSummary::of(&m, &g);

        assert_eq!(summary.size, 1);
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.edges.len(), 1);
        assert!(summary.render(false).ends_with("最大匹配大小: 1\n"));
    }

    #[test]
    fn test_summary_json() {
        let summary = GraphSummary::of(&path());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "path");
        assert_eq!(json["directed"], false);
        assert_eq!(json["vertices"], 3);
    }
}
