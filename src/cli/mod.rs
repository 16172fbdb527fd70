//! 命令行驱动
//!
//! 读入一张图，输出摘要和 DOT 文本，然后计算并输出最大匹配。
//! 二进制 `lexgraph-cli` 只负责参数解析和日志初始化，其余都在这里。

mod summary;

pub use summary::{GraphSummary, MatchingSummary, Report};

use crate::algorithm::{MaximumMatching, PerfectElimination, SearchStrategy};
use crate::dot;
use crate::error::Result;
use tracing::info;

/// 运行选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 额外输出弦图判定
    pub chordal: bool,
    pub strategy: SearchStrategy,
    /// 以 JSON 输出报告
    pub json: bool,
    /// 文本模式下是否着色
    pub color: bool,
}

/// 解析输入并生成报告
pub fn report(input: &str, options: &RunOptions) -> Result<Report> {
    let graph = dot::read_graph(input)?;
    info!(
        name = graph.name(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let chordal = options
        .chordal
        .then(|| PerfectElimination::new(&graph).is_chordal());

    let matching = MaximumMatching::new(&graph)
        .with_strategy(options.strategy)
        .run();
    let matching_graph = matching.to_graph(&graph)?;

    Ok(Report {
        graph: GraphSummary::of(&graph),
        dot: dot::to_dot_string(&graph),
        chordal,
        matching: MatchingSummary::of(&matching, &graph),
        matching_dot: dot::to_dot_string(&matching_graph),
    })
}

/// 生成标准输出的全部内容
pub fn run(input: &str, options: &RunOptions) -> Result<String> {
    let report = report(input, options)?;
    if options.json {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(report.render(options.color))
    }
}
