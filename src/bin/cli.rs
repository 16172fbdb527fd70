//! lexgraph 命令行工具
//!
//! 从标准输入或文件读取 DOT 图，输出摘要、DOT 文本和最大匹配

use anyhow::Context;
use clap::Parser;
use lexgraph::algorithm::SearchStrategy;
use lexgraph::cli::{self, RunOptions};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lexgraph-cli")]
#[command(about = "lexgraph 图算法命令行工具", version)]
struct Args {
    /// 输入文件路径（默认读取标准输入）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出弦图判定结果
    #[arg(short, long)]
    chordal: bool,

    /// 增广路搜索策略: dfs, frontier
    #[arg(short, long, default_value = "dfs")]
    strategy: SearchStrategy,

    /// 以 JSON 格式输出
    #[arg(long)]
    json: bool,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("无法读取输入文件 {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("无法读取标准输入")?;
            buf
        }
    };

    let options = RunOptions {
        chordal: args.chordal,
        strategy: args.strategy,
        json: args.json,
        color: io::stdout().is_terminal(),
    };
    let output = cli::run(&input, &options).context("加载图失败")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
