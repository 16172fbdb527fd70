//! DOT 读取器
//!
//! 支持的子集：`[strict] (graph|digraph) [ID] { ... }`，节点语句、边链
//! （`a -- b -- c` / `a -> b`）、属性列表、`graph|node|edge [...]` 默认属性、
//! 顶层 `k = v` 赋值，以及 `//`、`/* */`、`#` 注释。不支持子图和端口。

use super::WEIGHT_ATTRIBUTE;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::types::{Weight, DEFAULT_WEIGHT};
use indexmap::{IndexMap, IndexSet};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// 解析出的一条边声明
#[derive(Debug, Clone)]
struct EdgeDecl {
    source: String,
    target: String,
    weight: Weight,
}

/// 从字符串读取图
pub fn read_graph(input: &str) -> Result<Graph> {
    DotReader::new(input).parse()
}

/// 从任意 reader 读取图
pub fn read_from<R: Read>(mut reader: R) -> Result<Graph> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    read_graph(&input)
}

/// 从文件读取图
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let input = fs::read_to_string(path)?;
    read_graph(&input)
}

/// DOT 读取器
pub struct DotReader {
    input: String,
    pos: usize,
    directed: bool,
    nodes: IndexSet<String>,
    /// 去重键 -> 第一次声明
    edges: IndexMap<(String, String), EdgeDecl>,
    default_weight: Weight,
}

impl DotReader {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            pos: 0,
            directed: false,
            nodes: IndexSet::new(),
            edges: IndexMap::new(),
            default_weight: DEFAULT_WEIGHT,
        }
    }

    /// 解析整个输入并构建图：先插入所有顶点，再插入去重后的边
    pub fn parse(mut self) -> Result<Graph> {
        self.try_keyword("strict");
        self.directed = if self.try_keyword("digraph") {
            true
        } else if self.try_keyword("graph") {
            false
        } else {
            return Err(self.error("应为 'graph' 或 'digraph'"));
        };

        self.skip_whitespace();
        let name = if self.peek_char_is('{') {
            String::new()
        } else {
            self.parse_id()?
        };

        self.expect_char('{')?;
        self.parse_stmt_list()?;
        self.expect_char('}')?;

        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error("图定义之后有多余的内容"));
        }

        self.build(name)
    }

    fn build(self, name: String) -> Result<Graph> {
        let mut graph = Graph::new(name, self.directed);
        for node in &self.nodes {
            graph.insert_vertex(node.as_str());
        }

        // 顶点按 `nodes` 的顺序插入，下标即顶点 ID
        let resolve = |name: &str| {
            self.nodes
                .get_index_of(name)
                .map(VertexId::new)
                .ok_or_else(|| Error::VertexNotFound(name.to_string()))
        };

        let mut weighted = false;
        for decl in self.edges.values() {
            graph.insert_edge(resolve(&decl.source)?, resolve(&decl.target)?, decl.weight)?;
            weighted |= decl.weight != DEFAULT_WEIGHT;
        }
        graph.set_weighted(weighted);

        debug!(
            name = graph.name(),
            directed = graph.is_directed(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "dot graph loaded"
        );
        Ok(graph)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_stmt_list(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.peek_char_is('}') || self.pos >= self.input.len() {
                return Ok(());
            }
            self.parse_stmt()?;
            self.try_char(';');
        }
    }

    fn parse_stmt(&mut self) -> Result<()> {
        if self.try_keyword("graph") || self.try_keyword("node") {
            self.parse_attr_lists()?;
            return Ok(());
        }
        if self.try_keyword("edge") {
            let attrs = self.parse_attr_lists()?;
            if let Some(weight) = attrs.get(WEIGHT_ATTRIBUTE) {
                self.default_weight = parse_weight(weight)?;
            }
            return Ok(());
        }
        if self.try_keyword("subgraph") || self.peek_char_is('{') {
            return Err(self.error("不支持子图"));
        }

        let first = self.parse_id()?;
        if self.try_char('=') {
            // 顶层图属性，忽略
            self.parse_id()?;
            return Ok(());
        }

        self.nodes.insert(first.clone());
        let mut chain = vec![first];
        while let Some(directed_op) = self.try_edge_op() {
            if directed_op != self.directed {
                let op = if directed_op { "->" } else { "--" };
                return Err(self.error(&format!("边运算符 '{}' 与图类型不符", op)));
            }
            let next = self.parse_id()?;
            self.nodes.insert(next.clone());
            chain.push(next);
        }

        let attrs = self.parse_attr_lists()?;
        if chain.len() > 1 {
            let weight = match attrs.get(WEIGHT_ATTRIBUTE) {
                Some(value) => parse_weight(value)?,
                None => self.default_weight,
            };
            for pair in chain.windows(2) {
                self.add_edge(&pair[0], &pair[1], weight);
            }
        }

        Ok(())
    }

    /// 记录一条边；无向图按无序端点对去重，有向图按有序对去重
    fn add_edge(&mut self, source: &str, target: &str, weight: Weight) {
        let key = if self.directed || source <= target {
            (source.to_string(), target.to_string())
        } else {
            (target.to_string(), source.to_string())
        };

        if self.edges.contains_key(&key) {
            warn!(source, target, "duplicate edge ignored");
            return;
        }
        self.edges.insert(
            key,
            EdgeDecl {
                source: source.to_string(),
                target: target.to_string(),
                weight,
            },
        );
    }

    /// 一个或多个 `[k=v, ...]` 属性列表
    fn parse_attr_lists(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();
        while self.try_char('[') {
            loop {
                if self.try_char(']') {
                    break;
                }
                let key = self.parse_id()?;
                self.expect_char('=')?;
                let value = self.parse_id()?;
                attrs.insert(key, value);
                if !self.try_char(',') {
                    self.try_char(';');
                }
            }
        }
        Ok(attrs)
    }

    /// `--` 返回 Some(false)，`->` 返回 Some(true)
    fn try_edge_op(&mut self) -> Option<bool> {
        if self.try_str("--") {
            Some(false)
        } else if self.try_str("->") {
            Some(true)
        } else {
            None
        }
    }

    // ========================================================================
    // IDs
    // ========================================================================

    fn parse_id(&mut self) -> Result<String> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('"') => self.parse_quoted(),
            Some(c) if c.is_alphabetic() || c == '_' => Ok(self.parse_identifier()),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.parse_numeral(),
            Some('<') => Err(self.error("不支持 HTML 字符串")),
            Some(c) => Err(self.error(&format!("应为标识符，实际为 '{}'", c))),
            None => Err(self.error("应为标识符，实际已到输入末尾")),
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_numeral(&mut self) -> Result<String> {
        let start = self.pos;
        if self.peek_char_is('-') {
            self.pos += 1;
        }
        let mut digits = 0;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                digits += 1;
                self.pos += 1;
            } else if c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if digits == 0 {
            self.pos = start;
            return Err(self.error("无效的数字"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// 双引号字符串，支持 `\"`、`\\`、行尾续行以及 `"a" + "b"` 拼接
    fn parse_quoted(&mut self) -> Result<String> {
        let mut result = String::new();
        loop {
            let start = self.pos;
            self.pos += 1;
            let mut closed = false;
            while let Some(c) = self.peek_char() {
                self.pos += c.len_utf8();
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match self.peek_char() {
                        Some(escaped @ ('"' | '\\')) => {
                            self.pos += 1;
                            result.push(escaped);
                        }
                        Some('\n') => self.pos += 1,
                        _ => result.push('\\'),
                    },
                    _ => result.push(c),
                }
            }
            if !closed {
                self.pos = start;
                return Err(self.error("字符串未闭合"));
            }

            let before_plus = self.pos;
            if self.try_char('+') {
                self.skip_whitespace();
                if self.peek_char_is('"') {
                    continue;
                }
            }
            self.pos = before_plus;
            return Ok(result);
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else if self.peek_str("//") || (c == '#' && self.at_line_start()) {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
            } else if self.peek_str("/*") {
                match self.input[self.pos + 2..].find("*/") {
                    Some(end) => self.pos += 2 + end + 2,
                    None => self.pos = self.input.len(),
                }
            } else {
                break;
            }
        }
    }

    fn at_line_start(&self) -> bool {
        self.input[..self.pos]
            .chars()
            .rev()
            .take_while(|&c| c != '\n')
            .all(char::is_whitespace)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_is(&self, c: char) -> bool {
        self.peek_char() == Some(c)
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn try_char(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek_char() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, c: char) -> Result<()> {
        if self.try_char(c) {
            Ok(())
        } else {
            let found = self
                .peek_char()
                .map(|f| format!("'{}'", f))
                .unwrap_or_else(|| "输入末尾".to_string());
            Err(self.error(&format!("应为 '{}'，实际为 {}", c, found)))
        }
    }

    fn try_str(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.peek_str(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// 大小写不敏感的关键字，后面不能紧跟标识符字符
    fn try_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let end = self.pos + keyword.len();
        let Some(slice) = self.input.get(self.pos..end) else {
            return false;
        };
        if !slice.eq_ignore_ascii_case(keyword) {
            return false;
        }
        match self.input[end..].chars().next() {
            Some(next) if next.is_alphanumeric() || next == '_' => false,
            _ => {
                self.pos = end;
                true
            }
        }
    }

    fn error(&self, message: &str) -> Error {
        let consumed = &self.input[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0)
            + 1;
        Error::Parse {
            line,
            column,
            message: message.to_string(),
        }
    }
}

fn parse_weight(value: &str) -> Result<Weight> {
    value
        .trim()
        .parse::<Weight>()
        .map_err(|_| Error::InvalidWeight(format!("{}={}", WEIGHT_ATTRIBUTE, value)))
}
