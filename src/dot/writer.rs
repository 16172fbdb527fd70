//! DOT 写出器

use super::WEIGHT_ATTRIBUTE;
use crate::error::Result;
use crate::graph::Graph;
use crate::types::DEFAULT_WEIGHT;
use std::fmt::Write as _;
use std::io::Write;

const INDENT: &str = "   ";

/// 把图写到任意 writer
pub fn write_graph<W: Write>(graph: &Graph, mut out: W) -> Result<()> {
    out.write_all(to_dot_string(graph).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// 把图格式化为 DOT 文本
///
/// 先列出所有顶点，再按顶点插入顺序沿各自的入边列表输出边，
/// 每条边恰好输出一次。权重为 0 的边不写 `peso` 属性。
pub fn to_dot_string(graph: &Graph) -> String {
    let (kind, op) = if graph.is_directed() {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };

    let mut dot = String::new();
    let _ = writeln!(dot, "strict {} {} {{", kind, quote(graph.name()));

    dot.push('\n');
    for v in graph.vertices() {
        let _ = writeln!(dot, "{}{}", INDENT, quote(v.name()));
    }

    if graph.edge_count() > 0 {
        dot.push('\n');
    }
    for v in graph.vertices() {
        for edge in graph.incoming_edges(v.id()) {
            let (Some(source), Some(target)) = (
                graph.vertex_name(edge.source()),
                graph.vertex_name(edge.target()),
            ) else {
                continue;
            };
            let _ = write!(dot, "{}{} {} {}", INDENT, quote(source), op, quote(target));
            if edge.weight() != DEFAULT_WEIGHT {
                let _ = write!(dot, " [{}={}]", WEIGHT_ATTRIBUTE, edge.weight());
            }
            dot.push('\n');
        }
    }

    dot.push_str("}\n");
    dot
}

fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::read_graph;

    #[test]
    fn test_write_undirected() {
        let mut g = Graph::undirected("demo");
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let c = g.insert_vertex("c");
        g.insert_edge(a, b, 3).unwrap();
        g.insert_edge(c, b, 0).unwrap();

        let expected = "strict graph \"demo\" {\n\
                        \n   \"a\"\n   \"b\"\n   \"c\"\n\
                        \n   \"a\" -- \"b\" [peso=3]\n   \"c\" -- \"b\"\n}\n";
        assert_eq!(to_dot_string(&g), expected);
    }

    #[test]
    fn test_write_directed_follows_incoming_lists() {
        let mut g = Graph::directed("d");
        let x = g.insert_vertex("x");
        let y = g.insert_vertex("y");
        g.insert_edge(y, x, 0).unwrap();
        g.insert_edge(x, y, -2).unwrap();

        let dot = to_dot_string(&g);
        assert!(dot.starts_with("strict digraph \"d\" {"));
        // x 的入边先输出
        let first = dot.find("\"y\" -> \"x\"").unwrap();
        let second = dot.find("\"x\" -> \"y\" [peso=-2]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_escape_names() {
        let mut g = Graph::undirected("say \"hi\"");
        g.insert_vertex("back\\slash");

        let dot = to_dot_string(&g);
        assert!(dot.contains("\"say \\\"hi\\\"\""));
        assert!(dot.contains("\"back\\\\slash\""));

        let back = read_graph(&dot).unwrap();
        assert_eq!(back.name(), "say \"hi\"");
        assert_eq!(back.vertices()[0].name(), "back\\slash");
    }

    #[test]
    fn test_write_empty_graph() {
        let g = Graph::undirected("");
        assert_eq!(to_dot_string(&g), "strict graph \"\" {\n\n}\n");
        assert_eq!(read_graph(&to_dot_string(&g)).unwrap().vertex_count(), 0);
    }

    #[test]
    fn test_write_graph_to_writer() {
        let mut g = Graph::undirected("w");
        g.insert_vertex("only");

        let mut buf = Vec::new();
        write_graph(&g, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_dot_string(&g));
    }
}
