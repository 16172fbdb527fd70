//! DOT reader/writer round trips and file input.

use std::collections::BTreeSet;
use std::io::Write;

use tempfile::NamedTempFile;

use lexgraph::algorithm::{MaximumMatching, MATCHING_GRAPH_NAME};
use lexgraph::dot;
use lexgraph::graph::Graph;
use lexgraph::{Error, Weight};

/// 无向边按无序端点对比较
fn edge_set(g: &Graph) -> BTreeSet<(String, String, Weight)> {
    g.edges()
        .iter()
        .map(|e| {
            let s = g.vertex_name(e.source()).unwrap().to_string();
            let t = g.vertex_name(e.target()).unwrap().to_string();
            if g.is_directed() || s <= t {
                (s, t, e.weight())
            } else {
                (t, s, e.weight())
            }
        })
        .collect()
}

fn vertex_names(g: &Graph) -> Vec<String> {
    g.vertices().iter().map(|v| v.name().to_string()).collect()
}

fn assert_same_graph(a: &Graph, b: &Graph) {
    assert_eq!(a.name(), b.name());
    assert_eq!(a.is_directed(), b.is_directed());
    assert_eq!(a.is_weighted(), b.is_weighted());
    assert_eq!(vertex_names(a), vertex_names(b));
    assert_eq!(edge_set(a), edge_set(b));
}

const UNDIRECTED: &str = r#"
graph "road map" {
    edge [peso=1]
    lisboa -- porto [peso=3]
    porto -- braga
    braga -- lisboa -- faro [peso=0]
    "ilha"
    lisboa -- porto [peso=9]
}
"#;

const DIRECTED: &str = r#"
strict digraph deps {
    core -> io -> net
    net -> core [peso=-4]
    io -> core
    leaf
}
"#;

#[test]
fn undirected_round_trip() {
    let g = dot::read_graph(UNDIRECTED).unwrap();
    assert_eq!(g.vertex_count(), 5);
    // 第二次 lisboa -- porto 被去重
    assert_eq!(g.edge_count(), 4);
    assert!(g.is_weighted());

    let text = dot::to_dot_string(&g);
    let back = dot::read_graph(&text).unwrap();
    assert_same_graph(&g, &back);

    // 再写一次结果完全相同
    assert_eq!(dot::to_dot_string(&back), text);
}

#[test]
fn directed_round_trip() {
    let g = dot::read_graph(DIRECTED).unwrap();
    assert!(g.is_directed());
    assert_eq!(g.edge_count(), 4);

    let back = dot::read_graph(&dot::to_dot_string(&g)).unwrap();
    assert_same_graph(&g, &back);
}

#[test]
fn unweighted_graph_stays_unweighted() {
    let g = dot::read_graph("graph { a -- b [peso=0]; b -- c }").unwrap();
    assert!(!g.is_weighted());

    let text = dot::to_dot_string(&g);
    assert!(!text.contains("peso"));
    assert!(!dot::read_graph(&text).unwrap().is_weighted());
}

#[test]
fn copies_survive_round_trip() {
    let g = dot::read_graph(UNDIRECTED).unwrap();
    let copy = g.copy_graph().unwrap();
    assert_same_graph(&g, &copy);

    let sub = g.copy_subgraph(&["lisboa"]).unwrap();
    let back = dot::read_graph(&dot::to_dot_string(&sub)).unwrap();
    assert_eq!(back.vertex_count(), 4);
    assert_same_graph(&sub, &back);
}

#[test]
fn matching_graph_round_trip() {
    let g = dot::read_graph("graph p { a -- b [peso=2]; b -- c; c -- d [peso=5] }").unwrap();
    let matching = MaximumMatching::new(&g).to_graph().unwrap();

    assert_eq!(matching.name(), MATCHING_GRAPH_NAME);
    assert_eq!(matching.edge_count(), 2);
    assert!(matching.is_weighted());

    let back = dot::read_graph(&dot::to_dot_string(&matching)).unwrap();
    assert_same_graph(&matching, &back);
}

#[test]
fn read_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DIRECTED.as_bytes()).unwrap();
    file.flush().unwrap();

    let g = dot::read_file(file.path()).unwrap();
    assert_eq!(g.name(), "deps");
    assert_eq!(g.vertex_count(), 4);

    let mut out = NamedTempFile::new().unwrap();
    dot::write_graph(&g, out.as_file_mut()).unwrap();
    let back = dot::read_file(out.path()).unwrap();
    assert_same_graph(&g, &back);
}

#[test]
fn read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = dot::read_file(dir.path().join("missing.dot")).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}
