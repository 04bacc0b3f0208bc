//! Test graph factories shared by the unit tests.
#![allow(dead_code)]

use crate::graph::MeasureGraph;

/// Complete graph K_n on vertices `v0 .. v{n-1}`.
pub fn complete_graph(n: usize) -> MeasureGraph<String> {
    let mut g = MeasureGraph::undirected();
    let names: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
    for name in &names {
        g.add_vertex(name.clone());
    }
    for i in 0..n {
        for j in (i + 1)..n {
            g.add_edge(names[i].clone(), names[j].clone());
        }
    }
    g
}

/// `count` disjoint cliques of `size` vertices each, named `c{clique}_{i}`.
pub fn disjoint_cliques(count: usize, size: usize) -> MeasureGraph<String> {
    let mut g = MeasureGraph::undirected();
    for c in 0..count {
        let names: Vec<String> = (0..size).map(|i| format!("c{}_{}", c, i)).collect();
        for name in &names {
            g.add_vertex(name.clone());
        }
        for i in 0..size {
            for j in (i + 1)..size {
                g.add_edge(names[i].clone(), names[j].clone());
            }
        }
    }
    g
}

/// Two cliques of `size` vertices joined by the single bridge `c0_0 — c1_0`.
pub fn bridged_cliques(size: usize) -> MeasureGraph<String> {
    let mut g = disjoint_cliques(2, size);
    g.add_edge("c0_0".to_string(), "c1_0".to_string());
    g
}

/// Path `v0 — v1 — … — v{n-1}`.
pub fn path_graph(n: usize) -> MeasureGraph<String> {
    let mut g = MeasureGraph::undirected();
    for i in 0..n {
        g.add_vertex(format!("v{}", i));
    }
    for i in 1..n {
        g.add_edge(format!("v{}", i - 1), format!("v{}", i));
    }
    g
}

/// Star with `center` joined to `leaf_0 .. leaf_{n-1}`.
pub fn star_graph(leaves: usize) -> MeasureGraph<String> {
    let mut g = MeasureGraph::undirected();
    g.add_vertex("center".to_string());
    for i in 0..leaves {
        g.add_edge("center".to_string(), format!("leaf_{}", i));
    }
    g
}

/// Triangle `core_0, core_1, core_2` with one pendant `pendant_i` per core vertex.
pub fn core_with_pendants() -> MeasureGraph<String> {
    let mut g = MeasureGraph::undirected();
    for i in 0..3 {
        g.add_vertex(format!("core_{}", i));
    }
    g.add_edge("core_0".to_string(), "core_1".to_string());
    g.add_edge("core_1".to_string(), "core_2".to_string());
    g.add_edge("core_0".to_string(), "core_2".to_string());
    for i in 0..3 {
        g.add_edge(format!("core_{}", i), format!("pendant_{}", i));
    }
    g
}
