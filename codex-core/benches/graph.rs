//! Graph benchmarks: bulk creation and subtree traversal.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use codex_core::graph::{NoteGraph, Traversal};

/// A root with `n` children; every eighth child links back to the root.
fn build(n: usize) -> NoteGraph {
    let mut g = NoteGraph::new();
    g.create_node("root", "notes/root", "Root", None).unwrap();
    for i in 0..n {
        let id = format!("root/{i}");
        g.create_node(id.as_str(), "notes/root", "Note", Some("root"))
            .unwrap();
        if i % 8 == 0 {
            g.add_link(id.as_str(), "root").unwrap();
        }
    }
    g
}

fn bench_create(c: &mut Criterion) {
    c.bench_function("create_1k_nodes", |b| b.iter(|| black_box(build(1_000))));
}

fn bench_traverse(c: &mut Criterion) {
    let g = build(1_000);
    c.bench_function("traverse_1k_depth_first", |b| {
        b.iter(|| {
            g.traverse("root", Traversal::DepthFirst)
                .unwrap()
                .count()
        })
    });
    c.bench_function("traverse_1k_breadth_first", |b| {
        b.iter(|| {
            g.traverse("root", Traversal::BreadthFirst)
                .unwrap()
                .count()
        })
    });
}

criterion_group!(benches, bench_create, bench_traverse);
criterion_main!(benches);
