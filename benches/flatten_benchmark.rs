//! Benchmarks for result-tree flattening.
//!
//! Run with: cargo bench
//!
//! These benchmarks flatten synthetic engine result trees of varying shape.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opendataloader_pdf::{flatten, flatten_str, Record, ResultNode};

/// Build a synthetic result tree: `pages` pages of `paras` paragraphs each.
fn build_tree(pages: u32, paras: usize) -> ResultNode {
    let kids = (1..=pages)
        .map(|page| ResultNode {
            node_type: Some("page".to_string()),
            page: Some(page),
            content: None,
            kids: (0..paras)
                .map(|i| ResultNode {
                    node_type: Some("paragraph".to_string()),
                    page: None,
                    content: Some(format!("Paragraph {i} of page {page}")),
                    kids: Vec::new(),
                })
                .collect(),
        })
        .collect();

    ResultNode {
        kids,
        ..Default::default()
    }
}

/// Build a deeply nested chain with a single leaf at the bottom.
fn build_deep_tree(depth: usize) -> ResultNode {
    let mut node = ResultNode {
        node_type: Some("paragraph".to_string()),
        content: Some("leaf".to_string()),
        ..Default::default()
    };
    for _ in 0..depth {
        node = ResultNode {
            node_type: Some("text block".to_string()),
            kids: vec![node],
            ..Default::default()
        };
    }
    node
}

fn bench_flatten_wide(c: &mut Criterion) {
    let tree = build_tree(50, 40);
    c.bench_function("flatten_50_pages_x_40_paragraphs", |b| {
        b.iter(|| {
            let records: Vec<Record> =
                flatten(black_box(tree.clone()), "bench.pdf").collect();
            black_box(records)
        })
    });
}

fn bench_flatten_deep(c: &mut Criterion) {
    let tree = build_deep_tree(10_000);
    c.bench_function("flatten_depth_10000", |b| {
        b.iter(|| {
            let records: Vec<Record> =
                flatten(black_box(tree.clone()), "bench.pdf").collect();
            black_box(records)
        })
    });
}

fn bench_parse_and_flatten(c: &mut Criterion) {
    let json = serde_json::to_string(&serde_json::json!({
        "kids": (1..=20).map(|page| serde_json::json!({
            "type": "page",
            "page number": page,
            "kids": (0..20).map(|i| serde_json::json!({
                "type": "paragraph",
                "content": format!("Paragraph {i}")
            })).collect::<Vec<_>>()
        })).collect::<Vec<_>>()
    }))
    .unwrap();

    c.bench_function("parse_and_flatten_20_pages", |b| {
        b.iter(|| {
            let records: Vec<Record> = flatten_str(black_box(&json), "bench.pdf")
                .unwrap()
                .collect();
            black_box(records)
        })
    });
}

criterion_group!(
    benches,
    bench_flatten_wide,
    bench_flatten_deep,
    bench_parse_and_flatten
);
criterion_main!(benches);
