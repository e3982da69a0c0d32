//! Highlight traversal benchmarks.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use keymark::{Document, Highlighter, NodeId};

/// Builds a page of `paragraphs` paragraphs with a mix of prose and code
/// blocks, returning the document and its body.
fn build_page(paragraphs: usize) -> (Document, NodeId) {
    let doc = Document::new();
    let body = doc.create_element("body");
    doc.append_child(doc.root(), body).unwrap();

    for i in 0..paragraphs {
        let p = doc.create_element("p");
        let text = doc.create_text(format!(
            "Paragraph {i}: the cat sat on the mat while ownership rules kept the borrow checker honest."
        ));
        doc.append_child(p, text).unwrap();
        doc.append_child(body, p).unwrap();

        if i % 10 == 0 {
            let pre = doc.create_element("pre");
            let code = doc.create_text("let cat = Cat::new();");
            doc.append_child(pre, code).unwrap();
            doc.append_child(body, pre).unwrap();
        }
    }

    (doc, body)
}

fn bench_highlight(c: &mut Criterion) {
    let keywords = ["cat", "ownership", "borrow checker", "mat"];

    let mut group = c.benchmark_group("highlight");
    for size in [10usize, 100, 500] {
        group.bench_function(format!("{size}_paragraphs"), |b| {
            b.iter_batched(
                || build_page(size),
                |(doc, body)| {
                    Highlighter::default()
                        .highlight(&doc, body, &keywords)
                        .unwrap()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_highlight);
criterion_main!(benches);
