//! Benchmarks for chunking and structuring performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic paper-like pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docstruct::{chunk_text, ExtractedDocument, PageRecord, StructureOptions, Structurer, StyledLine};

const SENTENCE: &str = "The proposed model improves retrieval quality on long documents. ";

/// Creates page text with a heading every few pages.
fn page_text(index: usize) -> String {
    let mut text = String::new();
    match index {
        0 => text.push_str("Abstract\n"),
        1 => text.push_str("1. Introduction\n"),
        i if i % 5 == 0 => text.push_str(&format!("{}. Section {}\n", i / 5 + 1, i)),
        _ => {}
    }
    text.push_str(&SENTENCE.repeat(40));
    text
}

fn create_text_document(page_count: usize) -> ExtractedDocument {
    ExtractedDocument::from_texts((0..page_count).map(page_text))
}

fn create_layout_document(page_count: usize) -> ExtractedDocument {
    (0..page_count).fold(ExtractedDocument::new(), |doc, i| {
        let mut lines = vec![StyledLine::new(format!("{} Heading {}", i + 1, i), 14.0, 72.0, 60.0)];
        lines.extend((0..40).map(|j| StyledLine::new(SENTENCE, 10.0, 72.0, 80.0 + 12.0 * j as f32)));
        doc.with_page(PageRecord::new(i as u32 + 1, page_text(i)).with_lines(lines))
    })
}

fn bench_chunking(c: &mut Criterion) {
    let text = SENTENCE.repeat(500);

    c.bench_function("chunk_32k_chars", |b| {
        b.iter(|| chunk_text(black_box(&text), 1800, 200))
    });

    c.bench_function("chunk_32k_chars_small_windows", |b| {
        b.iter(|| chunk_text(black_box(&text), 200, 50))
    });
}

fn bench_structuring(c: &mut Criterion) {
    let mut group = c.benchmark_group("structuring");
    let structurer = Structurer::new(StructureOptions::default()).unwrap();

    for page_count in [10, 80] {
        let text_doc = create_text_document(page_count);
        group.bench_function(format!("text_{}_pages", page_count), |b| {
            b.iter(|| structurer.structure(black_box(&text_doc), "bench.pdf"))
        });

        let layout_doc = create_layout_document(page_count);
        group.bench_function(format!("layout_{}_pages", page_count), |b| {
            b.iter(|| structurer.structure(black_box(&layout_doc), "bench.pdf"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunking, bench_structuring);
criterion_main!(benches);
