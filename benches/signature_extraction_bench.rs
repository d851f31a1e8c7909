//! Signature extraction throughput
//!
//! Measures the line scanner on generated Go sources of increasing size and
//! the full pipeline over a scratch tree at several pool sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ifacegen::{Extractor, SignatureExtractor};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

/// Go source with `methods` exported methods on `Store`, mixing inline,
/// multi-line and commented-out declarations.
fn generate_go_source(methods: usize) -> String {
    let mut code = String::from("package store\n\nimport \"context\"\n\n");
    for i in 0..methods {
        match i % 4 {
            0 => code.push_str(&format!(
                "func (s *Store) Get{i}(key string) ([]byte, error) {{\n\treturn nil, nil\n}}\n\n"
            )),
            1 => code.push_str(&format!(
                "func (s *Store) Put{i}(\n\tctx context.Context,\n\t// value is copied\n\tvalue []byte,\n) error {{\n\treturn nil\n}}\n\n"
            )),
            2 => code.push_str(&format!("func (s Store) Len{i}() int {{ return {i} }}\n\n")),
            _ => code.push_str(&format!(
                "/*\nfunc (s *Store) Old{i}() {{\n}}\n*/\nfunc (s *Store) helper{i}() {{\n}}\n\n"
            )),
        }
    }
    code
}

fn bench_line_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_scanner");
    let extractor = SignatureExtractor::new("Store");

    for methods in [10, 100, 1000] {
        let source = generate_go_source(methods);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &source, |b, code| {
            b.iter(|| black_box(extractor.extract_str(black_box(code))));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for i in 0..64 {
        fs::write(
            temp_dir.path().join(format!("file{i}.go")),
            generate_go_source(50),
        )
        .expect("Failed to write source file");
    }

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    for pool_size in [1, 4, 10] {
        let extractor = Extractor::new(pool_size);
        group.bench_with_input(
            BenchmarkId::new("pool", pool_size),
            &pool_size,
            |b, _| {
                b.iter(|| {
                    let extraction = extractor
                        .extract(black_box("Store"), temp_dir.path())
                        .expect("Extraction failed");
                    black_box(extraction.signatures.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_line_scanner, bench_pipeline);
criterion_main!(benches);
