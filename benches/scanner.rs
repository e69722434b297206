//! Trellis scanner benchmarks
//!
//! Run with: cargo bench -p trellis-bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trellis_bench::{generate_deep_nesting, generate_script, generate_template};
use trellis_scanner::{Scanner, TokenKind, ValidSymbols};
use trellis_testkit::{symbols, ScanSession};

fn control_flow() -> ValidSymbols {
    symbols(&[
        TokenKind::IfStart,
        TokenKind::ElseStart,
        TokenKind::ForStart,
        TokenKind::SwitchStart,
        TokenKind::CaseStart,
        TokenKind::DefaultStart,
        TokenKind::DeferStart,
        TokenKind::LetStart,
        TokenKind::EmptyStart,
        TokenKind::PlaceholderStart,
        TokenKind::LoadingStart,
        TokenKind::ErrorStart,
        TokenKind::ElseIfStart,
        TokenKind::AtSign,
    ])
}

fn start_tags() -> ValidSymbols {
    symbols(&[
        TokenKind::StartTagName,
        TokenKind::ScriptStartTagName,
        TokenKind::StyleStartTagName,
    ])
}

/// Drive one generated control-flow block template end to end, returning the
/// number of tokens the scanner produced.
fn scan_template(source: &str, blocks: usize) -> usize {
    let mut session = ScanSession::new(source);
    let mut tokens = 0;
    for i in 0..blocks {
        session.scan(&control_flow()).unwrap();
        session.expect_literal(" (visible) {").unwrap();
        tokens += 1;

        for _ in ["div", "span"] {
            assert!(session.scan(&symbols(&[TokenKind::ImplicitEndTag])).is_none());
            session.expect_literal("<").unwrap();
            session.scan(&start_tags()).unwrap();
            session.expect_literal(">").unwrap();
            tokens += 1;
        }

        session.scan(&symbols(&[TokenKind::InterpolationStart])).unwrap();
        session.expect_literal(&format!("item{i}")).unwrap();
        session.scan(&symbols(&[TokenKind::InterpolationEnd])).unwrap();
        tokens += 2;

        for _ in ["span", "div"] {
            assert!(session.scan(&symbols(&[TokenKind::ImplicitEndTag])).is_none());
            session.expect_literal("</").unwrap();
            session.scan(&symbols(&[TokenKind::EndTagName])).unwrap();
            session.expect_literal(">").unwrap();
            tokens += 1;
        }
        session.expect_literal("}").unwrap();
    }
    tokens
}

fn template_scanning_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_scanning");

    for blocks in [10usize, 100, 1000] {
        let source = generate_template(blocks);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("blocks", blocks),
            &source,
            |b, source| b.iter(|| scan_template(source, blocks)),
        );
    }

    group.finish();
}

fn raw_text_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_text");

    for statements in [10usize, 1000, 10000] {
        let source = generate_script(statements);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("statements", statements),
            &source,
            |b, source| {
                b.iter(|| {
                    let mut session = ScanSession::new(source);
                    session.expect_literal("<").unwrap();
                    session.scan(&start_tags()).unwrap();
                    session.expect_literal(">").unwrap();
                    session
                        .scan(&symbols(&[TokenKind::RawText]))
                        .unwrap()
                        .text
                        .len()
                })
            },
        );
    }

    group.finish();
}

fn codec_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_codec");

    for depth in [8usize, 64, 256] {
        let source = generate_deep_nesting(depth);
        let mut session = ScanSession::new(&source);
        for _ in 0..depth {
            session.expect_literal("<").unwrap();
            session.scan(&start_tags()).unwrap();
            session.expect_literal(">").unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("round_trip", depth),
            session.scanner(),
            |b, scanner| {
                let mut buffer = [0u8; 1024];
                b.iter(|| {
                    let size = scanner.serialize(&mut buffer).unwrap();
                    let mut restored = Scanner::new();
                    restored.deserialize(&buffer[..size]);
                    restored.depth()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    template_scanning_benchmarks,
    raw_text_benchmarks,
    codec_benchmarks
);
criterion_main!(benches);
