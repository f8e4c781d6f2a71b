use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use scc::lexer::Lexer;

struct Corpus {
    name: &'static str,
    source: String,
}

fn build_function_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..2_000usize {
        let _ = writeln!(src, "static int helper_{i}(int a, long b) {{");
        let _ = writeln!(src, "    return (a += {i}) >= 0 && b != {} ? a : -a;", i + 1);
        let _ = writeln!(src, "}}");
    }

    src
}

fn build_comment_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..3_000usize {
        let _ = writeln!(src, "// line comment {i}");
        let _ = writeln!(src, "int x_{i} = {i}; /* trailing {} */", i + 1);
        let _ = writeln!(src, "/* block\n   comment {i} */");
    }

    src
}

fn build_literal_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);

    for i in 0..2_000usize {
        let _ = writeln!(src, "const char *s_{i} = \"str {i} \\t \\u00e9 \\x7f\";");
        let _ = writeln!(src, "double d_{i} = {i}.5e+10;");
        let _ = writeln!(src, "int c_{i} = 'a' + L'b';");
    }

    src
}

fn corpora() -> Vec<Corpus> {
    vec![
        Corpus {
            name: "functions",
            source: build_function_heavy_corpus(),
        },
        Corpus {
            name: "comments",
            source: build_comment_heavy_corpus(),
        },
        Corpus {
            name: "literals",
            source: build_literal_heavy_corpus(),
        },
    ]
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for corpus in corpora() {
        group.throughput(Throughput::Bytes(corpus.source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name),
            &corpus.source,
            |b, source| {
                b.iter(|| {
                    let mut lexer = Lexer::from_source(source.clone());
                    let tokens = lexer.tokenize().expect("corpus lexes");
                    black_box(tokens.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
