use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quip_command::ArgumentPack;

struct TestCase {
    name: &'static str,
    line: String,
}

// cargo bench --bench pack_tokenize -- --save-baseline initial
// cargo bench --bench pack_tokenize -- --baseline initial
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    group.sample_size(60);

    let test_cases = vec![
        TestCase {
            name: "plain",
            line: "/laundry occupy left-dry 30".to_string(),
        },
        TestCase {
            name: "quoted",
            line: r#"/notice post "washing machine `left-dry` is broken" urgency=high"#
                .to_string(),
        },
        TestCase {
            name: "long",
            line: format!("/tag door {}", "label ".repeat(200)),
        },
    ];

    for case in &test_cases {
        group.throughput(Throughput::Bytes(case.line.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("tokenize", case.name),
            &case.line,
            |b, line| {
                b.iter(|| {
                    let pack = ArgumentPack::tokenize(black_box(line)).unwrap();
                    black_box(assert!(!pack.is_empty()));
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
