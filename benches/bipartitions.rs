use criterion::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use placemerge::{build_bipartitions, map_edge_labels};
use std::hint::black_box;
use std::path::PathBuf;

/// Caterpillar tree over `leaves` taxa; edges are numbered in post-order
/// starting at `first`, inside braces when `braces` is set.
fn caterpillar(leaves: usize, first: u64, braces: bool) -> String {
    let (open, close) = if braces { ('{', '}') } else { ('[', ']') };
    let mut label = first;
    let mut next = || {
        let current = label;
        label += 1;
        format!("{open}{current}{close}")
    };
    let mut tree = format!("(T0:0.1{},T1:0.1{})", next(), next());
    for i in 2..leaves - 1 {
        tree = format!("({tree}:0.2{},T{i}:0.1{})", next(), next());
    }
    format!("({tree}:0.2{},T{}:0.1{});", next(), leaves - 1, next())
}

fn prepare_test_data() -> Vec<(String, String, String)> {
    [100, 1_000, 5_000]
        .into_iter()
        .map(|n| {
            (
                format!("caterpillar_{n}"),
                caterpillar(n, 0, false),
                caterpillar(n, 7, true),
            )
        })
        .collect()
}

fn bench_bipartitions(c: &mut Criterion) {
    let test_data = prepare_test_data();

    let mut group = c.benchmark_group("bipartitions");
    let _ = group.sample_size(30);

    for (name, base, relabeled) in &test_data {
        let _ = group.throughput(Throughput::Bytes(base.len() as u64));

        let _ = group.bench_with_input(
            BenchmarkId::new("build_bipartitions", name),
            base,
            |b, tree| {
                b.iter(|| {
                    let _ = black_box(build_bipartitions(tree));
                });
            },
        );

        let _ = group.bench_with_input(
            BenchmarkId::new("map_edge_labels", name),
            &(relabeled, base),
            |b, (relabeled, base)| {
                b.iter(|| {
                    let _ = black_box(map_edge_labels(relabeled, base));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = {
        let mut criterion = Criterion::default();
        let benchmark_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("benchmark_results");
        criterion = criterion.output_directory(&benchmark_dir);
        criterion = criterion.warm_up_time(std::time::Duration::from_millis(500));
        criterion = criterion.measurement_time(std::time::Duration::from_secs(5));
        criterion
    };
    targets = bench_bipartitions
);
criterion_main!(benches);
