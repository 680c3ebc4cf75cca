use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use tlebins::binning::{group_records, PlaneBinning, ShellPlaneBinning};
use tlebins::tle::parse_tle_text;

const LINE1: &str = "1 44713U 19074A   24001.50000000  .00001264  00000-0  10270-3 0  9998";

/// Synthetic catalog spreading the nodes over the full circle and the altitudes over two shells.
fn make_catalog(n: usize) -> String {
    (0..n)
        .map(|i| {
            let raan = (i as f64 * 7.31) % 360.0;
            let mean_motion = if i % 3 == 0 { 15.9 } else { 15.06391535 };
            format!(
                "STARLINK-{i}\n{LINE1}\n2 44713  53.0536 {raan:>8.4} 0001325  95.1207 264.9926 {mean_motion:>11.8}232436\n"
            )
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let catalog = make_catalog(5_000);

    c.bench_function("parse_tle_text/5000", |b| {
        b.iter(|| black_box(parse_tle_text(black_box(&catalog))))
    });
}

fn bench_grouping(c: &mut Criterion) {
    let records = parse_tle_text(&make_catalog(5_000)).records;
    let planes = PlaneBinning::new(2.0).unwrap();
    let shells = ShellPlaneBinning::new(100.0, 10.0).unwrap();

    c.bench_function("group_records/plane", |b| {
        b.iter_batched(
            || records.clone(),
            |records| black_box(group_records(records, &planes)),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("group_records/shell_plane", |b| {
        b.iter_batched(
            || records.clone(),
            |records| black_box(group_records(records, &shells)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_grouping
);
criterion_main!(benches);
