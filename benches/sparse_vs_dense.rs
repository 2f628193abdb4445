use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use faer::Mat;
use sparsix::{SparseMatrix, SparseOptions};

/// Deterministic `n × n` matrix with about one entry in `stride` non-zero.
fn banded(n: usize, stride: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| {
        if (i * 7 + j * 13) % stride == 0 {
            ((i + j) as f64).sin()
        } else {
            0.0
        }
    })
}

fn bench_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("product");
    for &n in &[50usize, 200] {
        for &stride in &[10usize, 50] {
            let a = banded(n, stride);
            let b = banded(n, stride + 1);
            let sa = SparseMatrix::from_faer(&a);
            let sb = SparseMatrix::from_faer(&b);
            let label = format!("{n}/1in{stride}");

            group.bench_with_input(BenchmarkId::new("sparse", &label), &(), |ben, _| {
                ben.iter(|| black_box(&sa).matmul(black_box(&sb)).unwrap())
            });

            let serial = SparseOptions::default().with_parallel_threshold(usize::MAX);
            group.bench_with_input(BenchmarkId::new("sparse serial", &label), &(), |ben, _| {
                ben.iter(|| black_box(&sa).matmul_with(black_box(&sb), &serial).unwrap())
            });

            group.bench_with_input(BenchmarkId::new("faer dense", &label), &(), |ben, _| {
                ben.iter(|| black_box(&a) * black_box(&b))
            });
        }
    }
    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let sa = SparseMatrix::from_faer(&banded(200, 10));
    c.bench_function("regroup to column-major", |ben| {
        ben.iter(|| black_box(&sa).to_column_major())
    });
    c.bench_function("transpose", |ben| ben.iter(|| black_box(&sa).transpose()));
}

criterion_group!(benches, bench_product, bench_transpose);
criterion_main!(benches);
