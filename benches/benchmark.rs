use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_vector::AvlVector;

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    let positions: Vec<usize> = (0..N).map(|i| rng.gen_range(0..=i)).collect();

    c.bench_function("vector_push_back", |b| {
        b.iter(|| {
            let mut v = AvlVector::new();
            for value in &values {
                v.push_back(*value);
            }
            v
        })
    });

    c.bench_function("vector_insert_random", |b| {
        b.iter(|| {
            let mut v = AvlVector::new();
            for (value, index) in values.iter().zip(&positions) {
                v.insert(*index, *value);
            }
            v
        })
    });

    let v: AvlVector<i32> = values.iter().copied().collect();

    c.bench_function("vector_index", |b| {
        b.iter(|| {
            for index in &positions {
                black_box(v[*index]);
            }
        })
    });

    c.bench_function("vector_iter", |b| {
        b.iter(|| {
            for value in &v {
                black_box(value);
            }
        })
    });

    c.bench_function("vector_sort", |b| {
        b.iter(|| {
            let mut v = v.clone();
            v.sort();
            v
        })
    });

    c.bench_function("vector_remove_random", |b| {
        b.iter(|| {
            let mut v = v.clone();
            for index in positions.iter().rev() {
                v.remove(*index);
            }
            v
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
