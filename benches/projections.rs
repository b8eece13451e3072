use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kotva::hooks::{HalpernIteration, StopAfterIterations};
use kotva::nalgebra::{DVector, Dyn, OVector};
use kotva::projection::{group_hard_threshold, gssp, hard_threshold, sigma_simplex, Groups};
use kotva::{minimize, objective, State};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn random_point(dim: usize, seed: u64) -> OVector<f64, Dyn> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 10.0).unwrap();
    DVector::from_fn(dim, |_, _| normal.sample(&mut rng))
}

fn simplex(c: &mut Criterion) {
    let small = random_point(10, 1);
    let large = random_point(10_000, 2);

    c.bench_function("sigma simplex 10", |b| {
        b.iter(|| sigma_simplex(black_box(&small), 1.0))
    });
    c.bench_function("sigma simplex 10000", |b| {
        b.iter(|| sigma_simplex(black_box(&large), 1.0))
    });
}

fn sparse(c: &mut Criterion) {
    let x = random_point(10_000, 3);
    let groups = Groups::contiguous(&[10; 1000]);

    c.bench_function("gssp 10000 (k = 100)", |b| {
        b.iter(|| gssp(black_box(&x), 100, 1.0))
    });
    c.bench_function("hard threshold 10000 (k = 100)", |b| {
        b.iter(|| hard_threshold(black_box(&x), 100))
    });
    c.bench_function("group hard threshold 1000x10 (k = 10)", |b| {
        b.iter(|| group_hard_threshold(black_box(&x), &groups, 10))
    });
}

fn halpern(c: &mut Criterion) {
    let f = objective(
        |x: &OVector<f64, Dyn>| x.norm_squared(),
        |x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>| grad.copy_from(&(x * 2.0)),
    );
    let state = State::builder()
        .with_initial(vec![100.0; 100])
        .with_step_size(0.1)
        .with_hook(HalpernIteration::harmonic(vec![10.0; 100]))
        .with_hook(StopAfterIterations::new(1000))
        .build()
        .unwrap();

    c.bench_function("halpern sphere 100 (1000 iterations)", |b| {
        b.iter(|| minimize(&f, black_box(&state)).unwrap())
    });
}

criterion_group!(benches, simplex, sparse, halpern);
criterion_main!(benches);
