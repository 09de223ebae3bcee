use criterion::{criterion_group, criterion_main, Criterion};

use epstein_rs::special::{epstein_zeta, epstein_zeta_reg};

pub fn criterion_benchmark(c: &mut Criterion) {
    // the 1D lattice with an analytic representation
    c.bench_function("epstein_zeta 1d", |b| {
        b.iter(|| epstein_zeta(1.5, 1, &[1.0], &[-0.5], &[0.0]))
    });

    // hexagonal lattice
    let hex = [1.0, 0.5, 0.0, 3.0_f64.sqrt() / 2.0];
    c.bench_function("epstein_zeta 2d hexagonal", |b| {
        b.iter(|| epstein_zeta(2.0, 2, &hex, &[0.0, 0.0], &[0.0, 0.0]))
    });

    // Madelung configuration
    let id3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    c.bench_function("epstein_zeta 3d madelung", |b| {
        b.iter(|| epstein_zeta(1.0, 3, &id3, &[0.0; 3], &[0.5; 3]))
    });

    c.bench_function("epstein_zeta_reg 3d", |b| {
        b.iter(|| epstein_zeta_reg(3.0, 3, &id3, &[0.0; 3], &[0.0; 3]))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
