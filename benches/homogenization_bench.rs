//! Benchmarks for homogenization

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fiber_homogenization::prelude::*;

fn epoxy() -> Isotropy {
    Isotropy::new(3e9, 0.35).unwrap()
}

fn glass() -> Isotropy {
    Isotropy::new(70e9, 0.2).unwrap()
}

fn benchmark_eshelby(c: &mut Criterion) {
    c.bench_function("eshelby_prolate", |b| {
        b.iter(|| EshelbyTensor::new(black_box(0.35), black_box(50.0)).unwrap())
    });
}

fn benchmark_aligned(c: &mut Criterion) {
    let phases = [FiberPhase::new(glass(), 50.0, 0.2)];
    c.bench_function("mori_tanaka_aligned", |b| {
        b.iter(|| MoriTanaka::new(epoxy(), black_box(&phases), HomogenizationOptions::default()).unwrap())
    });
}

fn benchmark_multi_phase(c: &mut Criterion) {
    let carbon = Material::transversely_isotropic(242e9, 15e9, 0.28, 0.4, 25e9).unwrap();
    let a2 = OrientationTensor2::from_diagonal(0.7, 0.2, 0.1).unwrap();
    let phases = [
        FiberPhase::new(carbon, 100.0, 0.15).with_orientation(a2),
        FiberPhase::new(glass(), 20.0, 0.1).with_orientation(OrientationTensor2::planar_isotropic()),
        FiberPhase::new(glass(), 0.05, 0.05).with_orientation(OrientationTensor2::isotropic()),
    ];
    c.bench_function("mori_tanaka_three_phase_hybrid_closure", |b| {
        b.iter(|| MoriTanaka::new(epoxy(), black_box(&phases), HomogenizationOptions::default()).unwrap())
    });
}

fn benchmark_laminate(c: &mut Criterion) {
    let ht = HalpinTsai::new(&glass(), &epoxy(), 50.0, 0.2, FiberPacking::Hexagonal).unwrap();
    let q = ht.lamina_stiffness();
    c.bench_function("laminate_from_distribution_90_plies", |b| {
        b.iter(|| {
            let laminate = Laminate::from_distribution(&q, |theta| theta.cos().powi(2), black_box(90)).unwrap();
            laminate.effective_modulus(0.3).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_eshelby,
    benchmark_aligned,
    benchmark_multi_phase,
    benchmark_laminate,
);
criterion_main!(benches);
