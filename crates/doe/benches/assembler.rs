use criterion::{criterion_group, criterion_main, Criterion};
use hypercube_doe::{Assembler, ParameterDef};

fn criterion_assembler(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembler");
    group.sample_size(10);
    let defs: Vec<ParameterDef<usize>> = (0..60)
        .map(|i| match i % 3 {
            0 => ParameterDef::continuous(i, -1., 1.),
            1 => ParameterDef::integer(i, 0, 20),
            _ => ParameterDef::unsupported(i),
        })
        .collect();
    for count in [10, 100, 1000] {
        group.bench_function(format!("assemble-{count}-experiments"), |b| {
            let assembler = Assembler::new().seed(Some(42));
            b.iter(|| std::hint::black_box(assembler.assemble(count, &defs).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_assembler);
criterion_main!(benches);
