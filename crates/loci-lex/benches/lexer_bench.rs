//! Lexer throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use loci_lex::tokenize;

const SIM_SCRIPT: &str = r#"
initialize() {
    initializeMutationRate(1e-7);
    initializeMutationType("m1", 0.5, "f", 0.0);
    initializeGenomicElementType("g1", m1, 1.0);
    initializeGenomicElement(g1, 0, 99999);
    initializeRecombinationRate(1e-8);
}

1 { sim.addSubpop("p1", 500); }

s1 1000:2000 fitness(m1, p1) {
    if (homozygous)
        return relFitness * 1.5;
    else
        return relFitness;
}

2000 mateChoice(p1) {
    return weights * 2.0;
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_sim_script", |b| {
        b.iter(|| tokenize(black_box(SIM_SCRIPT), 0, false).unwrap())
    });

    c.bench_function("tokenize_keep_nonsignificant", |b| {
        b.iter(|| tokenize(black_box(SIM_SCRIPT), 0, true).unwrap())
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
