use criterion::*;
use splitter_rs::{CharPredicate, Splitter};

const TEXT: &str = "alpha, beta,,gamma , delta,epsilon ,, zeta,eta, theta ,iota,kappa";

fn split_char() {
    let splitter = Splitter::on(',');
    black_box(splitter.split_to_list(TEXT));
}

fn split_trimmed() {
    let splitter = Splitter::on(',').trim_results().omit_empty_strings();
    black_box(splitter.split_to_list(TEXT));
}

fn split_pattern() {
    let splitter = Splitter::on_pattern(r"\s*,+\s*").unwrap();
    black_box(splitter.split_to_list(TEXT));
}

fn any_of_match() {
    let vowels = CharPredicate::any_of("aeiou");
    black_box(vowels.count_in(TEXT));
}

fn split_benchmark(c: &mut Criterion) {
    c.bench_function("split on char", |b| b.iter(split_char));
    c.bench_function("split trimmed", |b| b.iter(split_trimmed));
    c.bench_function("split on pattern", |b| b.iter(split_pattern));
    c.bench_function("any_of count", |b| b.iter(any_of_match));
}

criterion_group!(benches, split_benchmark);
criterion_main!(benches);
