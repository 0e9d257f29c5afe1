use criterion::{criterion_group, criterion_main, Criterion};
use corpus_core::tokenizer::{char_count, term_frequencies, tokenize};

const SAMPLE: &str = "Baseball in the summer months, swimming in the winter! \
    California has sun; Arizona has heat. Which season is best? Nobody agrees: \
    some like snow, some like surf, and some just like staying inside.";

fn bench_tokenize(c: &mut Criterion) {
    let text = SAMPLE.repeat(200);
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenize(&text)));
    c.bench_function("term_frequencies_sample", |b| {
        let tokens = tokenize(&text);
        b.iter(|| term_frequencies(&tokens))
    });
    c.bench_function("char_count_sample", |b| b.iter(|| char_count(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
