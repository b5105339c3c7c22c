use std::sync::Arc;

use chatterbox::{best_match, Analyzer, NounLemmatizer, Sentence, TFIDFVectorizer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const WORDS: &[&str] = &[
    "amp", "cable", "pedal", "string", "guitar", "battery", "shipping", "warranty", "sound",
    "quality", "loud", "quiet", "tube", "speaker", "volume", "tone", "bass", "treble", "price",
    "return", "box", "manual", "knob", "switch", "jack", "plug", "noise", "hum", "gain", "reverb",
];

// xorshift, fixed seed
fn synthetic_corpus(sentences: usize, words_per_sentence: usize) -> Vec<Sentence> {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..sentences)
        .map(|_| {
            let text: Vec<&str> = (0..words_per_sentence)
                .map(|_| WORDS[(next() % WORDS.len() as u64) as usize])
                .collect();
            Sentence::new(text.join(" "))
        })
        .collect()
}

fn turn_benchmark(c: &mut Criterion) {
    let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(Analyzer::new(Arc::new(NounLemmatizer::new())));
    let mut group = c.benchmark_group("turn");
    for size in [100usize, 1_000, 10_000] {
        let mut pool = synthetic_corpus(size, 12);
        pool.push(Sentence::new("loud tube amps with quiet reverb"));
        let query_row = pool.len() - 1;

        group.bench_with_input(BenchmarkId::new("fit_transform", size), &pool, |b, pool| {
            b.iter(|| vectorizer.fit_transform(pool.as_slice()));
        });
        group.bench_with_input(BenchmarkId::new("fit_and_match", size), &pool, |b, pool| {
            b.iter(|| {
                let matrix = vectorizer.fit_transform(pool.as_slice());
                best_match(&matrix, query_row).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, turn_benchmark);
criterion_main!(benches);
