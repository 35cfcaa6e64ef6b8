//! Performance benchmarks for vote-extract.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - The voting loop alone over synthetic pages of growing length
//! - A full extraction (HTML conversion + voting) with a warm cache

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vote_extract::tokenize::{pad_answer, pad_tokens};
use vote_extract::vote::{tally, Ballot};
use vote_extract::{MajorityVote, ModelAnswer, ModelAnswerCache, VoteOptions};

const WORDS: [&str; 12] = [
    "river", "moved", "three", "kilometres", "east", "over", "a", "decade", "scientists", "found",
    "that", "the",
];

fn synthetic_text(tokens: usize, seed: usize) -> String {
    (0..tokens)
        .map(|i| WORDS[(i * 7 + seed) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally");

    for size in [100usize, 1_000, 5_000] {
        let page = synthetic_text(size, 0);
        let tokens: Vec<&str> = page.split_whitespace().collect();
        let padded = pad_tokens(&tokens, 4);
        let answers = [
            pad_answer(&page, 4),
            pad_answer(&synthetic_text(size, 3), 4),
            pad_answer(&page[..page.len() / 2], 4),
        ];
        let ballots: Vec<Ballot> = answers.iter().map(|a| Ballot::new(a, 1.0)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &padded, |b, padded| {
            b.iter(|| tally(black_box(padded), black_box(&ballots), 2.0, 5));
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let text = synthetic_text(500, 0);
    let html = format!("<html><body><nav>Home About</nav><article><p>{text}</p></article></body></html>");

    let cache = ModelAnswerCache::new("/nonexistent");
    for (model, seed) in [("m1", 0), ("m2", 0), ("m3", 5)] {
        let answer: ModelAnswer = [("page", synthetic_text(500, seed))].into_iter().collect();
        cache.insert(model, answer);
    }
    let voter = MajorityVote::new(&cache);
    let options = VoteOptions::new(2.0, 5);

    c.bench_function("extract_warm_cache", |b| {
        b.iter(|| {
            voter.extract(
                black_box(&html),
                "page",
                &["m1", "m2", "m3"],
                &[1.0, 1.0, 1.0],
                &options,
            )
        });
    });
}

criterion_group!(benches, bench_tally, bench_extract);
criterion_main!(benches);
