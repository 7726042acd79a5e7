use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use nahw::corpus::Corpus;
use nahw::engine::LearnedWord;
use nahw::generator::{RngRandomizer, questions_for};
use nahw::session::QuizSession;

fn learned_words(corpus: &Corpus) -> Vec<LearnedWord> {
    corpus
        .rules
        .iter()
        .flat_map(|rule| rule.examples.iter().map(move |ex| LearnedWord::snapshot(ex, rule)))
        .collect()
}

fn bench_questions_for(c: &mut Criterion) {
    let corpus = Corpus::bundled().unwrap();
    let learned = learned_words(&corpus);
    let mut rng = RngRandomizer(SmallRng::seed_from_u64(42));

    c.bench_function("questions_for (one word, 10 learned)", |b| {
        b.iter(|| questions_for(black_box(&learned[4]), &learned, &corpus, 4, &mut rng))
    });
}

fn bench_practice_all(c: &mut Criterion) {
    let corpus = Corpus::bundled().unwrap();
    let learned = learned_words(&corpus);
    let mut rng = RngRandomizer(SmallRng::seed_from_u64(42));

    c.bench_function("practice_all (10 learned)", |b| {
        b.iter(|| QuizSession::practice_all(black_box(&learned), &corpus, 4, &mut rng))
    });

    // Large learner history: the bundled words repeated with distinct keys.
    let many: Vec<LearnedWord> = (0..500)
        .map(|i| {
            let mut word = learned[i % learned.len()].clone();
            word.arabic = format!("{} {i}", word.arabic);
            word.translation = format!("{} ({i})", word.translation);
            word
        })
        .collect();
    c.bench_function("practice_all (500 learned)", |b| {
        b.iter(|| QuizSession::practice_all(black_box(&many), &corpus, 4, &mut rng))
    });
}

criterion_group!(benches, bench_questions_for, bench_practice_all);
criterion_main!(benches);
