// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use scraper::Html;

use jarchive_scrape::{extract, score_series, Policy};

fn load_sample() -> String {
    std::fs::read_to_string("tests/fixtures/game_page.html")
        .expect("read tests/fixtures/game_page.html")
}

fn bench_extract(c: &mut Criterion) {
    let html = load_sample();
    let doc = Html::parse_document(&html);

    c.bench_function("parse_document", |b| {
        b.iter(|| black_box(Html::parse_document(black_box(&html))))
    });

    c.bench_function("extract", |b| {
        b.iter(|| {
            let game = extract(black_box(&doc), 1, None).unwrap();
            black_box(game.all_clues().count())
        })
    });

    let game = extract(&doc, 1, None).unwrap();
    c.bench_function("score_series", |b| {
        b.iter(|| black_box(score_series(black_box(&game))))
    });

    c.bench_function("correct_all", |b| {
        b.iter(|| {
            let n = game.all_clues().filter(|c| c.correct(Policy::Any) == jarchive_scrape::Verdict::Flag(true)).count();
            black_box(n)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
