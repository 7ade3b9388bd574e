// tests/collect.rs
//
// Batch collection against an in-memory "archive".
//
use std::collections::HashMap;

use jarchive_scrape::config::options::{CollectOptions, RangeOptions};
use jarchive_scrape::progress::Progress;
use jarchive_scrape::scrape::collect;
use jarchive_scrape::{Corpus, CorpusError};

const FIXTURE: &str = include_str!("fixtures/game_page.html");

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<u32>,
    failed: Vec<u32>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, id: u32) { self.done.push(id); }
    fn item_failed(&mut self, id: u32, _msg: &str) { self.failed.push(id); }
    fn finish(&mut self) { self.finished = true; }
}

fn archive() -> HashMap<u32, String> {
    let mut pages = HashMap::new();
    pages.insert(1, FIXTURE.to_string());
    pages.insert(2, "<html><body><p>nothing useful</p></body></html>".to_string());
    pages.insert(4, FIXTURE.replace("Show #4680", "Show #4681"));
    pages.insert(5, "<html><body><p>ERROR: No game 5 in database.</p></body></html>".to_string());
    pages.insert(6, FIXTURE.to_string());
    pages
}

#[test]
fn failures_are_reported_and_the_batch_continues() {
    let pages = archive();
    let fetch = |id: u32| pages.get(&id).cloned().ok_or_else(|| format!("HTTP 404 for {id}"));
    let options = CollectOptions { range: RangeOptions::span(1, 5, 1), stop_at_end: true };

    let mut corpus = Corpus::new();
    let mut rec = Recorder::default();
    let summary = collect(&mut corpus, &options, fetch, None, Some(&mut rec)).unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.failed_pages(), vec![2, 3]);
    assert!(matches!(summary.failures[0], CorpusError::MalformedPage { page_id: 2, .. }));
    assert!(matches!(summary.failures[1], CorpusError::Fetch { page_id: 3, .. }));
    assert!(!summary.reached_end);
    assert_eq!(corpus.to_string(), "4680 2005-01-03\n4681 2005-01-03");
    assert!(corpus.iter().all(|g| !g.loaded));

    assert_eq!(rec.total, 4);
    assert_eq!(rec.done, vec![1, 4]);
    assert_eq!(rec.failed, vec![2, 3]);
    assert!(rec.finished);
}

#[test]
fn stops_at_end_of_archive() {
    let pages = archive();
    let fetch = |id: u32| pages.get(&id).cloned().ok_or_else(|| s(id));
    let options = CollectOptions { range: RangeOptions::span(4, 10, 1), stop_at_end: true };

    let mut corpus = Corpus::new();
    let summary = collect(&mut corpus, &options, fetch, None, None).unwrap();
    assert!(summary.reached_end);
    assert_eq!(summary.added, 1);
    assert!(summary.failures.is_empty());
}

#[test]
fn end_page_is_a_failure_when_not_stopping() {
    let pages = archive();
    let fetch = |id: u32| pages.get(&id).cloned().ok_or_else(|| s(id));
    let options = CollectOptions { range: RangeOptions::span(5, 7, 1), stop_at_end: false };

    let mut corpus = Corpus::new();
    let summary = collect(&mut corpus, &options, fetch, None, None).unwrap();
    assert!(!summary.reached_end);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.failed_pages(), vec![5]);
}

#[test]
fn bad_step_fails_before_fetching() {
    let options = CollectOptions { range: RangeOptions::span(1, 5, 0), stop_at_end: true };
    let mut fetched = false;
    let result = collect(&mut Corpus::new(), &options, |_| { fetched = true; Err(String::new()) }, None, None);
    assert!(matches!(result, Err(CorpusError::InvalidStep(0))));
    assert!(!fetched);
}

fn s(id: u32) -> String {
    format!("missing page {id}")
}
