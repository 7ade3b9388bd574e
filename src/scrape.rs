// src/scrape.rs
//! Batch collection: walk a page range, fetch, extract, keep.
//!
//! Fetching is the caller's business; it comes in as a closure returning
//! the page markup or an error message. Nothing here sleeps or opens
//! sockets.

use scraper::Html;

use crate::config::options::CollectOptions;
use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::model::Annotator;
use crate::progress::Progress;
use crate::specs::game::{extract, is_missing_game};

/// What a batch run did.
#[derive(Debug, Default)]
pub struct CollectSummary {
    /// Games added to the corpus.
    pub added: usize,
    /// One error per page that could not be fetched or extracted.
    pub failures: Vec<CorpusError>,
    /// The run stopped at the archive's end-of-games page.
    pub reached_end: bool,
}

impl CollectSummary {
    pub fn failed_pages(&self) -> Vec<u32> {
        self.failures.iter().filter_map(CorpusError::page_id).collect()
    }
}

/// Visit every page `options.range` yields and add what extracts cleanly.
///
/// Per-page failures are logged, reported, and collected into the summary;
/// the batch carries on. Only an unusable range fails the whole call.
pub fn collect<F>(
    corpus: &mut Corpus,
    options: &CollectOptions,
    mut fetch: F,
    annotate: Option<Annotator<'_>>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CollectSummary>
where
    F: FnMut(u32) -> std::result::Result<String, String>,
{
    let ids = options.range.pages()?;
    let mut summary = CollectSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
        p.log("Fetching games...");
    }

    for page_id in ids {
        let outcome = fetch(page_id)
            .map_err(|message| CorpusError::Fetch { page_id, message })
            .and_then(|html| {
                if options.stop_at_end && is_missing_game(&html, page_id) {
                    return Ok(None);
                }
                let doc = Html::parse_document(&html);
                extract(&doc, page_id, annotate).map(Some)
            });

        match outcome {
            Ok(Some(game)) => {
                logd!("Game {page_id}: #{} {}", game.game_number, game.date);
                corpus.add(game);
                summary.added += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(page_id);
                }
            }
            Ok(None) => {
                logf!("No game {page_id} in the archive; stopping");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Reached end of archive at {page_id}"));
                }
                summary.reached_end = true;
                break;
            }
            Err(e) => {
                loge!("Page {page_id}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(page_id, &e.to_string());
                }
                summary.failures.push(e);
            }
        }
    }

    logf!(
        "Collected {} games, {} failures",
        summary.added,
        summary.failures.len()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}
