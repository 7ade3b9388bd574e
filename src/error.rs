// src/error.rs
use thiserror::Error;

/// Everything the corpus core can refuse to do.
///
/// Extraction errors carry the archive page id so a batch caller can report,
/// skip or retry the page without re-deriving where it came from.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A structural anchor (title block, round container, category row,
    /// clue value/order/target) is missing or inconsistent.
    #[error("malformed page {page_id}: {reason}")]
    MalformedPage { page_id: u32, reason: String },

    /// The title block has a date, but not one we can read.
    #[error("page {page_id}: cannot parse air date from {text:?}")]
    DateParse { page_id: u32, text: String },

    #[error("page step must be a positive integer, got {0}")]
    InvalidStep(i64),

    /// Archive page ids start at 1.
    #[error("first page id must be at least 1, got {0}")]
    InvalidStart(u32),

    /// Final-round query for someone who did not play the Final.
    #[error("{0:?} did not play the final round")]
    UnknownContestant(String),

    /// Reported by the caller-supplied fetch closure during batch collection.
    #[error("fetch failed for page {page_id}: {message}")]
    Fetch { page_id: u32, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    pub(crate) fn malformed(page_id: u32, reason: impl Into<String>) -> Self {
        CorpusError::MalformedPage { page_id, reason: reason.into() }
    }

    /// Page id the error refers to, if any.
    pub fn page_id(&self) -> Option<u32> {
        match self {
            CorpusError::MalformedPage { page_id, .. }
            | CorpusError::DateParse { page_id, .. }
            | CorpusError::Fetch { page_id, .. } => Some(*page_id),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
