// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod correct;
pub mod corpus;
pub mod pages;
pub mod progress;
pub mod score;
pub mod scrape;

pub use corpus::Corpus;
pub use correct::{Policy, Verdict};
pub use error::{CorpusError, Result};
pub use model::{Annotator, Clue, ClueKind, FinalPayload, Game, Response, Round};
pub use pages::{pages, Pages};
pub use score::score_series;
pub use specs::game::extract;
