// src/model/mod.rs
//! Typed records for one archived game: [`Game`] owns its [`Clue`]s, each
//! clue points back at its game by page id only.

mod clue;
mod game;
mod round;

pub use clue::{Clue, ClueKind, FinalPayload, Response};
pub use game::Game;
pub use round::Round;

/// Caller-supplied annotation hook (e.g. a remote dependency parser).
/// The result is stored verbatim; `None` leaves the field empty.
pub type Annotator<'a> = &'a dyn Fn(&str) -> Option<serde_json::Value>;
