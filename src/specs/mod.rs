// src/specs/mod.rs
//! # Scraping "specs"
//!
//! Where the ground truth lives in an archive page, and how to read it.
//! Each spec works on an already-parsed document; nothing here fetches,
//! caches or decides which pages to visit.
//!
//! ## Typical call chain
//! ```text
//! caller fetch → scraper::Html → specs::game::extract(doc, id, hook)
//!                                 ↘ specs::panel::parse (per clue)
//!                  Corpus::add (outside of specs)
//! ```
//!
//! ## Conventions
//! - Selectors are `LazyLock` statics scoped to the block they read
//!   (a round container, a clue cell, a response panel).
//! - A page either yields a fully validated [`crate::Game`] or a
//!   [`crate::CorpusError`]; nothing partial escapes.
//! - Log when precedence matters (coordinate vs. container round), stay
//!   quiet otherwise.
//!
//! Testable offline against captured pages (`tests/fixtures`).
pub mod game;
pub mod panel;
