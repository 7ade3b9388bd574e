// src/corpus.rs
//! Ordered collection of games.
//!
//! Insertion order is kept and nothing is deduplicated: loading the same
//! page twice gives two entries.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::model::Game;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Corpus {
    games: Vec<Game>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly extracted game.
    pub fn add(&mut self, mut game: Game) {
        game.loaded = false;
        self.games.push(game);
    }

    /// Take in previously saved games, replacing the current ones unless
    /// `append` is set.
    pub fn load_from(&mut self, records: impl IntoIterator<Item = Game>, append: bool) {
        if !append {
            self.games.clear();
        }
        self.games.extend(records.into_iter().map(|mut g| {
            g.loaded = true;
            g
        }));
    }

    /// JSON array of every game, in order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.games)?)
    }

    /// Parse a JSON array written by [`Corpus::to_json`] and load it.
    /// Returns how many games were read. On a parse error the corpus is
    /// left untouched.
    pub fn load_json(&mut self, text: &str, append: bool) -> Result<usize> {
        let records: Vec<Game> = serde_json::from_str(text)?;
        let n = records.len();
        self.load_from(records, append);
        Ok(n)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn get(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    /// Running scores of the game at `index`.
    pub fn score_series(&self, index: usize) -> Option<BTreeMap<String, Vec<i64>>> {
        self.games.get(index).map(crate::score::score_series)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

/// One `<game_number> <date>` line per game.
impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.games.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{} {}", g.game_number, g.date)?;
        }
        Ok(())
    }
}
