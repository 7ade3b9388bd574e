// src/model/game.rs
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Clue, ClueKind, Round};
use crate::error::{CorpusError, Result};

fn reloaded() -> bool {
    true
}

/// One archived episode.
///
/// `categories` and `clues` always hold all three round keys; a round the
/// page does not have is an empty list. `clues[round]` is in board (display)
/// order; use [`Game::clues_in_order`] for selection order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Archive page id.
    pub id: u32,
    pub title: String,
    pub game_number: u32,
    pub weekday: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Category names as displayed on the board (case kept, entities decoded).
    pub categories: BTreeMap<Round, Vec<String>>,
    pub clues: BTreeMap<Round, Vec<Clue>>,
    /// True for anything deserialized from a saved corpus.
    #[serde(skip_serializing, default = "reloaded")]
    pub loaded: bool,
    /// Markup of the live page; never saved.
    #[serde(skip)]
    pub page_source: Option<String>,
}

impl Game {
    /// Empty game shell with all round keys present.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            game_number: 0,
            weekday: String::new(),
            day: 0,
            month: 0,
            year: 0,
            date: String::new(),
            categories: Round::ALL.iter().map(|&r| (r, Vec::new())).collect(),
            clues: Round::ALL.iter().map(|&r| (r, Vec::new())).collect(),
            loaded: false,
            page_source: None,
        }
    }

    pub fn categories_of(&self, round: Round) -> &[String] {
        self.categories.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clues_of(&self, round: Round) -> &[Clue] {
        self.clues.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every clue, round by round, in board order.
    pub fn all_clues(&self) -> impl Iterator<Item = &Clue> {
        Round::ALL.into_iter().flat_map(move |r| self.clues_of(r).iter())
    }

    /// Every clue in the order it was picked during play.
    pub fn clues_in_order(&self) -> Vec<&Clue> {
        let mut out: Vec<&Clue> = self.all_clues().collect();
        out.sort_by_key(|c| c.order_number);
        out
    }

    pub fn final_clue(&self) -> Option<&Clue> {
        self.clues_of(Round::FinalRound).first()
    }

    /// Contestant names in order of first appearance (selection order),
    /// Final-round roster included.
    pub fn contestants(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for clue in self.clues_in_order() {
            let roster = clue.final_payload().map(|p| p.contestants.as_slice()).unwrap_or(&[]);
            let names = clue.responses.iter().map(|r| &r.contestant).chain(roster.iter());
            for name in names {
                if seen.insert(name.as_str()) {
                    out.push(name.clone());
                }
            }
        }
        out
    }

    /// Run the annotation hook over clue and response texts not yet annotated.
    pub fn annotate(&mut self, hook: &dyn Fn(&str) -> Option<Value>) {
        for clues in self.clues.values_mut() {
            for clue in clues {
                clue.annotate(hook);
            }
        }
    }

    /// Check the structural invariants of a game record.
    pub fn validate(&self) -> Result<()> {
        let bad = |reason: String| -> Result<()> { Err(CorpusError::malformed(self.id, reason)) };

        for round in Round::ALL {
            if !self.categories.contains_key(&round) || !self.clues.contains_key(&round) {
                return bad(format!("round {round} missing from categories or clues"));
            }
        }
        if self.categories.len() != Round::ALL.len() || self.clues.len() != Round::ALL.len() {
            return bad(s!("unexpected round keys"));
        }
        if self.clues_of(Round::FinalRound).len() > 1 {
            return bad(s!("more than one final-round clue"));
        }

        let mut orders = HashSet::new();
        for (round, clues) in &self.clues {
            for clue in clues {
                let at = format!("{} clue #{}", round, clue.order_number);
                if clue.round != *round {
                    return bad(format!("{at} is filed under the wrong round"));
                }
                if clue.game != self.id {
                    return bad(format!("{at} belongs to game {}", clue.game));
                }
                if !self.categories_of(*round).contains(&clue.category) {
                    return bad(format!("{at} has unknown category {:?}", clue.category));
                }
                if !orders.insert(clue.order_number) {
                    return bad(format!("{at}: duplicate order number"));
                }
                match (&clue.kind, round.is_final()) {
                    (ClueKind::Final(p), true) => {
                        if p.contestants.len() != p.wagers.len() {
                            return bad(format!(
                                "{at}: {} contestants but {} wagers",
                                p.contestants.len(),
                                p.wagers.len()
                            ));
                        }
                        if let Some(r) = clue.responses.iter().find(|r| !p.contestants.contains(&r.contestant)) {
                            return bad(format!("{at}: response by non-finalist {:?}", r.contestant));
                        }
                    }
                    (ClueKind::Regular, false) => {}
                    _ => return bad(format!("{at}: clue kind does not match its round")),
                }
            }
        }
        Ok(())
    }
}
