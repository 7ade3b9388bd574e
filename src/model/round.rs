// src/model/round.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::consts::{FINAL_ROUND_ID, FIRST_ROUND_ID, SECOND_ROUND_ID};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    FirstRound,
    SecondRound,
    FinalRound,
}

impl Round {
    pub const ALL: [Round; 3] = [Round::FirstRound, Round::SecondRound, Round::FinalRound];

    pub fn as_str(self) -> &'static str {
        match self {
            Round::FirstRound => "first_round",
            Round::SecondRound => "second_round",
            Round::FinalRound => "final_round",
        }
    }

    /// `id` of the round's container `<div>` on an archive page.
    pub fn container_id(self) -> &'static str {
        match self {
            Round::FirstRound => FIRST_ROUND_ID,
            Round::SecondRound => SECOND_ROUND_ID,
            Round::FinalRound => FINAL_ROUND_ID,
        }
    }

    /// Round from the prefix of a clue cell id (`clue_J_..`, `clue_DJ_..`, `clue_FJ`).
    pub fn from_coord_prefix(prefix: &str) -> Option<Round> {
        match prefix {
            "J" => Some(Round::FirstRound),
            "DJ" => Some(Round::SecondRound),
            "FJ" => Some(Round::FinalRound),
            _ => None,
        }
    }

    pub fn is_final(self) -> bool {
        self == Round::FinalRound
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
