// src/correct.rs
//! Was a clue answered correctly?
//!
//! A response counts as correct when it *matches* the clue's target under
//! [`normalize_answer`]:
//! - lowercase, `&` read as `and`, every other non-alphanumeric char dropped
//!   (apostrophes vanish, other punctuation becomes a space);
//! - one leading question frame removed (`what is`, `who are`, `whats`, ...);
//! - one leading article removed (`a`, `an`, `the`);
//! - whitespace collapsed.
//!
//! The target is tried twice: with parenthesised parts removed
//! (`(Nicolaus) Copernicus` -> `Copernicus`) and with only the parentheses
//! removed (`Nicolaus Copernicus`). An empty response never matches.

use std::fmt;
use std::str::FromStr;

use crate::error::{CorpusError, Result};
use crate::model::{Clue, ClueKind};

const QUESTION_FRAMES: &[&str] = &[
    "what is", "what are", "what was", "what were",
    "who is", "who are", "who was", "who were",
    "where is", "where are", "where was",
    "when is", "when was",
    "whats", "whos", "wheres",
];

const ARTICLES: &[&str] = &["a", "an", "the"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// At least one response matches.
    Any,
    /// No response matches (true for zero responses).
    AnyFalse,
    /// Every existing response is a miss; vacuously true with none.
    NoCorrect,
    /// Number of responses.
    Length,
    /// `(contestant, matched)` per response, in response order.
    All,
}

impl Policy {
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Any => "any",
            Policy::AnyFalse => "any-false",
            Policy::NoCorrect => "no-correct",
            Policy::Length => "length",
            Policy::All => "all",
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Policy::Any),
            "any-false" | "any_false" => Ok(Policy::AnyFalse),
            "no-correct" | "no_correct" => Ok(Policy::NoCorrect),
            "length" | "len" => Ok(Policy::Length),
            "all" => Ok(Policy::All),
            other => Err(format!("Unknown correctness policy: {}", other)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Flag(bool),
    Count(usize),
    PerResponse(Vec<(String, bool)>),
}

impl Verdict {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Verdict::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            Verdict::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn per_response(&self) -> Option<&[(String, bool)]> {
        match self {
            Verdict::PerResponse(v) => Some(v),
            _ => None,
        }
    }
}

/// Canonical form of an answer, see the module docs.
pub fn normalize_answer(s: &str) -> String {
    let mut flat = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match ch {
            '&' => flat.push_str(" and "),
            '\'' | '\u{2019}' | '`' => {}
            c if c.is_alphanumeric() => flat.push(c),
            _ => flat.push(' '),
        }
    }
    let words: Vec<&str> = flat.split_whitespace().collect();

    let frame = QUESTION_FRAMES
        .iter()
        .map(|f| f.split(' ').collect::<Vec<_>>())
        .find(|f| words.len() > f.len() && words[..f.len()] == f[..])
        .map_or(0, |f| f.len());
    let mut rest = &words[frame..];
    if rest.len() > 1 && ARTICLES.contains(&rest[0]) {
        rest = &rest[1..];
    }
    rest.join(" ")
}

fn target_forms(target: &str) -> [String; 2] {
    let mut without = String::with_capacity(target.len());
    let mut depth = 0usize;
    for ch in target.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 => without.push(c),
            _ => {}
        }
    }
    let unwrapped: String = target.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    [normalize_answer(&without), normalize_answer(&unwrapped)]
}

/// Does `response` match `target`?
pub fn is_match(response: &str, target: &str) -> bool {
    let r = normalize_answer(response);
    if r.is_empty() {
        return false;
    }
    target_forms(target).iter().any(|t| !t.is_empty() && *t == r)
}

fn evaluate<'a>(matches: impl Iterator<Item = (&'a str, bool)>, policy: Policy) -> Verdict {
    let pairs: Vec<(&str, bool)> = matches.collect();
    match policy {
        Policy::Any => Verdict::Flag(pairs.iter().any(|&(_, ok)| ok)),
        Policy::AnyFalse => Verdict::Flag(!pairs.iter().any(|&(_, ok)| ok)),
        Policy::NoCorrect => Verdict::Flag(pairs.iter().all(|&(_, ok)| !ok)),
        Policy::Length => Verdict::Count(pairs.len()),
        Policy::All => Verdict::PerResponse(pairs.into_iter().map(|(n, ok)| (s!(n), ok)).collect()),
    }
}

impl Clue {
    /// Correctness of all responses to this clue under `policy`.
    pub fn correct(&self, policy: Policy) -> Verdict {
        evaluate(
            self.responses.iter().map(|r| (r.contestant.as_str(), is_match(&r.text, &self.target))),
            policy,
        )
    }

    /// Same, restricted to one contestant's responses.
    ///
    /// On a Final-round clue the name must be on the Final roster, else
    /// [`CorpusError::UnknownContestant`]. Regular clues have no roster, so
    /// the filter only narrows the responses (possibly to none).
    pub fn correct_for(&self, policy: Policy, contestant: &str) -> Result<Verdict> {
        if let ClueKind::Final(p) = &self.kind {
            if p.position(contestant).is_none() {
                return Err(CorpusError::UnknownContestant(s!(contestant)));
            }
        }
        Ok(evaluate(
            self.responses_of(contestant).map(|r| (r.contestant.as_str(), is_match(&r.text, &self.target))),
            policy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinalPayload, Response, Round};

    fn clue(target: &str, responses: &[(&str, &str)]) -> Clue {
        Clue {
            game: 1,
            round: Round::FirstRound,
            category: s!("HISTORY"),
            daily_double: false,
            value: 400,
            text: s!("clue"),
            target: s!(target),
            responses: responses.iter().map(|(c, t)| Response::new(*c, *t)).collect(),
            order_number: 1,
            row: Some(1),
            column: Some(1),
            text_annotation: None,
            response_annotations: Vec::new(),
            kind: ClueKind::Regular,
        }
    }

    #[test]
    fn normalization_rule() {
        assert_eq!(normalize_answer("What is the Nile?"), "nile");
        assert_eq!(normalize_answer("Who's Dr. No"), "dr no");
        assert_eq!(normalize_answer("Rock & Roll"), "rock and roll");
        assert_eq!(normalize_answer("  O'Keeffe "), "okeeffe");
        // A bare frame or article is kept rather than emptied.
        assert_eq!(normalize_answer("What is"), "what is");
        assert_eq!(normalize_answer("The"), "the");
    }

    #[test]
    fn matching_handles_frames_articles_and_parentheses() {
        assert!(is_match("What is Copernicus?", "(Nicolaus) Copernicus"));
        assert!(is_match("Who is Nicolaus Copernicus", "(Nicolaus) Copernicus"));
        assert!(is_match("a martini", "(a) martini"));
        assert!(is_match("WHAT ARE THE BEATLES", "The Beatles"));
        assert!(!is_match("What is Kepler?", "Copernicus"));
        assert!(!is_match("", "Copernicus"));
        assert!(!is_match("What is?", "Mars"));
    }

    #[test]
    fn zero_responses_policies() {
        let c = clue("Mars", &[]);
        assert_eq!(c.correct(Policy::Any), Verdict::Flag(false));
        assert_eq!(c.correct(Policy::AnyFalse), Verdict::Flag(true));
        assert_eq!(c.correct(Policy::NoCorrect), Verdict::Flag(true));
        assert_eq!(c.correct(Policy::Length), Verdict::Count(0));
        assert_eq!(c.correct(Policy::All), Verdict::PerResponse(vec![]));
    }

    #[test]
    fn mixed_responses() {
        let c = clue("Mars", &[("Ann", "What is Venus?"), ("Bo", "What is Mars?")]);
        assert_eq!(c.correct(Policy::Any).as_bool(), Some(true));
        assert_eq!(c.correct(Policy::AnyFalse).as_bool(), Some(false));
        assert_eq!(c.correct(Policy::NoCorrect).as_bool(), Some(false));
        assert_eq!(c.correct(Policy::Length).as_count(), Some(2));
        assert_eq!(
            c.correct(Policy::All),
            Verdict::PerResponse(vec![(s!("Ann"), false), (s!("Bo"), true)])
        );
    }

    #[test]
    fn all_wrong() {
        let c = clue("Mars", &[("Ann", "What is Venus?")]);
        assert_eq!(c.correct(Policy::NoCorrect).as_bool(), Some(true));
        assert_eq!(c.correct(Policy::AnyFalse).as_bool(), Some(true));
    }

    #[test]
    fn contestant_filter_on_final() {
        let mut c = clue("Mars", &[("Ann", "What is Mars?"), ("Bo", "Venus")]);
        c.round = Round::FinalRound;
        c.kind = ClueKind::Final(FinalPayload {
            contestants: vec![s!("Ann"), s!("Bo")],
            wagers: vec![100, 200],
        });
        assert_eq!(c.correct_for(Policy::Any, "Ann").unwrap(), Verdict::Flag(true));
        assert_eq!(c.correct_for(Policy::Any, "Bo").unwrap(), Verdict::Flag(false));
        assert!(matches!(
            c.correct_for(Policy::Any, "Cy"),
            Err(CorpusError::UnknownContestant(name)) if name == "Cy"
        ));
    }

    #[test]
    fn contestant_filter_on_regular_narrows() {
        let c = clue("Mars", &[("Ann", "What is Mars?")]);
        assert_eq!(c.correct_for(Policy::Length, "Bo").unwrap(), Verdict::Count(0));
        assert_eq!(c.correct_for(Policy::Any, "Ann").unwrap(), Verdict::Flag(true));
    }

    #[test]
    fn policy_names_round_trip() {
        for p in [Policy::Any, Policy::AnyFalse, Policy::NoCorrect, Policy::Length, Policy::All] {
            assert_eq!(p.as_str().parse::<Policy>().unwrap(), p);
        }
        assert!("sometimes".parse::<Policy>().is_err());
    }
}
