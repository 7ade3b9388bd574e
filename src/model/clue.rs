// src/model/clue.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Round;

/// One contestant's answer to a clue, in buzz order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub contestant: String,
    pub text: String,
}

impl Response {
    pub fn new(contestant: impl Into<String>, text: impl Into<String>) -> Self {
        Self { contestant: contestant.into(), text: text.into() }
    }
}

/// Final-round-only data. `contestants[i]` wagered `wagers[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPayload {
    pub contestants: Vec<String>,
    pub wagers: Vec<u32>,
}

impl FinalPayload {
    pub fn wager_of(&self, contestant: &str) -> Option<u32> {
        self.position(contestant).and_then(|i| self.wagers.get(i).copied())
    }

    pub fn position(&self, contestant: &str) -> Option<usize> {
        self.contestants.iter().position(|c| c == contestant)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClueKind {
    Regular,
    Final(FinalPayload),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    /// Page id of the owning game.
    pub game: u32,
    pub round: Round,
    pub category: String,
    pub daily_double: bool,
    /// Board value, or the wager for a daily double. Zero for the Final.
    pub value: u32,
    pub text: String,
    pub target: String,
    pub responses: Vec<Response>,
    /// Selection order across the whole game, starting at 1.
    pub order_number: u32,
    pub row: Option<u32>,
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_annotation: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_annotations: Vec<Option<Value>>,
    pub kind: ClueKind,
}

impl Clue {
    pub fn final_payload(&self) -> Option<&FinalPayload> {
        match &self.kind {
            ClueKind::Final(p) => Some(p),
            ClueKind::Regular => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self.kind, ClueKind::Final(_))
    }

    /// Responses given by `contestant`, in order.
    pub fn responses_of<'a>(&'a self, contestant: &'a str) -> impl Iterator<Item = &'a Response> + 'a {
        self.responses.iter().filter(move |r| r.contestant == contestant)
    }

    /// Fill missing annotations; texts already annotated are not sent again.
    pub fn annotate(&mut self, hook: &dyn Fn(&str) -> Option<Value>) {
        if self.text_annotation.is_none() && !self.text.is_empty() {
            self.text_annotation = hook(&self.text);
        }
        if self.response_annotations.is_empty() && !self.responses.is_empty() {
            self.response_annotations = self.responses.iter().map(|r| hook(&r.text)).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_clue() -> Clue {
        Clue {
            game: 7,
            round: Round::FinalRound,
            category: s!("RIVERS"),
            daily_double: false,
            value: 0,
            text: s!("It flows north"),
            target: s!("the Nile"),
            responses: vec![Response::new("Ann", "What is the Nile?")],
            order_number: 61,
            row: None,
            column: None,
            text_annotation: None,
            response_annotations: Vec::new(),
            kind: ClueKind::Final(FinalPayload {
                contestants: vec![s!("Ann"), s!("Bo")],
                wagers: vec![500, 0],
            }),
        }
    }

    #[test]
    fn final_kind_is_tagged_in_json() {
        let v = serde_json::to_value(final_clue()).unwrap();
        assert_eq!(v["kind"]["kind"], "final");
        assert_eq!(v["kind"]["wagers"][0], 500);
        assert!(v.get("text_annotation").is_none());
    }

    #[test]
    fn wager_lookup_is_positional() {
        let clue = final_clue();
        let p = clue.final_payload().unwrap();
        assert_eq!(p.wager_of("Bo"), Some(0));
        assert_eq!(p.wager_of("Cy"), None);
    }

    #[test]
    fn annotate_fills_once() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let hook = |t: &str| {
            calls.set(calls.get() + 1);
            Some(Value::String(t.to_uppercase()))
        };
        let mut clue = final_clue();
        clue.annotate(&hook);
        clue.annotate(&hook);
        assert_eq!(calls.get(), 2);
        assert_eq!(clue.text_annotation, Some(Value::String(s!("IT FLOWS NORTH"))));
        assert_eq!(clue.response_annotations.len(), 1);
    }
}
