// src/specs/panel.rs
//! The hidden "correct response" panel of a clue.
//!
//! Legacy pages keep it inside a JS handler:
//! `onmouseover="toggle('clue_J_1_1', 'clue_J_1_1_stuck', '<panel html>')"`.
//! Current pages render it in a hidden cell with id `clue_J_1_1_r`.
//!
//! Panel layout (both formats):
//! ```text
//! (Ken: What is Kepler?) (Alex: No.)          <- quotes, before the target
//! <em class="correct_response">Copernicus</em>
//! <table><tr><td class="wrong">Ken</td><td class="right">Brad</td></tr></table>
//! ```
//! Final round rows pair a verdict cell and a response cell, then a wager row:
//! ```text
//! <tr><td class="right">Ken</td><td rowspan="2">What is X?</td></tr><tr><td>$3,000</td></tr>
//! ```

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::TRIPLE_STUMPER;
use crate::core::html::{before_ci, clean_text, has_class, sel, text_of};
use crate::core::sanitize::{parse_amount, unescape_js};
use crate::model::Response;

static TARGET: LazyLock<Selector> = LazyLock::new(|| sel("em.correct_response"));
static VERDICT: LazyLock<Selector> = LazyLock::new(|| sel("td.right, td.wrong"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mark {
    pub contestant: String,
    pub right: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalEntry {
    pub contestant: String,
    pub right: bool,
    pub response: String,
    pub wager: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    pub target: String,
    /// Verdict cells in answer order; the "Triple Stumper" cell is dropped.
    pub marks: Vec<Mark>,
    /// `(speaker, words)` quotes, host remarks included.
    pub quotes: Vec<(String, String)>,
    /// Final-round layout rows; empty on regular clues.
    pub final_entries: Vec<FinalEntry>,
}

/// Panel html from a legacy `toggle(...)` handler: its third argument.
pub fn toggle_payload(handler: &str) -> Option<String> {
    let key = "_stuck', '";
    let start = handler.find(key)? + key.len();
    let end = handler.rfind("')")?;
    if end < start {
        return None;
    }
    Some(unescape_js(&handler[start..end]))
}

/// Parse panel html. `None` when it has no target.
pub fn parse(panel_html: &str) -> Option<Panel> {
    let frag = Html::parse_fragment(panel_html);
    let target = frag.select(&TARGET).next().map(text_of)?;

    let marks = frag
        .select(&VERDICT)
        .filter_map(|td| {
            let contestant = text_of(td);
            if contestant.is_empty() || contestant.eq_ignore_ascii_case(TRIPLE_STUMPER) {
                return None;
            }
            Some(Mark { contestant, right: has_class(td, "right") })
        })
        .collect();

    Some(Panel {
        target,
        marks,
        quotes: quotes(&clean_text(before_ci(panel_html, "<em"))),
        final_entries: final_entries(&frag),
    })
}

/// `(Name: words)` groups, outermost parentheses only.
fn quotes(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut open = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 { open = i + 1; }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some((who, said)) = text[open..i].split_once(':') {
                        let who = who.trim();
                        if !who.is_empty() {
                            out.push((s!(who), s!(said.trim())));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn final_entries(frag: &Html) -> Vec<FinalEntry> {
    let mut out: Vec<FinalEntry> = Vec::new();
    let mut awaiting_wager = false;

    for tr in frag.select(&ROW) {
        let cells: Vec<ElementRef<'_>> = tr.select(&CELL).collect();
        let verdict = cells.iter().copied().find(|td| has_class(*td, "right") || has_class(*td, "wrong"));

        match verdict {
            Some(v) => {
                let contestant = text_of(v);
                if contestant.is_empty() || contestant.eq_ignore_ascii_case(TRIPLE_STUMPER) {
                    awaiting_wager = false;
                    continue;
                }
                let response = cells
                    .iter()
                    .copied()
                    .find(|td| *td != v)
                    .map(text_of)
                    .unwrap_or_default();
                out.push(FinalEntry { contestant, right: has_class(v, "right"), response, wager: None });
                awaiting_wager = true;
            }
            None if awaiting_wager => {
                if let (Some(last), Some(td)) = (out.last_mut(), cells.first()) {
                    last.wager = parse_amount(&text_of(*td));
                }
                awaiting_wager = false;
            }
            None => {}
        }
    }

    // A regular clue's single verdict row has no wager row after it.
    if out.iter().all(|e| e.wager.is_none()) {
        out.clear();
    }
    out
}

impl Panel {
    /// Responses of a regular clue, in verdict (buzz) order.
    ///
    /// A contestant's quote supplies their words; a right answer with no
    /// quote is recorded as the target itself, a wrong one as empty text.
    /// Quotes by anyone without a verdict cell (the host) are ignored.
    pub fn responses(&self) -> Vec<Response> {
        let mut used = vec![false; self.quotes.len()];
        self.marks
            .iter()
            .map(|m| {
                let quoted = self
                    .quotes
                    .iter()
                    .enumerate()
                    .position(|(i, (who, _))| !used[i] && who.eq_ignore_ascii_case(&m.contestant));
                let text = match quoted {
                    Some(i) => {
                        used[i] = true;
                        self.quotes[i].1.clone()
                    }
                    None if m.right => self.target.clone(),
                    None => s!(),
                };
                Response::new(m.contestant.clone(), text)
            })
            .collect()
    }
}
