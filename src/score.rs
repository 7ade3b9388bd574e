// src/score.rs
//! Running scores, replayed in selection order.

use std::collections::BTreeMap;

use crate::correct::{Policy, is_match};
use crate::model::{Clue, ClueKind, Game};

/// Score change per contestant for one clue, in response order.
///
/// Regular clues move each responder by `±value`. On the Final each
/// finalist moves by `±` their own wager, judged on their own response;
/// a finalist with no recorded response is left alone.
pub fn clue_deltas(clue: &Clue) -> Vec<(String, i64)> {
    match &clue.kind {
        ClueKind::Regular => clue
            .responses
            .iter()
            .map(|r| {
                let value = i64::from(clue.value);
                let delta = if is_match(&r.text, &clue.target) { value } else { -value };
                (r.contestant.clone(), delta)
            })
            .collect(),
        ClueKind::Final(p) => p
            .contestants
            .iter()
            .zip(&p.wagers)
            .flat_map(|(name, &wager)| {
                let judged = clue
                    .correct_for(Policy::All, name)
                    .ok()
                    .and_then(|v| v.per_response().map(<[_]>::to_vec))
                    .unwrap_or_default();
                judged.into_iter().map(move |(who, ok)| {
                    let wager = i64::from(wager);
                    (who, if ok { wager } else { -wager })
                })
            })
            .collect(),
    }
}

/// Each contestant's total after every clue of the game.
///
/// All series have one entry per clue (sorted by `order_number`), so they
/// line up for plotting; a contestant who sat a clue out repeats their
/// previous total.
pub fn score_series(game: &Game) -> BTreeMap<String, Vec<i64>> {
    let clues = game.clues_in_order();
    let mut totals: BTreeMap<String, i64> = game.contestants().into_iter().map(|c| (c, 0)).collect();
    let mut series: BTreeMap<String, Vec<i64>> =
        totals.keys().map(|c| (c.clone(), Vec::with_capacity(clues.len()))).collect();

    for clue in clues {
        for (who, delta) in clue_deltas(clue) {
            *totals.entry(who).or_insert(0) += delta;
        }
        for (who, total) in &totals {
            if let Some(s) = series.get_mut(who) {
                s.push(*total);
            }
        }
    }
    series
}

/// Final totals, i.e. the last entry of each series.
pub fn final_scores(game: &Game) -> BTreeMap<String, i64> {
    score_series(game)
        .into_iter()
        .map(|(who, s)| (who, s.last().copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinalPayload, Response, Round};

    fn clue(order: u32, value: u32, responses: &[(&str, &str)]) -> Clue {
        Clue {
            game: 3,
            round: Round::FirstRound,
            category: s!("MATH"),
            daily_double: false,
            value,
            text: s!("2 + 2"),
            target: s!("4"),
            responses: responses.iter().map(|(c, t)| Response::new(*c, *t)).collect(),
            order_number: order,
            row: Some(1),
            column: Some(1),
            text_annotation: None,
            response_annotations: Vec::new(),
            kind: ClueKind::Regular,
        }
    }

    fn game(clues: Vec<Clue>) -> Game {
        let mut g = Game::new(3, "Show #3");
        g.categories.insert(Round::FirstRound, vec![s!("MATH")]);
        g.clues.insert(Round::FirstRound, clues);
        g
    }

    #[test]
    fn right_adds_wrong_subtracts_absent_carries() {
        let g = game(vec![
            clue(1, 200, &[("Ann", "What is 5?"), ("Bo", "What is 4?")]),
            clue(2, 400, &[("Ann", "4")]),
            clue(3, 600, &[]),
        ]);
        let s = score_series(&g);
        assert_eq!(s["Ann"], vec![-200, 200, 200]);
        assert_eq!(s["Bo"], vec![200, 200, 200]);
    }

    #[test]
    fn board_order_does_not_matter_selection_order_does() {
        let a = clue(1, 200, &[("Ann", "4")]);
        let b = clue(2, 1000, &[("Ann", "5")]);
        let forward = score_series(&game(vec![a.clone(), b.clone()]));
        let shuffled = score_series(&game(vec![b.clone(), a.clone()]));
        assert_eq!(forward, shuffled);
        assert_eq!(forward["Ann"], vec![200, -800]);

        // Swap the two picks: the intermediate total changes, the end does not.
        let (mut a2, mut b2) = (a, b);
        a2.order_number = 2;
        b2.order_number = 1;
        let swapped = score_series(&game(vec![a2, b2]));
        assert_eq!(swapped["Ann"], vec![-1000, -800]);
    }

    #[test]
    fn deltas_sum_to_final_entry() {
        let clues = vec![
            clue(1, 200, &[("Ann", "4"), ("Bo", "3")]),
            clue(2, 800, &[("Bo", "4")]),
            clue(3, 400, &[("Ann", "nope")]),
        ];
        let g = game(clues.clone());
        let finals = final_scores(&g);
        for who in ["Ann", "Bo"] {
            let sum: i64 = clues
                .iter()
                .flat_map(clue_deltas)
                .filter(|(w, _)| w == who)
                .map(|(_, d)| d)
                .sum();
            assert_eq!(finals[who], sum);
        }
    }

    #[test]
    fn final_uses_individual_wagers() {
        let mut fin = clue(2, 0, &[("Ann", "What is 4?"), ("Bo", "What is 22?")]);
        fin.round = Round::FinalRound;
        fin.kind = ClueKind::Final(FinalPayload {
            contestants: vec![s!("Ann"), s!("Bo")],
            wagers: vec![1000, 300],
        });
        let mut g = game(vec![clue(1, 400, &[("Bo", "4")])]);
        g.categories.insert(Round::FinalRound, vec![s!("MATH")]);
        g.clues.insert(Round::FinalRound, vec![fin]);

        let s = score_series(&g);
        assert_eq!(s["Ann"], vec![0, 1000]);
        assert_eq!(s["Bo"], vec![400, 100]);
    }

    #[test]
    fn deterministic() {
        let g = game(vec![clue(1, 200, &[("Ann", "4")]), clue(2, 200, &[("Bo", "x")])]);
        assert_eq!(score_series(&g), score_series(&g.clone()));
    }
}
