// src/specs/game.rs
//! Scraping *spec* for one archived game page (`showgame.php?game_id=N`).
//!
//! Page anchors this relies on:
//! - `div#game_title`: `Show #4680 - Monday, January 3, 2005`
//! - `div#jeopardy_round`, `div#double_jeopardy_round`, `div#final_jeopardy_round`
//! - `td.category_name` per round, left to right
//! - `td.clue` per board cell, holding `td.clue_value` or
//!   `td.clue_value_daily_double`, `td.clue_order_number`, and
//!   `td.clue_text#clue_<R>_<col>_<row>`
//! - the response panel (see [`super::panel`])
//!
//! The first round container, the title and every round's category row are
//! required; a missing second or Final round just leaves that round empty.
//! Nothing partial is ever returned.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use scraper::{ElementRef, Html, Selector};

use super::panel::{self, Panel};
use crate::config::consts::{MISSING_GAME_PREFIX, MISSING_GAME_SUFFIX};
use crate::core::html::{id_of, sel, text_of};
use crate::core::sanitize::parse_amount;
use crate::correct::is_match;
use crate::error::{CorpusError, Result};
use crate::model::{Annotator, Clue, ClueKind, FinalPayload, Game, Response, Round};

static GAME_TITLE: LazyLock<Selector> = LazyLock::new(|| sel("#game_title"));
static FIRST_ROUND: LazyLock<Selector> = LazyLock::new(|| round_div(Round::FirstRound));
static SECOND_ROUND: LazyLock<Selector> = LazyLock::new(|| round_div(Round::SecondRound));
static FINAL_ROUND: LazyLock<Selector> = LazyLock::new(|| round_div(Round::FinalRound));
static CATEGORY_NAME: LazyLock<Selector> = LazyLock::new(|| sel("td.category_name"));
static FINAL_TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table.final_round"));
static TIEBREAKER_TEXT: LazyLock<Selector> = LazyLock::new(|| sel(r#"td.clue_text[id^="clue_TJ"]"#));
static CLUE_CELL: LazyLock<Selector> = LazyLock::new(|| sel("td.clue"));
static CLUE_TEXT: LazyLock<Selector> = LazyLock::new(|| sel("td.clue_text"));
static CLUE_VALUE: LazyLock<Selector> = LazyLock::new(|| sel("td.clue_value"));
static CLUE_VALUE_DD: LazyLock<Selector> = LazyLock::new(|| sel("td.clue_value_daily_double"));
static ORDER_NUMBER: LazyLock<Selector> = LazyLock::new(|| sel("td.clue_order_number"));
static TOGGLE: LazyLock<Selector> = LazyLock::new(|| sel("[onmouseover]"));
static WITH_ID: LazyLock<Selector> = LazyLock::new(|| sel("[id]"));

fn round_div(round: Round) -> Selector {
    sel(&join!("div#", round.container_id()))
}

fn container(round: Round) -> &'static Selector {
    match round {
        Round::FirstRound => &FIRST_ROUND,
        Round::SecondRound => &SECOND_ROUND,
        Round::FinalRound => &FINAL_ROUND,
    }
}

/// Header fields read from the title block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleInfo {
    pub game_number: u32,
    pub weekday: String,
    pub date: NaiveDate,
}

/// Board position of a clue, from its text cell id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub round: Round,
    pub column: Option<u32>,
    pub row: Option<u32>,
}

/// Did the archive answer with its "no such game" page?
pub fn is_missing_game(html: &str, page_id: u32) -> bool {
    html.contains(&join!(MISSING_GAME_PREFIX, &page_id.to_string(), MISSING_GAME_SUFFIX))
}

/// `Show #4680 - Monday, January 3, 2005` -> (4680, "Monday", 2005-01-03).
pub fn parse_title(title: &str, page_id: u32) -> Result<TitleInfo> {
    let hash = title
        .find('#')
        .ok_or_else(|| CorpusError::malformed(page_id, format!("title has no show number: {title:?}")))?;
    let after = &title[hash + 1..];
    let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    let game_number = digits
        .parse::<u32>()
        .map_err(|_| CorpusError::malformed(page_id, format!("title has no show number: {title:?}")))?;

    let rest = &after[digits.len()..];
    let date_err = || CorpusError::DateParse { page_id, text: s!(rest.trim()) };
    let (head, date_text) = rest.split_once(',').ok_or_else(date_err)?;
    let weekday = head
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .last()
        .ok_or_else(date_err)?;
    let date = NaiveDate::parse_from_str(date_text.trim(), "%B %d, %Y").map_err(|_| date_err())?;

    Ok(TitleInfo { game_number, weekday: s!(weekday), date })
}

/// `clue_J_3_2` -> first round, column 3, row 2; `clue_FJ` -> Final.
/// Tiebreaker cells (`clue_TJ`) and response cells (`.._r`) give `None`.
pub fn parse_clue_id(id: &str) -> Option<Coord> {
    let mut parts = id.strip_prefix("clue_")?.split('_');
    let round = Round::from_coord_prefix(parts.next()?)?;
    if round.is_final() {
        return parts.next().is_none().then_some(Coord { round, column: None, row: None });
    }
    let column = parts.next()?.parse().ok()?;
    let row = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coord { round, column: Some(column), row: Some(row) })
}

/// Build a validated [`Game`] from a parsed archive page.
///
/// `annotate`, when given, is run once over each clue text and each
/// response text and its result stored verbatim.
pub fn extract(doc: &Html, page_id: u32, annotate: Option<Annotator<'_>>) -> Result<Game> {
    let t = Instant::now();

    let title_el = doc
        .select(&GAME_TITLE)
        .next()
        .ok_or_else(|| CorpusError::malformed(page_id, "missing #game_title block"))?;
    let title = text_of(title_el);
    let info = parse_title(&title, page_id)?;

    let mut game = Game::new(page_id, title);
    game.game_number = info.game_number;
    game.weekday = info.weekday;
    game.day = info.date.day();
    game.month = info.date.month();
    game.year = info.date.year();
    game.date = info.date.format("%Y-%m-%d").to_string();

    // Categories first: clues look theirs up by column.
    let mut containers: Vec<(Round, ElementRef<'_>)> = Vec::with_capacity(3);
    for round in Round::ALL {
        let Some(div) = doc.select(container(round)).next() else {
            if round == Round::FirstRound {
                return Err(CorpusError::malformed(page_id, "missing first-round container"));
            }
            logd!("Game {page_id}: no {round} on page");
            continue;
        };
        let names = category_names(div);
        if names.is_empty() {
            return Err(CorpusError::malformed(page_id, format!("{round} has no category headers")));
        }
        game.categories.insert(round, names);
        containers.push((round, div));
    }

    let mut drafts: Vec<Draft> = Vec::new();
    for (round, div) in &containers {
        for cell in div.select(&CLUE_CELL) {
            if let Some(d) = read_cell(&game, *round, *div, cell)? {
                drafts.push(d);
            }
        }
    }
    if drafts.is_empty() {
        return Err(CorpusError::malformed(page_id, "page has no revealed clues"));
    }

    number_clues(page_id, &mut drafts)?;
    for d in drafts {
        game.clues.entry(d.clue.round).or_default().push(d.clue);
    }
    game.validate()?;

    if let Some(hook) = annotate {
        game.annotate(hook);
    }
    game.page_source = Some(doc.html());
    game.loaded = false;

    logd!("Game {page_id}: extracted {} clues in {:?}", game.all_clues().count(), t.elapsed());
    Ok(game)
}

/// Category headers of a round container, left to right.
///
/// The Final container can hold a second `table.final_round` for a
/// tiebreaker; its header belongs to no kept clue and is left out.
fn category_names(div: ElementRef<'_>) -> Vec<String> {
    let tables: Vec<ElementRef<'_>> = div.select(&FINAL_TABLE).collect();
    if tables.is_empty() {
        return div.select(&CATEGORY_NAME).map(text_of).collect();
    }
    tables
        .into_iter()
        .filter(|t| t.select(&TIEBREAKER_TEXT).next().is_none())
        .flat_map(|t| t.select(&CATEGORY_NAME).map(text_of).collect::<Vec<_>>())
        .collect()
}

/// A clue plus its per-round pick number, before global numbering.
struct Draft {
    clue: Clue,
    local_order: Option<u32>,
}

fn read_cell(game: &Game, container_round: Round, div: ElementRef<'_>, cell: ElementRef<'_>) -> Result<Option<Draft>> {
    let page_id = game.id;

    let Some((text_el, id)) = cell
        .select(&CLUE_TEXT)
        .filter_map(|e| id_of(e).map(|id| (e, id)))
        .find(|(_, id)| !id.ends_with("_r"))
    else {
        logd!("Game {page_id}: unrevealed clue in {container_round}");
        return Ok(None);
    };
    if id.starts_with("clue_TJ") {
        logd!("Game {page_id}: skipping tiebreaker clue");
        return Ok(None);
    }
    let coord = parse_clue_id(id)
        .ok_or_else(|| CorpusError::malformed(page_id, format!("unreadable clue id {id:?}")))?;
    if coord.round != container_round {
        logw!(
            "Game {page_id}: clue {id} sits in {container_round} but its id says {}; using the id",
            coord.round
        );
    }
    let round = coord.round;

    let categories = game.categories_of(round);
    let category = match coord.column {
        Some(col) => col.checked_sub(1).and_then(|i| categories.get(i as usize)),
        None => categories.first(),
    }
    .cloned()
    .ok_or_else(|| CorpusError::malformed(page_id, format!("clue {id} has no matching category")))?;

    // The Final's panel hangs off the category cell, not the clue cell.
    let scope = if round.is_final() { div } else { cell };
    let panel = find_panel(scope, id)
        .ok_or_else(|| CorpusError::malformed(page_id, format!("clue {id} has no correct response")))?;

    let mut clue = Clue {
        game: page_id,
        round,
        category,
        daily_double: false,
        value: 0,
        text: text_of(text_el),
        target: panel.target.clone(),
        responses: Vec::new(),
        order_number: 0,
        row: coord.row,
        column: coord.column,
        text_annotation: None,
        response_annotations: Vec::new(),
        kind: ClueKind::Regular,
    };

    if round.is_final() {
        let mut payload = FinalPayload::default();
        for entry in panel.final_entries {
            let wager = entry.wager.ok_or_else(|| {
                CorpusError::malformed(page_id, format!("final wager missing for {}", entry.contestant))
            })?;
            if entry.right != is_match(&entry.response, &panel.target) {
                logd!(
                    "Game {page_id}: {} marked {} on the final but {:?} reads otherwise",
                    entry.contestant,
                    if entry.right { "right" } else { "wrong" },
                    entry.response
                );
            }
            clue.responses.push(Response::new(entry.contestant.clone(), entry.response));
            payload.contestants.push(entry.contestant);
            payload.wagers.push(wager);
        }
        clue.kind = ClueKind::Final(payload);
        return Ok(Some(Draft { clue, local_order: None }));
    }

    let (daily_double, value_el) = match cell.select(&CLUE_VALUE).next() {
        Some(v) => (false, v),
        None => (
            true,
            cell.select(&CLUE_VALUE_DD)
                .next()
                .ok_or_else(|| CorpusError::malformed(page_id, format!("clue {id} has no value")))?,
        ),
    };
    clue.daily_double = daily_double;
    clue.value = parse_amount(&text_of(value_el))
        .ok_or_else(|| CorpusError::malformed(page_id, format!("clue {id} has unreadable value")))?;

    let local_order = cell
        .select(&ORDER_NUMBER)
        .next()
        .and_then(|o| text_of(o).parse::<u32>().ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| CorpusError::malformed(page_id, format!("clue {id} has no selection order")))?;

    clue.responses = panel.responses();
    Ok(Some(Draft { clue, local_order: Some(local_order) }))
}

/// Locate and parse the response panel for clue `id` inside `scope`:
/// current `#<id>_r` cell first, then a legacy `toggle(...)` handler.
fn find_panel(scope: ElementRef<'_>, id: &str) -> Option<Panel> {
    let response_id = join!(id, "_r");
    if let Some(cell) = scope.select(&WITH_ID).find(|e| id_of(*e) == Some(response_id.as_str())) {
        return panel::parse(&cell.inner_html());
    }

    let stuck = join!("'", id, "_stuck'");
    scope
        .select(&TOGGLE)
        .filter_map(|e| e.value().attr("onmouseover"))
        .filter(|h| h.contains(&stuck) && h.contains("correct_response"))
        .find_map(|h| panel::toggle_payload(h).and_then(|html| panel::parse(&html)))
}

/// Turn per-round pick numbers into one game-wide sequence.
///
/// Round `n` is offset by the highest pick number of the rounds before it;
/// the Final comes right after the last regular pick.
fn number_clues(page_id: u32, drafts: &mut [Draft]) -> Result<()> {
    let mut offset = 0u32;
    for round in Round::ALL {
        let mut seen = HashSet::new();
        let mut highest = 0u32;
        for d in drafts.iter_mut().filter(|d| d.clue.round == round) {
            let local = d.local_order.unwrap_or(1);
            if !seen.insert(local) {
                return Err(CorpusError::malformed(
                    page_id,
                    format!("{round} has two clues picked at #{local}"),
                ));
            }
            highest = highest.max(local);
            d.clue.order_number = offset + local;
        }
        offset += highest;
    }
    Ok(())
}
