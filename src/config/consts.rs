// src/config/consts.rs

// Archive
pub const HOST: &str = "www.j-archive.com";
pub const GAME_PATH: &str = "/showgame.php?game_id=";

/// Body text of the page served for an id past the end of the archive:
/// `ERROR: No game <id> in database.`
pub const MISSING_GAME_PREFIX: &str = "ERROR: No game ";
pub const MISSING_GAME_SUFFIX: &str = " in database.";

// Page anchors
pub const FIRST_ROUND_ID: &str = "jeopardy_round";
pub const SECOND_ROUND_ID: &str = "double_jeopardy_round";
pub const FINAL_ROUND_ID: &str = "final_jeopardy_round";

/// Verdict cell text when nobody answered; not a contestant.
pub const TRIPLE_STUMPER: &str = "Triple Stumper";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Page range
pub const DEFAULT_START: u32 = 1;
pub const DEFAULT_STEP: i64 = 1;

/// Archive URL for a page id, for callers that own the fetch layer.
pub fn game_url(page_id: u32) -> String {
    join!("http://", HOST, GAME_PATH, &page_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_url_has_id_as_query() {
        assert_eq!(game_url(173), "http://www.j-archive.com/showgame.php?game_id=173");
    }
}
