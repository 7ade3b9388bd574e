// src/core/html.rs
use scraper::{ElementRef, Selector};

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Everything before the first case-insensitive `pat`, or all of `s`.
pub fn before_ci<'a>(s: &'a str, pat: &str) -> &'a str {
    let lc = to_lower(s);
    match lc.find(&to_lower(pat)) {
        Some(i) => &s[..i],
        None => s,
    }
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Plain text of a raw markup fragment: tags dropped first, then entities
/// decoded, whitespace collapsed. A decoded `&lt;` stays a literal `<`.
pub fn clean_text(s: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(s)))
}

/// Visible text of an element. The parser has already removed the markup,
/// so only leftover (double-escaped) entities are decoded; `<` and `>` in
/// the text are kept.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&normalize_entities(&el.text().collect::<String>()))
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn id_of<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("id")
}

/// Compile a selector known at build time.
pub fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {css:?}: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<i>The</i>\n  <b>Raven</b> "), "The Raven");
    }

    #[test]
    fn clean_text_decodes_leftover_entities() {
        assert_eq!(clean_text("Tom &amp;amp; Jerry"), "Tom & Jerry");
        assert_eq!(clean_text("<i>x &lt; 5</i> and <b>y &gt; 2</b>"), "x < 5 and y > 2");
    }

    #[test]
    fn text_of_keeps_angle_brackets() {
        let doc = Html::parse_fragment("<p>If x &lt; 5 and y &gt; 2, <i>then</i> what?</p>");
        let p = doc.select(&sel("p")).next().unwrap();
        assert_eq!(text_of(p), "If x < 5 and y > 2, then what?");
    }

    #[test]
    fn before_ci_is_case_insensitive() {
        assert_eq!(before_ci("(Ken: Hi)<EM>x</em>", "<em"), "(Ken: Hi)");
        assert_eq!(before_ci("no marker", "<em"), "no marker");
    }

    #[test]
    fn element_helpers() {
        let doc = Html::parse_fragment(r#"<div id="a" class="x y">  Hello <b>you</b> </div>"#);
        let div = doc.select(&sel("div")).next().unwrap();
        assert_eq!(text_of(div), "Hello you");
        assert!(has_class(div, "y"));
        assert!(!has_class(div, "z"));
        assert_eq!(id_of(div), Some("a"));
    }
}
