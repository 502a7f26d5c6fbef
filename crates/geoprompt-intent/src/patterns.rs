//! Pattern tables for reading free text.
//!
//! Precedence lives in the order of each table: directive rules are tried
//! top to bottom, location patterns likewise, and the first dataset keyword
//! group that matches decides the dataset.

use std::sync::LazyLock;

use geoprompt_core::models::DataType;
use regex::Regex;

/// Directives recognized before falling through to query execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    CenterOn,
    Explain,
}

/// One directive rule: a pattern and the directive it selects
#[derive(Debug)]
pub struct DirectiveRule {
    pub kind: DirectiveKind,
    pub pattern: Regex,
}

/// Directive rules in precedence order (center > explain)
pub static DIRECTIVE_RULES: LazyLock<Vec<DirectiveRule>> = LazyLock::new(|| {
    vec![
        DirectiveRule {
            kind: DirectiveKind::CenterOn,
            pattern: Regex::new(
                r"(?i)^\s*(?:cent(?:er|re)|go to|move|fly)\s+(?:map\s+)?(?:(?:on|to)\s+)?(.+)$",
            )
            .expect("center pattern is valid"),
        },
        DirectiveRule {
            kind: DirectiveKind::Explain,
            pattern: Regex::new(r"(?i)\b(?:available|types|what)\b").expect("explain pattern is valid"),
        },
    ]
});

/// Location patterns in precedence order; capture group 1 is the place
pub static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:in|near|around|of|at|from)\s+(\p{L}[\p{L}-]*)")
            .expect("prepositional location pattern is valid"),
        Regex::new(
            r"(?i)\b(\p{L}[\p{L}-]*)\s+(?:buildings?|roads?|streets?|highways?|landuse|parks?|areas?|zones?)\b",
        )
        .expect("place-before-noun pattern is valid"),
    ]
});

static RADIUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:km|kilomet(?:er|re)s?)\b").expect("radius pattern is valid")
});

/// Words that the location patterns capture but never name a place
pub const LOCATION_STOPWORDS: [&str; 34] = [
    "a", "all", "an", "any", "area", "big", "city", "data", "display", "every", "find", "get",
    "here", "large", "list", "main", "major", "map", "me", "my", "nearby", "new", "old", "our",
    "show", "small", "some", "tall", "tallest", "that", "the", "there", "these", "this",
];

/// Dataset keywords, first matching group wins
pub const DATASET_KEYWORDS: [(DataType, &[&str]); 3] = [
    (DataType::Buildings, &["building"]),
    (DataType::Roads, &["road", "highway", "street"]),
    (DataType::Landuse, &["landuse", "area", "zone", "park", "residential", "commercial"]),
];

/// Words of the center directive itself, never a place on their own
const CENTER_KEYWORDS: [&str; 3] = ["map", "on", "to"];

/// First directive rule matching `text`, with the cleaned place for
/// [`DirectiveKind::CenterOn`]. A center rule whose place trims to nothing,
/// or to directive keywords only, does not match.
pub fn match_directive(text: &str) -> Option<(DirectiveKind, Option<String>)> {
    DIRECTIVE_RULES.iter().find_map(|rule| {
        let captures = rule.pattern.captures(text)?;
        match rule.kind {
            DirectiveKind::CenterOn => {
                let place = clean_place(captures.get(1)?.as_str());
                (!is_keyword_only(place)).then(|| (rule.kind, Some(place.to_string())))
            }
            DirectiveKind::Explain => Some((rule.kind, None)),
        }
    })
}

/// Trim trailing whitespace and punctuation from a captured place
pub fn clean_place(place: &str) -> &str {
    place.trim().trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
}

fn is_keyword_only(place: &str) -> bool {
    place
        .split_whitespace()
        .all(|word| CENTER_KEYWORDS.iter().any(|keyword| word.eq_ignore_ascii_case(keyword)))
}

fn is_stopword(word: &str) -> bool {
    let word = word.to_lowercase();
    LOCATION_STOPWORDS.contains(&word.as_str())
}

/// Place named in `text`, if any
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str())
            .find(|word| !is_stopword(word))
            .map(str::to_string)
    })
}

/// Radius in kilometers named in `text`, if any and positive
pub fn extract_radius(text: &str) -> Option<f64> {
    let captures = RADIUS_PATTERN.captures(text)?;
    let radius: f64 = captures.get(1)?.as_str().parse().ok()?;
    (radius > 0.0).then_some(radius)
}

/// Dataset named in `text` by keyword, if any
pub fn classify_dataset(text: &str) -> Option<DataType> {
    let text = text.to_lowercase();
    DATASET_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(data_type, _)| *data_type)
}
