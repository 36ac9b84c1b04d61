use anyhow::{Result, anyhow, bail};
use rand::seq::SliceRandom;
use strsim::levenshtein;

use crate::models::DEFAULT_PALETTE;

/// Find the most similar ID from a list of candidates
pub fn find_similar_id<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(id, _)| id)
}

/// "Not found" error with a suggestion when a close ID exists.
pub fn outcome_not_found(id: &str, candidates: &[&str]) -> anyhow::Error {
    match find_similar_id(id, candidates) {
        Some(suggestion) => anyhow!("Outcome not found: {id}\nDid you mean: {suggestion}"),
        None => anyhow!("Outcome not found: {id}"),
    }
}

/// Accepts `#rrggbb` (case-insensitive) and returns it lowercased.
pub fn normalize_color(color: &str) -> Result<String> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        bail!("Invalid color: {color}. Expected a hex color like #ff14bd.");
    }
    Ok(color.to_ascii_lowercase())
}

pub fn random_color() -> String {
    DEFAULT_PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_PALETTE[0])
        .to_owned()
}

pub fn check_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() || weight < 0.0 {
        bail!("Invalid weight: {weight}. Weights must be zero or positive.");
    }
    Ok(weight)
}

pub fn check_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        bail!("Label cannot be empty.");
    }
    Ok(label.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_find_similar_id() {
        let candidates = vec!["t8zwaROl", "xYz9Kp2m", "V1StGXR8"];

        assert_eq!(find_similar_id("t8zwaRO1", &candidates), Some("t8zwaROl"));

        assert_eq!(find_similar_id("xYz9Kp2n", &candidates), Some("xYz9Kp2m"));

        // Very different ID should return None
        assert_eq!(find_similar_id("zzzzz", &candidates), None);
    }

    #[test]
    fn not_found_suggests_close_id() {
        let err = outcome_not_found("abcdefgX", &["abcdefgh", "zzzzzzzz"]);
        assert!(err.to_string().contains("Did you mean: abcdefgh"));

        let err = outcome_not_found("qqqq", &["abcdefgh"]);
        assert!(!err.to_string().contains("Did you mean"));
    }

    #[rstest]
    #[case::lower("#ff14bd", "#ff14bd")]
    #[case::upper("#FF14BD", "#ff14bd")]
    #[case::padded("  #00b5b5 ", "#00b5b5")]
    fn colors_are_normalized(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_color(input).unwrap(), expected);
    }

    #[rstest]
    #[case::no_hash("ff14bd")]
    #[case::short("#fff")]
    #[case::not_hex("#gg14bd")]
    #[case::named("red")]
    fn bad_colors_are_rejected(#[case] input: &str) {
        assert!(normalize_color(input).is_err());
    }

    #[test]
    fn random_color_comes_from_palette() {
        let color = random_color();
        assert!(DEFAULT_PALETTE.contains(&color.as_str()));
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(12.5, true)]
    #[case(-1.0, false)]
    #[case(f64::INFINITY, false)]
    fn weight_check(#[case] weight: f64, #[case] ok: bool) {
        assert_eq!(check_weight(weight).is_ok(), ok);
    }

    #[test]
    fn label_is_trimmed_and_required() {
        assert_eq!(check_label("  x5 ").unwrap(), "x5");
        assert!(check_label("   ").is_err());
    }
}
