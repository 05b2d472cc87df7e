//! Text vectorization used to compare search histories.

mod stopwords;
mod tfidf;

pub use stopwords::is_stop_word;
pub use tfidf::{cosine_similarity, SparseVector, TfidfVectorizer};

use once_cell::sync::Lazy;
use regex::Regex;

// Words of two or more word characters.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid token pattern"));

/// Lowercased word tokens with English stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        assert_eq!(
            tokenize("The Basics of Machine Learning"),
            vec!["basics", "machine", "learning"]
        );
    }

    #[test]
    fn test_tokenize_skips_single_characters_and_punctuation() {
        assert_eq!(
            tokenize("C++ & R: a data-science intro"),
            vec!["data", "science", "intro"]
        );
    }

    #[test]
    fn test_tokenize_keeps_unicode_words() {
        assert_eq!(tokenize("Cuisine française"), vec!["cuisine", "française"]);
    }

    #[test]
    fn test_tokenize_only_stop_words() {
        assert!(tokenize("the and of").is_empty());
        assert!(tokenize("").is_empty());
    }
}
