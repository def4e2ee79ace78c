//! Closed word lists used to classify tokens.
//!
//! These lists are fixed; comparisons are case-insensitive.

/// Personal and possessive pronouns.
pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "me", "us", "we", "them", "him", "her", "his", "hers", "my",
    "yours", "ours", "our",
];

/// Articles.
pub const ARTICLES: &[&str] = &["a", "an", "the"];

/// Penn Treebank noun tags.
pub const NOUN_TAGS: &[&str] = &["NN", "NNS", "NNP", "NNPS"];

fn contains_ignore_case(list: &[&str], word: &str) -> bool {
    list.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Returns true if `word` is a pronoun.
///
/// ```
/// use corefer::lexicon::is_pronoun;
///
/// assert!(is_pronoun("He"));
/// assert!(!is_pronoun("Obama"));
/// ```
#[must_use]
pub fn is_pronoun(word: &str) -> bool {
    contains_ignore_case(PRONOUNS, word)
}

/// Returns true if `word` is an article.
#[must_use]
pub fn is_article(word: &str) -> bool {
    contains_ignore_case(ARTICLES, word)
}

/// Returns true if `tag` is a noun part-of-speech tag.
#[must_use]
pub fn is_noun_tag(tag: &str) -> bool {
    contains_ignore_case(NOUN_TAGS, tag)
}

/// Returns true for `NNP` / `NNPS`.
#[must_use]
pub fn is_proper_noun_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("NNP") || tag.eq_ignore_ascii_case("NNPS")
}

/// Returns true for `NNS` / `NNPS`.
#[must_use]
pub fn is_plural_noun_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("NNS") || tag.eq_ignore_ascii_case("NNPS")
}

/// A gloss is a pronoun mention when it is a single pronoun token.
#[must_use]
pub fn is_pronoun_mention(gloss: &str) -> bool {
    let mut words = gloss.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => is_pronoun(word),
        _ => false,
    }
}
