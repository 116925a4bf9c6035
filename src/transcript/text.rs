use std::collections::BTreeMap;

/// Number of whitespace-separated tokens, punctuation included.
pub fn raw_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normalize a single token: lowercase, keep only alphanumerics and apostrophes.
fn normalize_token(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .collect()
}

/// Lowercased words with surrounding punctuation stripped. Tokens that are
/// nothing but punctuation are dropped.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Words longer than `min_len` characters.
pub fn words_longer_than(text: &str, min_len: usize) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| w.chars().count() > min_len)
        .collect()
}

/// Lowercase runs of word characters. Apostrophes, hyphens and all other
/// punctuation act as boundaries, so "don't" yields "don" and "t".
pub fn boundary_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Lowercase word runs for phrase matching. Words inside a run are separated
/// only by whitespace; any punctuation ends the run, so "you, know" gives
/// `[["you"], ["know"]]` while "you know" gives `[["you", "know"]]`.
pub fn phrase_runs(text: &str) -> Vec<Vec<String>> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace()))
        .map(|run| run.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
        .filter(|run| !run.is_empty())
        .collect()
}

/// Whether any run contains `phrase` as consecutive words.
pub fn contains_phrase(runs: &[Vec<String>], phrase: &[&str]) -> bool {
    count_phrase(runs, phrase) > 0
}

/// Number of positions where `phrase` starts, never spanning two runs.
/// Overlapping matches each count.
pub fn count_phrase(runs: &[Vec<String>], phrase: &[&str]) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    runs.iter()
        .filter(|run| run.len() >= phrase.len())
        .map(|run| {
            run.windows(phrase.len())
                .filter(|window| window.iter().zip(phrase).all(|(token, word)| token == word))
                .count()
        })
        .sum()
}

/// Sentences split on runs of `.`, `!` and `?`. Blank pieces are skipped.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn sentence_count(text: &str) -> usize {
    sentences(text).len()
}

/// Occurrence count per word.
pub fn word_frequencies<I, S>(words: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut freq = BTreeMap::new();
    for word in words {
        *freq.entry(word.into()).or_insert(0) += 1;
    }
    freq
}
