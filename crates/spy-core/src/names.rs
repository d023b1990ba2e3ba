//! Fuzzy resolution of free-text player references onto the roster.

use strsim::jaro_winkler;

/// Characters stripped from both ends of a candidate before matching.
const TRIM_CHARS: &[char] = &[
    '[', ']', '(', ')', '{', '}', '<', '>', '"', '\'', '.', ',', ';', ':', '!', '?', '`', '*',
    '【', '】', '（', '）', '“', '”', '‘', '’', '。', '，', '；', '：', '！', '？', '、',
];

/// Strip an end-of-speech token and surrounding punctuation from a reference.
pub fn clean_reference(text: &str, end_of_speech: &str) -> String {
    let text = if end_of_speech.is_empty() {
        text
    } else {
        text.split(end_of_speech).next().unwrap_or(text)
    };
    text.trim_matches(|c: char| c.is_whitespace() || TRIM_CHARS.contains(&c))
        .to_string()
}

/// Map a free-text reference onto one of `known`.
///
/// Exact case-insensitive matches win, then the longest known name contained
/// in the reference, then the highest Jaro-Winkler similarity. Ties keep the
/// earliest name in `known`. Returns `None` only if `known` is empty.
pub fn resolve<S: AsRef<str>>(candidate: &str, known: &[S]) -> Option<String> {
    let input = candidate.trim().to_lowercase();

    if let Some(exact) = known
        .iter()
        .find(|n| n.as_ref().trim().to_lowercase() == input)
    {
        return Some(exact.as_ref().to_string());
    }

    let mut contained: Option<&str> = None;
    for name in known {
        let lower = name.as_ref().trim().to_lowercase();
        if !lower.is_empty()
            && input.contains(&lower)
            && contained.is_none_or(|best| best.trim().chars().count() < lower.chars().count())
        {
            contained = Some(name.as_ref());
        }
    }
    if let Some(name) = contained {
        return Some(name.to_string());
    }

    let mut best: Option<(&str, f64)> = None;
    for name in known {
        let score = jaro_winkler(&input, &name.as_ref().trim().to_lowercase());
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((name.as_ref(), score));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave"];

    #[test]
    fn exact_match_is_case_insensitive() {
        assert_eq!(resolve("carol", NAMES).as_deref(), Some("Carol"));
        assert_eq!(resolve("  BOB ", NAMES).as_deref(), Some("Bob"));
    }

    #[test]
    fn typo_resolves_to_closest() {
        assert_eq!(resolve("Alcie", NAMES).as_deref(), Some("Alice"));
        assert_eq!(resolve("Dav", NAMES).as_deref(), Some("Dave"));
    }

    #[test]
    fn name_inside_sentence() {
        assert_eq!(
            resolve("I think it is Carol for sure", NAMES).as_deref(),
            Some("Carol")
        );
    }

    #[test]
    fn always_returns_a_known_name() {
        let got = resolve("zzzzzz", NAMES).unwrap();
        assert!(NAMES.contains(&got.as_str()));
    }

    #[test]
    fn empty_roster_yields_none() {
        assert!(resolve::<&str>("Alice", &[]).is_none());
    }

    #[test]
    fn deterministic_for_same_input() {
        let a = resolve("qqq", NAMES);
        let b = resolve("qqq", NAMES);
        assert_eq!(a, b);
    }

    #[test]
    fn similarity_tie_keeps_roster_order() {
        assert_eq!(resolve("x", &["Ann", "Bea"]).as_deref(), Some("Ann"));
    }

    #[test]
    fn clean_strips_eos_and_brackets() {
        assert_eq!(clean_reference(" [Bob]<EOS> trailing", "<EOS>"), "Bob");
        assert_eq!(clean_reference("“小明”。", "<EOS>"), "小明");
    }
}
