#![forbid(unsafe_code)]

/// Upper bound on resolved suggestions returned to the caller.
pub const SUGGESTION_CAP: usize = 10;

/// A design offered to the matcher: its identifier plus the display name
/// matching operates on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub display: String,
}

/// Matching strategies in priority order. The first strategy that produces a
/// hit for a token wins; later strategies are only consulted when earlier
/// ones find nothing.
#[derive(Clone, Copy, Debug)]
enum Strategy {
    /// Case-insensitive equality on the display name.
    Exact,
    /// Bidirectional substring: the display contains the token, or the token
    /// contains the display.
    Substring,
}

const STRATEGIES: &[Strategy] = &[Strategy::Exact, Strategy::Substring];

/// Resolves free-text tokens against a candidate pool, exact matches first,
/// then bidirectional substring. Resolved ids are deduplicated and capped.
/// Tokens with no resolution are dropped.
pub fn resolve_against_pool(tokens: &[String], pool: &[Candidate], cap: usize) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::new();
    for token in tokens {
        let token_lower = token.trim().to_lowercase();
        if token_lower.is_empty() {
            continue;
        }
        let hit = STRATEGIES
            .iter()
            .find_map(|strategy| apply_strategy(*strategy, &token_lower, pool));
        if let Some(candidate) = hit {
            if !resolved.contains(&candidate.id) {
                resolved.push(candidate.id.clone());
            }
            if resolved.len() == cap {
                break;
            }
        }
    }
    resolved
}

fn apply_strategy<'a>(
    strategy: Strategy,
    token_lower: &str,
    pool: &'a [Candidate],
) -> Option<&'a Candidate> {
    pool.iter().find(|candidate| {
        let display_lower = candidate.display.to_lowercase();
        match strategy {
            Strategy::Exact => display_lower == token_lower,
            Strategy::Substring => {
                display_lower.contains(token_lower) || token_lower.contains(display_lower.as_str())
            }
        }
    })
}

/// Splits a text-generation reply into candidate tokens. Accepts both
/// comma-separated and bulleted replies; trims bullet markers and ordinal
/// prefixes; drops empty tokens and case-insensitive `NONE`.
pub fn parse_completion_list(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in text.lines() {
        for piece in line.split(',') {
            let token = strip_list_marker(piece.trim());
            if token.is_empty() || token.eq_ignore_ascii_case("none") {
                continue;
            }
            tokens.push(token.to_string());
        }
    }
    tokens
}

fn strip_list_marker(token: &str) -> &str {
    let token = token.trim_start_matches(['-', '*', '•']).trim_start();
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && (rest.starts_with('.') || rest.starts_with(')')) {
        return rest[1..].trim_start();
    }
    token
}

/// Lowercased whitespace tokens of a niche name, keeping only tokens longer
/// than 2 characters (short tokens match too broadly).
pub fn keyword_tokens(niche_name: &str) -> Vec<String> {
    niche_name
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Candidates whose display name contains any keyword token, capped,
/// preserving pool order.
pub fn keyword_matches(tokens: &[String], pool: &[Candidate], cap: usize) -> Vec<String> {
    if tokens.is_empty() {
        return Vec::new();
    }
    pool.iter()
        .filter(|candidate| {
            let display_lower = candidate.display.to_lowercase();
            tokens.iter().any(|token| display_lower.contains(token.as_str()))
        })
        .take(cap)
        .map(|candidate| candidate.id.clone())
        .collect()
}

/// Evenly-stepped sample of at most `max` items, preserving order. Used to
/// keep prompt context bounded while still spanning the whole pool.
pub fn sample_evenly<T: Clone>(items: &[T], max: usize) -> Vec<T> {
    if max == 0 {
        return Vec::new();
    }
    if items.len() <= max {
        return items.to_vec();
    }
    let step = (items.len() / max).max(1);
    let mut sampled = Vec::with_capacity(max);
    let mut index = 0;
    while index < items.len() && sampled.len() < max {
        sampled.push(items[index].clone());
        index += step;
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(entries: &[(&str, &str)]) -> Vec<Candidate> {
        entries
            .iter()
            .map(|(id, display)| Candidate {
                id: id.to_string(),
                display: display.to_string(),
            })
            .collect()
    }

    #[test]
    fn exact_match_beats_substring() {
        let pool = pool(&[("d1", "Baby Era Deluxe"), ("d2", "Baby Era")]);
        let tokens = vec!["baby era".to_string()];
        assert_eq!(resolve_against_pool(&tokens, &pool, 10), vec!["d2"]);
    }

    #[test]
    fn substring_matches_both_directions() {
        let pool = pool(&[("d1", "Senior Era"), ("d2", "Gamer")]);
        // Token contained in a display name.
        let contained = resolve_against_pool(&["senior".to_string()], &pool, 10);
        assert_eq!(contained, vec!["d1"]);
        // Display name contained in a longer token.
        let containing = resolve_against_pool(&["the gamer design".to_string()], &pool, 10);
        assert_eq!(containing, vec!["d2"]);
    }

    #[test]
    fn unresolved_tokens_are_dropped() {
        let pool = pool(&[("d1", "Baby")]);
        let tokens = vec!["zzz".to_string(), "baby".to_string()];
        assert_eq!(resolve_against_pool(&tokens, &pool, 10), vec!["d1"]);
    }

    #[test]
    fn resolution_dedups_and_caps() {
        let pool: Vec<Candidate> = (0..20)
            .map(|i| Candidate {
                id: format!("d{i}"),
                display: format!("Design {i:02}"),
            })
            .collect();
        let mut tokens: Vec<String> = (0..20).map(|i| format!("Design {i:02}")).collect();
        tokens.push("Design 00".to_string());
        let resolved = resolve_against_pool(&tokens, &pool, SUGGESTION_CAP);
        assert_eq!(resolved.len(), SUGGESTION_CAP);
        assert_eq!(resolved[0], "d0");
    }

    #[test]
    fn parses_comma_and_bullet_lists() {
        let reply = "- Baby Era, Teacher Life\n* Gamer\n2. Senior Era\nNONE";
        assert_eq!(
            parse_completion_list(reply),
            vec!["Baby Era", "Teacher Life", "Gamer", "Senior Era"]
        );
    }

    #[test]
    fn none_reply_parses_to_nothing() {
        assert!(parse_completion_list("NONE").is_empty());
        assert!(parse_completion_list("none\n").is_empty());
        assert!(parse_completion_list("  ,  , ").is_empty());
    }

    #[test]
    fn keyword_tokens_drop_short_words() {
        assert_eq!(keyword_tokens("In My Sports Era"), vec!["sports", "era"]);
        assert!(keyword_tokens("a b c").is_empty());
    }

    #[test]
    fn keyword_matching_caps_and_preserves_order() {
        let pool: Vec<Candidate> = (0..15)
            .map(|i| Candidate {
                id: format!("d{i}"),
                display: format!("Sports Fan {i}"),
            })
            .collect();
        let matched = keyword_matches(&["sports".to_string()], &pool, SUGGESTION_CAP);
        assert_eq!(matched.len(), SUGGESTION_CAP);
        assert_eq!(matched[0], "d0");
    }

    #[test]
    fn sampling_spans_the_pool() {
        let items: Vec<usize> = (0..100).collect();
        let sampled = sample_evenly(&items, 10);
        assert_eq!(sampled.len(), 10);
        assert_eq!(sampled[0], 0);
        assert!(sampled.last().copied().unwrap() >= 80);
    }

    #[test]
    fn sampling_returns_small_pools_whole() {
        let items: Vec<usize> = (0..5).collect();
        assert_eq!(sample_evenly(&items, 10), items);
    }
}
