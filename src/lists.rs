//! Resolve a raw `#hint` to one of the user's existing lists
//!
//! Tiers are tried in order: exact (case-insensitive), prefix, substring, then
//! word overlap. Within a tier the first candidate in input order wins.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Prefix,
    Substring,
    WordOverlap,
}

/// Best list name for `hint`, if any candidate is close enough
pub fn resolve_list<'a, S: AsRef<str>>(hint: &str, lists: &'a [S]) -> Option<&'a str> {
    resolve_list_with_tier(hint, lists).map(|(name, _)| name)
}

pub fn resolve_list_with_tier<'a, S: AsRef<str>>(
    hint: &str,
    lists: &'a [S],
) -> Option<(&'a str, MatchTier)> {
    let needle = normalize(hint);
    if needle.is_empty() {
        return None;
    }

    let names = || lists.iter().map(|l| l.as_ref());
    let found = names()
        .find(|name| normalize(name) == needle)
        .map(|name| (name, MatchTier::Exact))
        .or_else(|| {
            names()
                .find(|name| normalize(name).starts_with(&needle))
                .map(|name| (name, MatchTier::Prefix))
        })
        .or_else(|| {
            names()
                .find(|name| normalize(name).contains(&needle))
                .map(|name| (name, MatchTier::Substring))
        })
        .or_else(|| {
            let hint_words = words(hint);
            names()
                .map(|name| (name, words(name).iter().filter(|w| hint_words.contains(w)).count()))
                .filter(|(_, overlap)| *overlap > 0)
                .fold(None, |best: Option<(&str, usize)>, (name, overlap)| match best {
                    Some((_, top)) if top >= overlap => best,
                    _ => Some((name, overlap)),
                })
                .map(|(name, _)| (name, MatchTier::WordOverlap))
        });

    debug!("Resolved list hint '{}' -> {:?}", hint, found);
    found
}

/// Lowercase with separators removed, so "Side_Projects" equals "side projects"
fn normalize(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

fn words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
