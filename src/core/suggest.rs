/// "Did you mean" suggestions
///
/// Fuzzy-matches an unresolved token against every command name and
/// alias so typos get a useful hint instead of a bare failure.

use crate::store::Registry;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Minimum skim score before a candidate is worth offering. The matcher
/// already requires the whole token as a subsequence, so this only weeds
/// out weak scattered matches.
const MIN_SCORE: i64 = 20;

/// Suggests close matches for unknown tokens
pub struct Suggester<'a> {
    registry: &'a Registry,
    matcher: SkimMatcherV2,
}

impl<'a> Suggester<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Best-scoring known token, if any clears the threshold
    pub fn suggest(&self, token: &str) -> Option<String> {
        self.registry
            .tokens()
            .filter_map(|candidate| {
                self.matcher
                    .fuzzy_match(candidate, token)
                    .map(|score| (score, candidate))
            })
            .filter(|(score, _)| *score >= MIN_SCORE)
            .max_by_key(|(score, _)| *score)
            .map(|(_, candidate)| candidate.to_string())
    }
}
