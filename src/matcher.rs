use crate::model::Entry;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Scores every entry label against `query`. Non-matches get -1.
    pub fn match_entries(&mut self, query: &str, entries: &mut [Entry]) {
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();

        for entry in entries.iter_mut() {
            let haystack = Utf32Str::new(entry.label(), &mut buf);
            entry.score = match pattern.score(haystack, &mut self.matcher) {
                Some(score) => score as i64,
                None => -1,
            };
        }
    }
}
