use crate::config::Config;
use crate::matcher::FuzzyMatcher;
use crate::model::Entry;
use crate::sources::custom::CustomLaunchables;

/// The result list for one query: matching installed apps followed by the
/// shortcut entries built from the query.
pub struct SearchState {
    config: Config,
    entries: Vec<Entry>,
    custom: Option<CustomLaunchables>,
    results: Vec<Entry>,
    query: String,
    matcher: FuzzyMatcher,
}

impl SearchState {
    pub fn new(config: Config, custom: Option<CustomLaunchables>) -> Self {
        Self {
            config,
            entries: Vec::new(),
            custom,
            results: Vec::new(),
            query: String::new(),
            matcher: FuzzyMatcher::new(),
        }
    }

    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.update_filter();
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Entry] {
        &self.results
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.results.get(index)
    }

    fn update_filter(&mut self) {
        let query = self.query.trim();

        let mut indices: Vec<usize> = if query.is_empty() {
            self.entries.iter_mut().for_each(|e| e.score = 0);
            (0..self.entries.len()).collect()
        } else {
            self.matcher.match_entries(query, &mut self.entries);
            (0..self.entries.len()).filter(|&i| self.entries[i].score > 0).collect()
        };

        let entries = &self.entries;
        indices.sort_by(|&a, &b| {
            entries[b].score
                .cmp(&entries[a].score)
                .then_with(|| entries[a].label().cmp(entries[b].label()))
        });

        let mut results: Vec<Entry> = indices
            .into_iter()
            .take(self.config.search.max_results)
            .map(|i| self.entries[i].clone())
            .collect();

        if !query.is_empty() && self.config.sources.custom_launchables {
            if let Some(custom) = &self.custom {
                results.extend(custom.entries_for(&self.query));
            }
        }

        log::info!("SearchState: query='{}', results={}", self.query, results.len());
        self.results = results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::model::{ComponentName, EntryKind, Target};
    use crate::packages::{ActivityInfo, PackageManager};

    struct NoPackages;

    impl PackageManager for NoPackages {
        fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo, LookupError> {
            Err(LookupError::NameNotFound(component.clone()))
        }
    }

    fn app(label: &str) -> Entry {
        let target = Target::Command { command: label.to_lowercase(), terminal: false };
        Entry::new(label, label, EntryKind::App, target)
    }

    fn state(config: Config) -> SearchState {
        let mut state = SearchState::new(config, Some(CustomLaunchables::new(&NoPackages)));
        state.set_entries(vec![app("Terminal"), app("Firefox"), app("Files"), app("Calculator")]);
        state
    }

    fn labels(state: &SearchState) -> Vec<&str> {
        state.results().iter().map(Entry::label).collect()
    }

    #[test]
    fn test_empty_query_lists_apps_by_label() {
        let state = state(Config::default());
        assert_eq!(labels(&state), vec!["Calculator", "Files", "Firefox", "Terminal"]);
    }

    #[test]
    fn test_query_appends_shortcuts_after_apps() {
        let mut state = state(Config::default());
        state.update_query("fire");

        let results = state.results();
        assert_eq!(results.first().map(Entry::label), Some("Firefox"));
        assert_eq!(results.last().map(Entry::kind), Some(EntryKind::WebSearch));
        assert!(results.iter().all(|e| e.label() != "Terminal"));
    }

    #[test]
    fn test_no_app_match_still_offers_web_search() {
        let mut state = state(Config::default());
        state.update_query("zzzzqqq");
        assert_eq!(labels(&state), vec!["Duck Duck Go"]);
    }

    #[test]
    fn test_shortcuts_get_the_query_as_typed() {
        let mut state = state(Config::default());
        state.update_query(" coffee shop ");

        let web = state.results().last().unwrap();
        match web.target() {
            Target::Intent(intent) => {
                assert_eq!(intent.uri, "https://www.duckduckgo.com/?q=%20coffee%20shop%20")
            }
            other => panic!("not an intent: {:?}", other),
        }
    }

    #[test]
    fn test_blank_query_offers_no_shortcuts() {
        let mut state = state(Config::default());
        state.update_query("   ");
        assert!(state.results().iter().all(|e| e.kind() == EntryKind::App));
    }

    #[test]
    fn test_shortcuts_can_be_disabled() {
        let mut config = Config::default();
        config.sources.custom_launchables = false;
        let mut state = state(config);
        state.update_query("zzzzqqq");
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_max_results_caps_apps_only() {
        let mut config = Config::default();
        config.search.max_results = 1;
        let mut state = state(config);
        state.update_query("f");

        let kinds: Vec<EntryKind> = state.results().iter().map(Entry::kind).collect();
        assert_eq!(kinds, vec![EntryKind::App, EntryKind::WebSearch]);
    }

    #[test]
    fn test_get_by_index() {
        let mut state = state(Config::default());
        state.update_query("calc");
        assert_eq!(state.get(0).map(Entry::label), Some("Calculator"));
        assert!(state.get(99).is_none());
    }
}
