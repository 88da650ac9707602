use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::WelcomeFeature;

/// Step-through modal shown on first launch.
#[derive(Debug, Clone)]
pub struct WelcomeTour {
    features: Vec<WelcomeFeature>,
    step: usize,
    open: bool,
}

impl WelcomeTour {
    pub fn new(features: Vec<WelcomeFeature>, open: bool) -> Self {
        Self {
            features,
            step: 0,
            open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn current(&self) -> Option<&WelcomeFeature> {
        if self.open {
            self.features.get(self.step)
        } else {
            None
        }
    }

    /// Advances one step; past the last feature the tour closes and rewinds.
    pub fn next(&mut self) {
        if self.step + 1 < self.features.len() {
            self.step += 1;
        } else {
            self.close();
        }
    }

    pub fn prev(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.step = 0;
    }

    /// Interactive navigation: empty input or `n` moves on, `p` goes back, `q` closes.
    pub fn handle_input(&mut self, input: &str) {
        match input.trim().to_lowercase().as_str() {
            "" | "n" | "next" => self.next(),
            "p" | "prev" | "back" => self.prev(),
            "q" | "quit" | "skip" => self.close(),
            _ => {}
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    has_visited_before: bool,
}

/// The one flag that survives between runs.
#[derive(Debug, Clone)]
pub struct VisitStore {
    path: PathBuf,
}

impl VisitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True exactly once per state file. The flag is best-effort: an unreadable
    /// state counts as visited and a failed write still reports the first visit.
    pub fn first_visit(&self) -> bool {
        let mut state = match self.load() {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable visit state");
                return false;
            }
        };
        if state.has_visited_before {
            return false;
        }

        state.has_visited_before = true;
        match self.save(&state) {
            Ok(()) => info!(path = %self.path.display(), "recorded first visit"),
            Err(err) => warn!(error = %err, "could not record first visit"),
        }
        true
    }

    fn load(&self) -> anyhow::Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    fn save(&self, state: &PersistedState) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn tour_walks_forward_and_closes() {
        let mut tour = WelcomeTour::new(fixtures::welcome_features(), true);
        assert_eq!(tour.current().unwrap().title, "Real-time Cost Monitoring");
        for _ in 0..3 {
            tour.next();
        }
        assert_eq!(tour.step(), 3);
        assert_eq!(tour.current().unwrap().title, "AI Assistant");

        tour.next();
        assert!(!tour.is_open());
        assert_eq!(tour.step(), 0);
        assert!(tour.current().is_none());
    }

    #[test]
    fn prev_stops_at_first_step() {
        let mut tour = WelcomeTour::new(fixtures::welcome_features(), true);
        tour.prev();
        assert_eq!(tour.step(), 0);
        tour.next();
        tour.prev();
        assert_eq!(tour.step(), 0);
        assert_eq!(tour.len(), 4);
    }

    #[test]
    fn input_drives_navigation() {
        let mut tour = WelcomeTour::new(fixtures::welcome_features(), true);
        tour.handle_input("");
        tour.handle_input("n");
        assert_eq!(tour.step(), 2);
        tour.handle_input("P");
        assert_eq!(tour.step(), 1);
        tour.handle_input("what?");
        assert_eq!(tour.step(), 1);
        tour.handle_input("q");
        assert!(!tour.is_open());
        assert_eq!(tour.step(), 0);
    }

    #[test]
    fn first_visit_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = VisitStore::new(dir.path().join("nested").join("state.json"));

        assert!(!store.path().exists());
        assert!(store.first_visit());
        assert!(!store.first_visit());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"hasVisitedBefore\": true"));
    }

    #[test]
    fn corrupt_state_counts_as_visited() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = VisitStore::new(&path);
        assert!(!store.first_visit());
        assert!(!store.first_visit());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn unwritable_state_still_reports_first_visit() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let store = VisitStore::new(blocker.join("state.json"));
        assert!(store.first_visit());
        assert!(!store.path().exists());
    }
}
