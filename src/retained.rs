//! Retained audio set
//!
//! Clip names the host wants kept resident across scene changes. Adding a
//! name twice loads it once; removing it releases the asset exactly once.

use crate::backend::AssetLoader;

/// At-most-once membership list gating asset loads
#[derive(Debug, Default)]
pub struct RetainedAudioSet {
    // Plain list, retained sets stay small
    names: Vec<String>,
}

impl RetainedAudioSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Add a name, requesting a load only on first insertion
    ///
    /// Returns `true` if the name was newly added.
    pub fn add<L: AssetLoader>(&mut self, loader: &mut L, name: &str) -> bool {
        if self.contains(name) {
            tracing::debug!("Clip {} already retained", name);
            return false;
        }

        self.names.push(name.to_string());
        loader.request_load(name);
        true
    }

    /// Remove a name, releasing the asset only if it was present
    ///
    /// Returns `true` if the name was removed.
    pub fn remove<L: AssetLoader>(&mut self, loader: &mut L, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);

        if self.names.len() == before {
            return false;
        }

        loader.release(name);
        true
    }

    /// Check if a name is retained
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of retained names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The retained names, in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLoader {
        loads: Vec<String>,
        releases: Vec<String>,
    }

    impl AssetLoader for RecordingLoader {
        fn request_load(&mut self, name: &str) {
            self.loads.push(name.to_string());
        }

        fn release(&mut self, name: &str) {
            self.releases.push(name.to_string());
        }
    }

    #[test]
    fn test_add_loads_once() {
        let mut loader = RecordingLoader::default();
        let mut set = RetainedAudioSet::new();

        assert!(set.add(&mut loader, "ambience.mp3"));
        assert!(!set.add(&mut loader, "ambience.mp3"));

        assert_eq!(set.len(), 1);
        assert_eq!(loader.loads, vec!["ambience.mp3"]);
    }

    #[test]
    fn test_remove_releases_once() {
        let mut loader = RecordingLoader::default();
        let mut set = RetainedAudioSet::new();

        set.add(&mut loader, "ambience.mp3");
        assert!(set.remove(&mut loader, "ambience.mp3"));
        assert!(!set.remove(&mut loader, "ambience.mp3"));

        assert!(set.is_empty());
        assert_eq!(loader.releases, vec!["ambience.mp3"]);
    }

    #[test]
    fn test_remove_absent_name_skips_release() {
        let mut loader = RecordingLoader::default();
        let mut set = RetainedAudioSet::new();

        assert!(!set.remove(&mut loader, "never-added.mp3"));
        assert!(loader.releases.is_empty());
    }

    #[test]
    fn test_contains_and_order() {
        let mut loader = RecordingLoader::default();
        let mut set = RetainedAudioSet::new();

        set.add(&mut loader, "a.mp3");
        set.add(&mut loader, "b.mp3");

        assert!(set.contains("a.mp3"));
        assert!(!set.contains("c.mp3"));
        assert_eq!(set.names(), &["a.mp3".to_string(), "b.mp3".to_string()]);
    }
}
