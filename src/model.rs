use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable handle of a slot in the queue's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of the chain. Only the queue creates and links nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackNode {
    pub(crate) name: String,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl TrackNode {
    pub(crate) fn detached(name: String) -> Self {
        Self {
            name,
            prev: None,
            next: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionPolicy {
    #[default]
    Sequential,
    Shuffle,
}

impl SelectionPolicy {
    pub fn from_shuffle(enabled: bool) -> Self {
        if enabled { Self::Shuffle } else { Self::Sequential }
    }

    pub fn is_shuffle(self) -> bool {
        self == Self::Shuffle
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Sequential => Self::Shuffle,
            Self::Shuffle => Self::Sequential,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Shuffle => "shuffle",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub selection: SelectionPolicy,
    #[serde(default)]
    pub last_playlist: Option<PathBuf>,
    #[serde(default = "default_restore_last_playlist")]
    pub restore_last_playlist: bool,
}

fn default_restore_last_playlist() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selection: SelectionPolicy::default(),
            last_playlist: None,
            restore_last_playlist: default_restore_last_playlist(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_toggles_both_ways() {
        assert_eq!(SelectionPolicy::Sequential.toggled(), SelectionPolicy::Shuffle);
        assert_eq!(SelectionPolicy::Shuffle.toggled(), SelectionPolicy::Sequential);
        assert!(SelectionPolicy::from_shuffle(true).is_shuffle());
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("parse");
        assert_eq!(settings, Settings::default());
        assert!(settings.restore_last_playlist);
    }
}
