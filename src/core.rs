use crate::model::{SelectionPolicy, Settings};
use crate::playlist_file;
use crate::queue::MediaQueue;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug)]
pub struct CueCore {
    pub queue: MediaQueue,
    pub settings: Settings,
    pub dirty: bool,
    pub status: String,
}

impl CueCore {
    pub fn from_settings(settings: Settings) -> Self {
        Self::with_queue(settings, MediaQueue::new())
    }

    pub fn with_queue(settings: Settings, mut queue: MediaQueue) -> Self {
        queue.set_policy(settings.selection);
        Self {
            queue,
            settings,
            dirty: true,
            status: String::from("Ready"),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn add_track(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.set_status("Track name cannot be empty");
            return;
        }

        self.queue.insert(name);
        self.set_status(&format!("Added {name}"));
    }

    pub fn remove_track(&mut self, name: &str) -> bool {
        let name = name.trim();
        let removed = self.queue.remove(name);
        if removed {
            self.set_status(&format!("Removed {name}"));
        } else {
            self.set_status(&format!("{name} is not in the playlist"));
        }
        removed
    }

    pub fn next_track(&mut self) -> Option<&str> {
        self.queue.advance();
        self.announce_current();
        self.queue.current()
    }

    pub fn previous_track(&mut self) -> Option<&str> {
        self.queue.retreat();
        self.announce_current();
        self.queue.current()
    }

    pub fn replay(&mut self) -> Option<&str> {
        let message = match self.queue.replay() {
            Some(name) => format!("Playing again: {name}"),
            None => String::from("No track to replay"),
        };
        self.set_status(&message);
        self.queue.current()
    }

    pub fn show_current(&mut self) {
        self.announce_current();
    }

    pub fn find_track(&mut self, name: &str) -> Vec<usize> {
        let name = name.trim();
        let positions = self.queue.positions(name);
        let message = match positions.as_slice() {
            [] => format!("{name} is not in the playlist"),
            [only] => format!("Found {name} at position {}", only + 1),
            many => {
                let listed: Vec<String> = many.iter().map(|pos| (pos + 1).to_string()).collect();
                format!("{name} appears at positions {}", listed.join(", "))
            }
        };
        self.set_status(&message);
        positions
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.apply_policy(SelectionPolicy::from_shuffle(enabled));
    }

    pub fn toggle_shuffle(&mut self) {
        self.apply_policy(self.queue.policy().toggled());
    }

    fn apply_policy(&mut self, policy: SelectionPolicy) {
        self.queue.set_policy(policy);
        self.settings.selection = policy;
        self.set_status(&format!("Playback mode: {}", policy.label()));
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.set_status("Playlist cleared");
    }

    /// One line per track, the current one marked with `>`.
    pub fn listing(&self) -> String {
        if self.queue.is_empty() {
            return String::from("The playlist is empty");
        }

        let current = self.queue.cursor_position();
        self.queue
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let marker = if Some(position) == current { '>' } else { ' ' };
                format!("{marker} {:>3}. {name}", position + 1)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn show_listing(&mut self) {
        let listing = self.listing();
        self.set_status(&listing);
    }

    /// Saves to `path`, or to the last playlist path when none is given.
    pub fn save_playlist(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => match &self.settings.last_playlist {
                Some(last) => last.clone(),
                None => bail!("no playlist file chosen yet"),
            },
        };

        playlist_file::save(&self.queue, &target)
            .with_context(|| format!("failed to save playlist {}", target.display()))?;
        self.settings.last_playlist = Some(target.clone());
        self.set_status(&format!(
            "Saved {} tracks to {}",
            self.queue.len(),
            target.display()
        ));
        Ok(target)
    }

    /// Replaces the queue wholesale. The new queue is fully built before the
    /// swap, so a failed load leaves the current one in place.
    pub fn load_playlist(&mut self, path: &Path) -> Result<()> {
        let mut loaded = playlist_file::load(path)
            .inspect_err(|err| warn!(path = %path.display(), %err, "keeping current playlist"))
            .with_context(|| format!("failed to load playlist {}", path.display()))?;

        loaded.set_policy(self.settings.selection);
        self.queue = loaded;
        self.settings.last_playlist = Some(path.to_path_buf());
        info!(path = %path.display(), "playlist replaced");
        self.set_status(&format!(
            "Loaded {} tracks from {}",
            self.queue.len(),
            path.display()
        ));
        Ok(())
    }

    fn announce_current(&mut self) {
        let message = match self.queue.current() {
            Some(name) => format!("Now playing: {name}"),
            None => String::from("No track"),
        };
        self.set_status(&message);
    }

    pub fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.dirty = true;
    }
}
