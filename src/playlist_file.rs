//! Plain-text playlist files: one track name per line, head to tail.

use crate::queue::MediaQueue;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlaylistFileError {
    #[error("failed to access playlist {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },
}

impl PlaylistFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes every track name, one per line.
pub fn write_queue<W: Write>(queue: &MediaQueue, mut out: W) -> io::Result<()> {
    for name in queue.iter() {
        out.write_all(name.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// A name survives a reload when it has no line feed and nothing for the
/// reader's trim to strip. Interior `\r` is kept by the reader.
fn unrepresentable_reason(name: &str) -> Option<&'static str> {
    if name.contains('\n') {
        Some("contains a line break")
    } else if name.trim().is_empty() {
        Some("is blank")
    } else if name.trim() != name {
        Some("has leading or trailing whitespace")
    } else {
        None
    }
}

fn check_representable(queue: &MediaQueue) -> Result<(), PlaylistFileError> {
    for (position, name) in queue.iter().enumerate() {
        if let Some(problem) = unrepresentable_reason(name) {
            return Err(PlaylistFileError::Format {
                line: position + 1,
                reason: format!("track name {name:?} {problem}"),
            });
        }
    }
    Ok(())
}

/// Builds a fresh queue from line-oriented input. Lines are trimmed and
/// blank lines are skipped.
pub fn read_queue<R: BufRead>(input: R) -> Result<MediaQueue, PlaylistFileError> {
    let mut queue = MediaQueue::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|err| match err.kind() {
            io::ErrorKind::InvalidData => PlaylistFileError::Format {
                line: index + 1,
                reason: String::from("not valid UTF-8"),
            },
            _ => PlaylistFileError::Io {
                path: PathBuf::new(),
                source: err,
            },
        })?;
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        queue.insert(name);
    }
    Ok(queue)
}

/// Names that would not survive a line-based reload are rejected before
/// anything is written. The target is only replaced once the whole file has
/// been written to a uniquely named sibling.
pub fn save(queue: &MediaQueue, path: &Path) -> Result<(), PlaylistFileError> {
    check_representable(queue)?;

    let result = NamedTempFile::new_in(staging_dir(path))
        .and_then(|mut staged| {
            write_queue(queue, BufWriter::new(staged.as_file_mut()))?;
            Ok(staged)
        })
        .and_then(|staged| staged.persist(path).map(drop).map_err(|err| err.error));

    if let Err(err) = result {
        warn!(path = %path.display(), %err, "playlist save failed");
        return Err(PlaylistFileError::io(path, err));
    }

    info!(path = %path.display(), tracks = queue.len(), "playlist saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<MediaQueue, PlaylistFileError> {
    let file = File::open(path).map_err(|err| PlaylistFileError::io(path, err))?;
    let queue = read_queue(BufReader::new(file)).map_err(|err| match err {
        PlaylistFileError::Io { source, .. } => PlaylistFileError::io(path, source),
        other => other,
    })?;

    info!(path = %path.display(), tracks = queue.len(), "playlist loaded");
    Ok(queue)
}

fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
