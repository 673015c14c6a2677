//! Win tally persistence.
//!
//! The store is a flat text file with one `name;count` record per line.
//! Lines starting with `#` are comments. Every operation is best-effort:
//! an unreadable store reads as empty, malformed records are skipped with
//! a warning, and write failures are logged but never surface to the
//! game loop.

use derive_getters::Getters;
use derive_new::new;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Default store location next to the executable's working directory.
pub const DEFAULT_SCORES_FILE: &str = "highscore.txt";

/// Limit applied when a caller asks for 0 entries.
const DEFAULT_LIMIT: usize = 10;

/// File-backed win tally, keyed by player display name.
#[derive(Debug, Clone, Getters, new)]
pub struct ScoreRepository {
    /// Path of the score file.
    path: PathBuf,
}

impl ScoreRepository {
    /// Adds one win for `name`. Blank names are ignored.
    #[instrument(skip(self))]
    pub fn record_win(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let mut scores = self.read_scores();
        *scores.entry(name.to_string()).or_insert(0) += 1;
        self.write_scores(&scores);
        debug!(name, "Win recorded");
    }

    /// Top `limit` entries sorted by count descending, ties broken by
    /// name ascending case-insensitively. A limit of 0 falls back to 10.
    #[instrument(skip(self))]
    pub fn top_scores(&self, limit: usize) -> Vec<(String, u32)> {
        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        let mut entries: Vec<(String, u32)> = self.read_scores().into_iter().collect();
        entries.sort_by_key(|(name, count)| (Reverse(*count), name.to_lowercase()));
        entries.truncate(limit);
        entries
    }

    /// Reads all records, skipping comments and malformed lines. A
    /// missing or unreadable file reads as an empty tally.
    fn read_scores(&self) -> HashMap<String, u32> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Score file not readable");
                return HashMap::new();
            }
        };
        let mut scores = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(';') {
                Some((name, count)) => match count.trim().parse::<u32>() {
                    Ok(count) => {
                        scores.insert(name.to_string(), count);
                    }
                    Err(_) => warn!(line, "Skipping malformed score record"),
                },
                None => warn!(line, "Skipping malformed score record"),
            }
        }
        scores
    }

    /// Writes the full tally back, sorted by name for stable files.
    fn write_scores(&self, scores: &HashMap<String, u32>) {
        let mut entries: Vec<(&String, &u32)> = scores.iter().collect();
        entries.sort_by_key(|(name, _)| name.to_lowercase());
        let mut out = String::with_capacity(entries.len() * 16);
        for (name, count) in entries {
            out.push_str(name);
            out.push(';');
            out.push_str(&count.to_string());
            out.push('\n');
        }
        if let Err(e) = fs::write(&self.path, out) {
            warn!(path = %self.path.display(), error = %e, "Score file write failed");
        }
    }
}
