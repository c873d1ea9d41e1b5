use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::NewsloomError;

/// Score assigned when a document's host is absent from the rating table.
pub const DEFAULT_AGENCY_WEIGHT: f64 = 0.000015;

/// Publisher reputation table keyed by normalized host.
///
/// Built once per run and passed into the ranking engine as a read-only
/// capability. An empty table is valid: every host then scores
/// [`DEFAULT_AGENCY_WEIGHT`].
#[derive(Debug, Clone, Default)]
pub struct AgencyRatingTable {
    ratings: HashMap<String, f64>,
}

impl AgencyRatingTable {
    /// Load `score<TAB>host` lines from a file. A missing or unreadable
    /// file degrades to an empty table rather than failing the run.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => match Self::from_reader(BufReader::new(file)) {
                Ok(table) => table,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to read rating file, using empty table");
                    Self::default()
                }
            },
            Err(_) => {
                warn!(path = %path.display(), "Rating file is not available");
                Self::default()
            }
        }
    }

    /// Parse the tab-separated rating format. Malformed individual lines
    /// are skipped with a warning; only a read failure is an error.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, NewsloomError> {
        let mut ratings = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| NewsloomError::Rating(e.to_string()))?;
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(2, '\t');
            let (score, host) = match (parts.next(), parts.next()) {
                (Some(score), Some(host)) if !host.trim().is_empty() => (score, host.trim()),
                _ => {
                    warn!(line = idx + 1, "Skipping malformed rating line");
                    continue;
                }
            };
            match score.parse::<f64>() {
                Ok(score) => {
                    ratings.insert(normalize_host(host), score);
                }
                Err(_) => warn!(line = idx + 1, "Skipping rating line with unparseable score"),
            }
        }
        Ok(Self { ratings })
    }

    /// Reputation score for the host of `url`, defaulting for unknown hosts.
    pub fn score(&self, url: &str) -> f64 {
        self.ratings
            .get(&normalize_host(url))
            .copied()
            .unwrap_or(DEFAULT_AGENCY_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Lowercased host with any leading `www.` stripped.
///
/// Falls back to manual splitting for scheme-less inputs (the rating file
/// stores bare hosts, not URLs).
pub fn normalize_host(url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| {
            url.split("://")
                .nth(1)
                .unwrap_or(url)
                .split('/')
                .next()
                .unwrap_or("")
                .to_string()
        });
    let host = host.to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_tab_separated_ratings() {
        let table =
            AgencyRatingTable::from_reader(Cursor::new("0.5\texample.com\n0.25\tnews.org\n"))
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.score("https://example.com/article/1"), 0.5);
        assert_eq!(table.score("https://news.org/a"), 0.25);
    }

    #[test]
    fn unknown_host_gets_default_weight() {
        let table = AgencyRatingTable::default();
        assert_eq!(table.score("https://nowhere.example/x"), 0.000015);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let input = "0.5\texample.com\nno-tab-here\nNaNish\t\n0.1\tok.net\n";
        let table = AgencyRatingTable::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_file_degrades_to_empty_table() {
        let table = AgencyRatingTable::load("/definitely/not/a/rating/file.txt");
        assert!(table.is_empty());
    }

    #[test]
    fn host_normalization_strips_scheme_and_www() {
        assert_eq!(normalize_host("https://www.Example.COM/path?q=1"), "example.com");
        assert_eq!(normalize_host("http://news.org/a/b"), "news.org");
        assert_eq!(normalize_host("bare-host.net"), "bare-host.net");
        assert_eq!(normalize_host("www.bare-host.net"), "bare-host.net");
    }

    #[test]
    fn rating_keys_are_normalized_like_lookups() {
        let table =
            AgencyRatingTable::from_reader(Cursor::new("0.9\twww.Example.com\n")).unwrap();
        assert_eq!(table.score("https://example.com/story"), 0.9);
    }
}
