//! EpisodeTable: the loaded, read-only episode collection

use super::mentions::{decode_mentions, DecodeError};
use super::record::EpisodeRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that make the input table unusable. All of them are fatal at load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("episode {episode}: invalid Filler value '{value}' (expected 0 or 1)")]
    InvalidFiller { episode: u32, value: String },

    #[error("episode {episode}: {source}")]
    Mentions {
        episode: u32,
        #[source]
        source: DecodeError,
    },

    #[error("duplicate episode number: {0}")]
    DuplicateEpisode(u32),
}

/// Result type for table loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Row shape of the input file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Episode")]
    episode: u32,
    #[serde(rename = "Arc Name")]
    arc_name: String,
    #[serde(rename = "Filler")]
    filler: String,
    #[serde(rename = "ners")]
    ners: String,
}

impl RawRow {
    fn into_record(self) -> LoadResult<EpisodeRecord> {
        let is_filler = parse_filler(&self.filler).ok_or_else(|| LoadError::InvalidFiller {
            episode: self.episode,
            value: self.filler.clone(),
        })?;
        let mentions = decode_mentions(&self.ners).map_err(|source| LoadError::Mentions {
            episode: self.episode,
            source,
        })?;

        Ok(EpisodeRecord {
            episode_number: self.episode,
            arc_name: self.arc_name,
            is_filler,
            mentions,
        })
    }
}

fn parse_filler(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Ordered collection of episode records, in file order.
#[derive(Debug, Clone, Default)]
pub struct EpisodeTable {
    episodes: Vec<EpisodeRecord>,
}

impl EpisodeTable {
    /// Build a table from records, rejecting duplicate episode numbers
    pub fn new(episodes: Vec<EpisodeRecord>) -> LoadResult<Self> {
        let mut seen = HashSet::new();
        for record in &episodes {
            if !seen.insert(record.episode_number) {
                return Err(LoadError::DuplicateEpisode(record.episode_number));
            }
        }
        Ok(Self { episodes })
    }

    /// Load the table from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(path)?;
        let table = Self::from_csv(reader)?;
        info!(
            path = %path.display(),
            episodes = table.len(),
            "loaded episode table"
        );
        Ok(table)
    }

    /// Load the table from any CSV source (first row is the header)
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> LoadResult<Self> {
        let mut episodes = Vec::new();
        for row in reader.deserialize::<RawRow>() {
            let record = row?.into_record()?;
            debug!(
                episode = record.episode_number,
                sentences = record.mentions.len(),
                mentions = record.mention_count(),
                "decoded episode"
            );
            episodes.push(record);
        }
        Self::new(episodes)
    }

    /// All episodes in table order
    pub fn episodes(&self) -> &[EpisodeRecord] {
        &self.episodes
    }

    /// Get an episode by number
    pub fn get(&self, episode_number: u32) -> Option<&EpisodeRecord> {
        self.episodes
            .iter()
            .find(|e| e.episode_number == episode_number)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Smallest episode number, if any
    pub fn min_episode(&self) -> Option<u32> {
        self.episodes.iter().map(|e| e.episode_number).min()
    }

    /// Largest episode number, if any
    pub fn max_episode(&self) -> Option<u32> {
        self.episodes.iter().map(|e| e.episode_number).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Episode,Arc Name,Filler,ners
1,Prologue,0,\"[['Naruto', 'Iruka'], ['Mizuki']]\"
2,Prologue,0,[]
3,Standalone,1,\"[{'Konohamaru'}]\"
";

    #[test]
    fn loads_rows_in_file_order() {
        let table = EpisodeTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let numbers: Vec<u32> = table.episodes().iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let first = table.get(1).unwrap();
        assert_eq!(first.arc_name, "Prologue");
        assert!(!first.is_filler);
        assert_eq!(first.mentions.len(), 2);
        assert_eq!(first.mentions[0].entities(), ["Naruto", "Iruka"]);

        assert!(table.get(2).unwrap().mentions.is_empty());
        assert!(table.get(3).unwrap().is_filler);
        assert_eq!(table.min_episode(), Some(1));
        assert_eq!(table.max_episode(), Some(3));
    }

    #[test]
    fn ignores_extra_columns() {
        let csv = "\
idx,Episode,Arc Name,Filler,Title,ners
0,7,Chunin Exams,false,The Test,\"[['Sakura']]\"
";
        let table = EpisodeTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.get(7).unwrap().is_filler);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Episode,Arc Name,ners\n1,Prologue,[]\n";
        let err = EpisodeTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn invalid_filler_is_fatal() {
        let csv = "Episode,Arc Name,Filler,ners\n4,Prologue,maybe,[]\n";
        let err = EpisodeTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidFiller { episode, value } => {
                assert_eq!(episode, 4);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_mentions_are_fatal() {
        let csv = "Episode,Arc Name,Filler,ners\n5,Prologue,0,\"[['Naruto'\"\n";
        let err = EpisodeTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Mentions { episode: 5, .. }));
    }

    #[test]
    fn duplicate_episode_is_fatal() {
        let records = vec![
            EpisodeRecord::new(1, "Prologue", false),
            EpisodeRecord::new(1, "Prologue", false),
        ];
        assert!(matches!(
            EpisodeTable::new(records),
            Err(LoadError::DuplicateEpisode(1))
        ));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = EpisodeTable::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.min_episode(), None);
        assert_eq!(table.max_episode(), None);
    }
}
