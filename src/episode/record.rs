//! Per-episode records

use serde::{Deserialize, Serialize};

/// The entity names mentioned in one sentence of a transcript.
///
/// Order and duplicates are kept exactly as decoded; the extractor compares
/// names by string equality, so a name listed twice still pairs with the
/// other names in the window once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence(Vec<String>);

impl Sentence {
    pub fn new(entities: Vec<String>) -> Self {
        Self(entities)
    }

    /// Entity names in this sentence
    pub fn entities(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Sentence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One row of the episode table.
///
/// Immutable once loaded. The whole collection is shared read-only by every
/// recomputation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Unique, ordered episode number
    pub episode_number: u32,
    /// Story arc this episode belongs to
    pub arc_name: String,
    /// True when the episode is not adapted from the source material
    pub is_filler: bool,
    /// Sentence-level entity mentions, in transcript order
    pub mentions: Vec<Sentence>,
}

impl EpisodeRecord {
    /// Create a record with no mentions
    pub fn new(episode_number: u32, arc_name: impl Into<String>, is_filler: bool) -> Self {
        Self {
            episode_number,
            arc_name: arc_name.into(),
            is_filler,
            mentions: Vec::new(),
        }
    }

    /// Append one sentence built from entity names
    pub fn with_sentence<S: Into<String>>(mut self, entities: impl IntoIterator<Item = S>) -> Self {
        self.mentions.push(entities.into_iter().collect());
        self
    }

    /// Total entity mentions across all sentences
    pub fn mention_count(&self) -> usize {
        self.mentions.iter().map(Sentence::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_sentences_in_order() {
        let record = EpisodeRecord::new(3, "Land of Waves", false)
            .with_sentence(["Naruto", "Sasuke"])
            .with_sentence(Vec::<String>::new())
            .with_sentence(["Kakashi"]);

        assert_eq!(record.mentions.len(), 3);
        assert_eq!(record.mentions[0].entities(), ["Naruto", "Sasuke"]);
        assert!(record.mentions[1].is_empty());
        assert_eq!(record.mention_count(), 3);
    }

    #[test]
    fn sentence_serializes_as_plain_list() {
        let sentence: Sentence = ["Sakura", "Sakura"].into_iter().collect();
        let json = serde_json::to_string(&sentence).unwrap();
        assert_eq!(json, r#"["Sakura","Sakura"]"#);
    }
}
