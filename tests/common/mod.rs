//! Shared fixtures for the integration tests
//!
//! Builds small episode tables in the same CSV shape the loader reads.

#![allow(dead_code)]

use character_network::{Config, Dashboard, EpisodeTable, SvgRenderer};
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "Episode,Arc Name,Filler,ners";

/// One CSV row; `mentions` is the nested-list text of the `ners` column.
pub fn row(episode: u32, arc: &str, filler: bool, mentions: &str) -> String {
    format!(
        "{},{},{},\"{}\"",
        episode,
        arc,
        if filler { 1 } else { 0 },
        mentions.replace('"', "\"\"")
    )
}

/// Episodes 1-20. 1-7 "Prologue", 8-14 "Land of Waves", 15-20 an all-filler
/// arc whose episodes introduce Tonbo.
pub fn twenty_episode_csv() -> String {
    let mut lines = vec![HEADER.to_string()];
    for n in 1..=7 {
        lines.push(row(n, "Prologue", false, "[['Naruto', 'Sasuke'], ['Sakura']]"));
    }
    for n in 8..=14 {
        lines.push(row(n, "Land of Waves", false, "[['Kakashi', 'Zabuza'], ['Haku', 'Naruto']]"));
    }
    for n in 15..=20 {
        lines.push(row(n, "Filler Arc", true, "[['Naruto', 'Tonbo']]"));
    }
    lines.join("\n") + "\n"
}

/// Write `contents` to a temporary CSV file
pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file
}

pub fn load_twenty() -> EpisodeTable {
    let file = write_csv(&twenty_episode_csv());
    EpisodeTable::from_csv_path(file.path()).expect("load fixture table")
}

/// Dashboard over the twenty-episode table with default settings
pub fn twenty_episode_dashboard() -> Dashboard {
    let config = Config::default();
    Dashboard::new(load_twenty(), config.network, Box::new(SvgRenderer::default()))
        .expect("start dashboard")
}
