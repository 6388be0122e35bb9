//! End-to-end: CSV on disk through the dashboard's filter loop
//!
//! The fixture has twenty episodes; 15-20 form an all-filler arc.

mod common;

use character_network::{
    ArcIndex, EpisodeDescriptor, EpisodeRange, EpisodeTable, FilterEvent, GraphPane, LoadError,
};
use common::{load_twenty, row, twenty_episode_dashboard, write_csv, HEADER};

// --- Scenario: loading ---

#[test]
fn csv_table_loads_with_decoded_mentions() {
    let table = load_twenty();

    assert_eq!(table.len(), 20);
    assert_eq!(table.min_episode(), Some(1));
    assert_eq!(table.max_episode(), Some(20));

    let first = table.get(1).unwrap();
    assert_eq!(first.arc_name, "Prologue");
    assert!(!first.is_filler);
    assert_eq!(first.mentions.len(), 2);
    assert_eq!(first.mentions[0].entities(), ["Naruto", "Sasuke"]);

    assert!(table.get(15).unwrap().is_filler);
}

#[test]
fn malformed_mentions_fail_the_load() {
    let csv = format!("{}\n{}\n", HEADER, row(1, "Prologue", false, "[['Naruto', 'Sasuke']"));
    let file = write_csv(&csv);

    let err = EpisodeTable::from_csv_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Mentions { episode: 1, .. }));
}

#[test]
fn arc_index_summarizes_fixture() {
    let index = ArcIndex::build(&load_twenty());
    let names: Vec<_> = index.arcs().iter().map(|a| a.arc_name.as_str()).collect();

    assert_eq!(names, ["Prologue", "Land of Waves", "Filler Arc"]);
    assert_eq!(
        index.get("Filler Arc").unwrap().episodes,
        EpisodeDescriptor::Range { min: 15, max: 20 }
    );
    assert!(index.get("Filler Arc").unwrap().all_filler);
    assert!(!index.get("Prologue").unwrap().all_filler);
}

// --- Scenario: initial view ---

#[test]
fn initial_view_includes_everything() {
    let dashboard = twenty_episode_dashboard();
    let view = dashboard.view();

    assert_eq!(view.filter.range, EpisodeRange::new(1, 20));
    assert!(view.filter.include_filler);
    assert_eq!(view.arcs.len(), 3);

    let network = view.network.as_ref().unwrap();
    assert_eq!(network.edge_count(), 10);
    assert_eq!(network.node_count(), 7);
    assert_eq!(network.weight("Naruto", "Sasuke"), Some(14));
    assert_eq!(network.weight("Tonbo", "Naruto"), Some(12));
    assert_eq!(network.weight("Kakashi", "Haku"), Some(7));

    assert_eq!(
        network.node("Naruto").unwrap().label,
        "Top 5 Neighbors by Weight:\nSasuke: 14\nHaku: 14\nTonbo: 12\nSakura: 7\nKakashi: 7"
    );

    match &view.pane {
        GraphPane::Document(doc) => {
            assert!(doc.contains("<svg"));
            assert!(doc.contains(">Tonbo</text>"));
            assert!(!doc.contains("src=\"http"));
        }
        GraphPane::Placeholder => panic!("expected a rendered document"),
    }
}

// --- Scenario: filler clamp ---

#[test]
fn excluding_filler_clamps_range_and_drops_arc() {
    let mut dashboard = twenty_episode_dashboard();
    let view = dashboard.apply(FilterEvent::include_filler(false)).unwrap();

    assert_eq!(view.filter.range, EpisodeRange::new(1, 14));
    assert_eq!(view.bounds, EpisodeRange::new(1, 14));
    assert!(view.arcs.iter().all(|a| a.arc_name != "Filler Arc"));
    assert_eq!(view.arcs.len(), 2);

    let network = view.network.as_ref().unwrap();
    assert!(network.node("Tonbo").is_none());
    assert_eq!(network.edge_count(), 9);
}

#[test]
fn clamp_is_not_undone_by_including_filler() {
    let mut dashboard = twenty_episode_dashboard();
    dashboard.apply(FilterEvent::include_filler(false)).unwrap();
    let view = dashboard.apply(FilterEvent::include_filler(true)).unwrap();

    assert_eq!(view.bounds, EpisodeRange::new(1, 20));
    assert_eq!(view.filter.range, EpisodeRange::new(1, 14));
    assert!(view.network.as_ref().unwrap().node("Tonbo").is_none());

    let view = dashboard.apply(FilterEvent::range(15, 20)).unwrap();
    let network = view.network.as_ref().unwrap();
    assert_eq!(network.edge_count(), 1);
    assert_eq!(network.weight("Naruto", "Tonbo"), Some(12));
}

#[test]
fn range_wholly_beyond_new_max_collapses_to_it() {
    let mut dashboard = twenty_episode_dashboard();
    dashboard.apply(FilterEvent::range(16, 20)).unwrap();
    let view = dashboard.apply(FilterEvent::include_filler(false)).unwrap();

    assert_eq!(view.filter.range, EpisodeRange::new(14, 14));
    assert_eq!(view.stats.episodes_selected, 1);
}

// --- Scenario: empty selection ---

#[test]
fn inverted_range_shows_placeholder() {
    let mut dashboard = twenty_episode_dashboard();
    let view = dashboard.apply(FilterEvent::range(12, 3)).unwrap();

    assert_eq!(view.pane, GraphPane::Placeholder);
    assert!(view.network.is_none());
    assert_eq!(view.stats.pair_emissions, 0);
}

#[test]
fn filler_only_range_without_filler_shows_placeholder() {
    let csv = [
        HEADER.to_string(),
        row(1, "Prologue", false, "[]"),
        row(2, "Filler Arc", true, "[['Naruto', 'Tonbo']]"),
    ]
    .join("\n");
    let file = write_csv(&csv);
    let table = EpisodeTable::from_csv_path(file.path()).unwrap();
    let mut dashboard = character_network::Dashboard::new(
        table,
        character_network::NetworkConfig::default(),
        Box::new(character_network::SvgRenderer::default()),
    )
    .unwrap();

    let view = dashboard.apply(FilterEvent::include_filler(false)).unwrap();
    assert_eq!(view.filter.range, EpisodeRange::new(1, 1));
    assert!(view.pane.is_placeholder());
}
