use super::*;
use crate::dataset::Track;
use crate::duration::TrackDuration;

fn t(name: &str) -> Track {
    Track {
        name: name.into(),
        popularity: 50.0,
        explicit: false,
        duration: TrackDuration::from_ms(180_000).unwrap(),
    }
}

fn explicit(name: &str) -> Track {
    Track {
        explicit: true,
        ..t(name)
    }
}

#[test]
fn fuzzy_match_simple() {
    let name = "Hello World";
    assert!(App::fuzzy_match_positions(name, "hw").is_some());
    assert!(App::fuzzy_match_positions(name, "ello").is_some());
    assert!(App::fuzzy_match_positions(name, "xyz").is_none());
}

#[test]
fn display_indices_respects_filter_query() {
    let tracks = vec![t("Alpha"), t("Beta"), t("Gamma")];
    let mut app = App::new(tracks);
    app.push_filter_char('a');
    let visible = app.display_indices();
    assert!(!visible.is_empty());
}

#[test]
fn display_indices_uses_fuzzy_not_substring_only() {
    let tracks = vec![t("Metallica - Blackened"), t("Black Sabbath - Paranoid")];

    let mut app = App::new(tracks);
    // Fuzzy query: letters appear in order but not necessarily contiguously
    app.filter_query = "mtbk".into();

    let disp = app.display_indices();
    assert_eq!(disp, vec![0]);
}

#[test]
fn trimming_filter_query_affects_matching() {
    let tracks = vec![t("Black Sabbath - Paranoid")];

    let mut app = App::new(tracks);
    app.filter_query = "Black ".into();
    assert_eq!(app.display_indices(), vec![0]);

    app.filter_query = "   ".into();
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn next_prev_in_view_helpers_work() {
    let tracks = vec![t("Alpha"), t("Beta"), t("Gamma")];

    let mut app = App::new(tracks);
    app.filter_query = "et".into(); // only Beta is visible

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));
    assert_eq!(app.next_in_view_from(1), Some(1));
    assert_eq!(app.prev_in_view_from(1), Some(1));
}

#[test]
fn clearing_filter_restores_all_rows() {
    let tracks = vec![t("Alpha"), t("Beta")];
    let mut app = App::new(tracks);

    app.enter_filter_mode();
    app.push_filter_char('z');
    assert!(app.display_indices().is_empty());

    app.clear_filter();
    assert!(!app.filter_mode);
    assert_eq!(app.display_indices(), vec![0, 1]);
}

#[test]
fn selection_snaps_to_first_visible_row() {
    let tracks = vec![t("Alpha"), t("Beta"), t("Gamma")];
    let mut app = App::new(tracks);
    app.set_selected(2);

    app.push_filter_char('b'); // only Beta (index 1) matches
    assert_eq!(app.selected, 1);
}

#[test]
fn page_cycle_wraps_in_both_directions() {
    let mut app = App::new(vec![t("A")]);
    assert_eq!(app.page, Page::Histogram);

    for expected in [
        Page::BoxPlot,
        Page::Violin,
        Page::Table,
        Page::Scatter,
        Page::Histogram,
    ] {
        app.next_page();
        assert_eq!(app.page, expected);
    }

    app.prev_page();
    assert_eq!(app.page, Page::Scatter);
    assert_eq!(app.page.position(), 5);
}

#[test]
fn scatter_axis_cycles_through_all_representations() {
    let mut app = App::new(vec![t("A")]);
    assert_eq!(app.scatter_axis, ScatterAxis::FractionalMinutes);

    app.cycle_scatter_axis();
    assert_eq!(app.scatter_axis, ScatterAxis::Milliseconds);
    app.cycle_scatter_axis();
    assert_eq!(app.scatter_axis, ScatterAxis::Seconds);
    app.cycle_scatter_axis();
    assert_eq!(app.scatter_axis, ScatterAxis::FractionalMinutes);
}

#[test]
fn scatter_axis_values_agree_with_duration() {
    let d = TrackDuration::from_ms(90_000).unwrap();
    assert_eq!(ScatterAxis::FractionalMinutes.value(&d), 1.5);
    assert_eq!(ScatterAxis::Milliseconds.value(&d), 90_000.0);
    assert_eq!(ScatterAxis::Seconds.value(&d), 90.0);
}

#[test]
fn explicit_count_counts_only_explicit_tracks() {
    let app = App::new(vec![explicit("A"), t("B"), explicit("C")]);
    assert_eq!(app.explicit_count(), 2);
    assert_eq!(app.tracks.len() - app.explicit_count(), 1);
}

#[test]
fn large_datasets_use_precomputed_lowercase_names() {
    let tracks: Vec<Track> = (0..150).map(|i| t(&format!("Track {i}"))).collect();
    let mut app = App::new(tracks);
    assert!(app.uses_lower_names());

    app.filter_query = "track 149".into();
    assert_eq!(app.display_indices(), vec![149]);
}
