//! Application model types: `App`, `Page` and `ScatterAxis`.
//!
//! The `App` struct holds the loaded tracks, the active page and the
//! selection/filter flags used by the UI and runtime.

use crate::dataset::Track;
use crate::duration::TrackDuration;

/// The dashboard pages, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Histogram,
    BoxPlot,
    Violin,
    Table,
    Scatter,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Histogram,
        Page::BoxPlot,
        Page::Violin,
        Page::Table,
        Page::Scatter,
    ];

    /// Title shown in the page block border.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Histogram => "popularity histogram",
            Page::BoxPlot => "popularity box plot",
            Page::Violin => "popularity violin",
            Page::Table => "derived table",
            Page::Scatter => "popularity vs duration",
        }
    }

    /// 1-based position in the page order, for the status line.
    pub fn position(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0) + 1
    }

    pub fn next(&self) -> Page {
        let pos = Page::ALL.iter().position(|p| p == self).unwrap_or(0);
        Page::ALL[(pos + 1) % Page::ALL.len()]
    }

    pub fn prev(&self) -> Page {
        let pos = Page::ALL.iter().position(|p| p == self).unwrap_or(0);
        Page::ALL[(pos + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Which duration representation drives the scatter x-axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScatterAxis {
    FractionalMinutes,
    Milliseconds,
    Seconds,
}

impl ScatterAxis {
    pub fn cycle(&self) -> ScatterAxis {
        match self {
            ScatterAxis::FractionalMinutes => ScatterAxis::Milliseconds,
            ScatterAxis::Milliseconds => ScatterAxis::Seconds,
            ScatterAxis::Seconds => ScatterAxis::FractionalMinutes,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScatterAxis::FractionalMinutes => "duration (minutes)",
            ScatterAxis::Milliseconds => "duration (ms)",
            ScatterAxis::Seconds => "duration (seconds)",
        }
    }

    /// The x value of one track under this axis.
    pub fn value(&self, duration: &TrackDuration) -> f64 {
        match self {
            ScatterAxis::FractionalMinutes => duration.fractional_minutes(),
            ScatterAxis::Milliseconds => duration.ms() as f64,
            ScatterAxis::Seconds => duration.as_std().as_secs() as f64,
        }
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub page: Page,
    pub selected: usize,

    lower_names: Option<Vec<String>>,

    pub filter_mode: bool,
    pub filter_query: String,

    pub scatter_axis: ScatterAxis,
    pub metadata_window: bool,
    pub source: Option<String>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        // Optimization: for larger datasets, precompute lowercase names to speed up fuzzy
        // filtering (avoid per-char lowercase conversions on every redraw/keystroke).
        let lower_names = if tracks.len() > 100 {
            Some(tracks.iter().map(|t| t.name.to_ascii_lowercase()).collect())
        } else {
            None
        };

        Self {
            tracks,
            page: Page::Histogram,
            selected: 0,

            lower_names,

            filter_mode: false,
            filter_query: String::new(),

            scatter_axis: ScatterAxis::FractionalMinutes,
            metadata_window: false,
            source: None,
        }
    }

    /// Record the dataset path shown in the status line.
    pub fn set_source(&mut self, source: String) {
        self.source = Some(source);
    }

    /// Return true if the dataset contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Number of explicit tracks.
    pub fn explicit_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.explicit).count()
    }

    /// Switch to the next page.
    pub fn next_page(&mut self) {
        self.page = self.page.next();
    }

    /// Switch to the previous page.
    pub fn prev_page(&mut self) {
        self.page = self.page.prev();
    }

    /// Cycle the scatter x-axis representation.
    pub fn cycle_scatter_axis(&mut self) {
        self.scatter_axis = self.scatter_axis.cycle();
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Return the visible row indices, taking the active filter into account.
    pub fn display_indices(&self) -> Vec<usize> {
        let base: Vec<usize> = (0..self.tracks.len()).collect();

        let query = self.filter_query.trim();
        if query.is_empty() {
            base
        } else {
            match self.lower_names.as_deref() {
                Some(lower_names) => {
                    let query_lower = query.to_ascii_lowercase();
                    base.into_iter()
                        .filter(|&i| {
                            Self::fuzzy_match_positions_lower(&lower_names[i], &query_lower)
                                .is_some()
                        })
                        .collect()
                }
                None => base
                    .into_iter()
                    .filter(|&i| Self::fuzzy_match_positions(&self.tracks[i].name, query).is_some())
                    .collect(),
            }
        }
    }

    /// Return true if this `App` uses precomputed lowercase names.
    pub fn uses_lower_names(&self) -> bool {
        self.lower_names.is_some()
    }

    /// Fuzzy-match `query_lower` against a specific track by index.
    ///
    /// Returns the character positions that match, or `None` when there is no match.
    pub fn fuzzy_match_positions_for_track_lower(
        &self,
        track_index: usize,
        query_lower: &str,
    ) -> Option<Vec<usize>> {
        if query_lower.is_empty() {
            return Some(Vec::new());
        }

        match self.lower_names.as_deref() {
            Some(lower_names) => {
                Self::fuzzy_match_positions_lower(&lower_names[track_index], query_lower)
            }
            None => Self::fuzzy_match_positions(&self.tracks[track_index].name, query_lower),
        }
    }

    /// Return the next visible index in the current display order after `current`.
    /// Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index in the current display order before `current`.
    /// Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Set the selected row index and ensure it is visible in the display.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    // Fuzzy/subsequence match: return the character positions (by char index)
    // in `name` that match the query, or None if not matched.
    pub fn fuzzy_match_positions(name: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut name_iter = name.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match name_iter.next() {
                    Some((ni, nc)) if nc.to_ascii_lowercase() == qc_low => {
                        positions.push(ni);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    fn fuzzy_match_positions_lower(name_lower: &str, query_lower: &str) -> Option<Vec<usize>> {
        if query_lower.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut name_iter = name_lower.chars().enumerate();

        for qc in query_lower.chars() {
            loop {
                match name_iter.next() {
                    Some((ni, nc)) if nc == qc => {
                        positions.push(ni);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Enter filter mode (table page).
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    /// Exit filter mode, keeping the query applied.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    /// Clear the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    /// Append a character to the filter query and refresh view.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    /// Remove the last character from the filter query and refresh view.
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Ensure that `selected` is part of the current filtered view,
    /// otherwise move selection to the first visible row.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    /// Move selection to the next visible row.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move selection to the previous visible row.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }
}
