//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset, GraphType,
        Padding, Paragraph, Row, Table, TableState, Wrap,
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    },
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::analysis::{self, Summary};
use crate::app::{App, Page, ScatterAxis};
use crate::config::UiSettings;

const EXPLICIT_COLOR: Color = Color::Blue;
const CLEAN_COLOR: Color = Color::Yellow;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("h/l".to_string(), "prev/next page".to_string());
    map.insert("j/k".to_string(), "row down/up".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("/".to_string(), "filter".to_string());
    map.insert("x".to_string(), "scatter axis".to_string());
    map.insert("K".to_string(), "track details".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["h/l", "j/k", "gg/G", "/", "x", "K", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Compute the visible window `[start, end)` of `total` rows for a viewport
/// of `height`, keeping `sel_pos` as centered as possible. Returns the
/// selection position relative to the window.
fn visible_window(total: usize, height: usize, sel_pos: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }

    let half = height / 2;
    let mut start = if sel_pos > half { sel_pos - half } else { 0 };
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

fn page_block(page: Page) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", page.title()))
}

fn legend(entries: &[(&'static str, Color)]) -> Paragraph<'static> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, (label, color)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(*label, Style::default().fg(*color)));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn draw_placeholder(frame: &mut Frame, area: Rect, page: Page) {
    let empty = Paragraph::new("no tracks to chart")
        .alignment(Alignment::Center)
        .block(page_block(page));
    frame.render_widget(empty, area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" staccato ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        if let Some(source) = &app.source {
            parts.push(format!("Data: {}", source));
        }

        let explicit = app.explicit_count();
        parts.push(format!(
            "Tracks: {} ({} explicit / {} clean)",
            app.tracks.len(),
            explicit,
            app.tracks.len() - explicit
        ));

        parts.push(format!(
            "Page {}/{}: {}",
            app.page.position(),
            Page::ALL.len(),
            app.page.title()
        ));

        let q = app.filter_query.trim();
        if app.filter_mode || !q.is_empty() {
            let mut filter_part = String::from("FILTER:");
            if !q.is_empty() {
                filter_part.push(' ');
                filter_part.push_str(q);
            }
            parts.push(filter_part);
        }

        if app.page == Page::Scatter {
            parts.push(format!("X: {}", app.scatter_axis.label()));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    match app.page {
        Page::Histogram => draw_histogram(frame, chunks[2], app, ui_settings),
        Page::BoxPlot => draw_box_plot(frame, chunks[2], app),
        Page::Violin => draw_violin(frame, chunks[2], app, ui_settings),
        Page::Table => draw_table(frame, chunks[2], app, display),
        Page::Scatter => draw_scatter(frame, chunks[2], app),
    }

    // Overlay track details popup (keeps the page visible under it)
    if app.metadata_window {
        let popup_area = centered_rect_sized(52, 9, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let track = app.tracks.get(app.selected);
        let meta = if let Some(track) = track {
            format!(
                "Name: {}\nPopularity: {}\nExplicit: {}\nDuration: {} ms\nClock: {}\nMinutes/seconds: {}\nFractional minutes: {:.3}",
                track.name,
                track.popularity,
                if track.explicit { "yes" } else { "no" },
                track.duration.ms(),
                track.duration.clock(),
                track.duration.minutes_seconds(),
                track.duration.fractional_minutes()
            )
        } else {
            "No track selected".to_string()
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" track (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

/// Overlaid popularity histogram, explicit vs non-explicit per bin.
fn draw_histogram(frame: &mut Frame, area: Rect, app: &App, ui_settings: &UiSettings) {
    let Some(range) = analysis::popularity_range(&app.tracks) else {
        draw_placeholder(frame, area, app.page);
        return;
    };

    let (explicit, clean) = analysis::split_by_explicit(&app.tracks);
    let explicit_hist = analysis::histogram(&explicit, ui_settings.histogram_bins, range);
    let clean_hist = analysis::histogram(&clean, ui_settings.histogram_bins, range);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let mut chart = BarChart::default()
        .block(page_block(app.page))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(1);

    for (eb, cb) in explicit_hist.bins.iter().zip(clean_hist.bins.iter()) {
        let bars = [
            Bar::default()
                .value(eb.count)
                .style(Style::default().fg(EXPLICIT_COLOR)),
            Bar::default()
                .value(cb.count)
                .style(Style::default().fg(CLEAN_COLOR)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(format!("{:.0}", (eb.lo + eb.hi) / 2.0)))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, chunks[0]);
    frame.render_widget(
        legend(&[
            ("■ explicit", EXPLICIT_COLOR),
            ("■ non-explicit", CLEAN_COLOR),
        ]),
        chunks[1],
    );
}

fn draw_group_box(ctx: &mut Context<'_>, summary: &Summary, y: f64, color: Color, label: &str) {
    // Whiskers
    ctx.draw(&CanvasLine {
        x1: summary.min,
        y1: y,
        x2: summary.q1,
        y2: y,
        color,
    });
    ctx.draw(&CanvasLine {
        x1: summary.q3,
        y1: y,
        x2: summary.max,
        y2: y,
        color,
    });
    // Interquartile box
    ctx.draw(&Rectangle {
        x: summary.q1,
        y: y - 0.4,
        width: (summary.q3 - summary.q1).max(f64::EPSILON),
        height: 0.8,
        color,
    });
    // Median
    ctx.draw(&CanvasLine {
        x1: summary.median,
        y1: y - 0.4,
        x2: summary.median,
        y2: y + 0.4,
        color: Color::White,
    });
    ctx.print(
        summary.min,
        y + 0.55,
        Line::styled(label.to_string(), Style::default().fg(color)),
    );
}

fn summary_row(label: &'static str, summary: &Summary, color: Color) -> Row<'static> {
    Row::new(vec![
        Cell::from(label).style(Style::default().fg(color)),
        Cell::from(summary.count.to_string()),
        Cell::from(format!("{:.1}", summary.mean)),
        Cell::from(format!("{:.1}", summary.min)),
        Cell::from(format!("{:.1}", summary.q1)),
        Cell::from(format!("{:.1}", summary.median)),
        Cell::from(format!("{:.1}", summary.q3)),
        Cell::from(format!("{:.1}", summary.max)),
    ])
}

/// Box-and-whisker per group over a shared popularity axis, with the
/// five-number summaries tabulated underneath.
fn draw_box_plot(frame: &mut Frame, area: Rect, app: &App) {
    let Some((lo, hi)) = analysis::popularity_range(&app.tracks) else {
        draw_placeholder(frame, area, app.page);
        return;
    };

    let (explicit, clean) = analysis::split_by_explicit(&app.tracks);
    let explicit_summary = Summary::from_values(&explicit);
    let clean_summary = Summary::from_values(&clean);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(5)])
        .split(area);

    let pad = ((hi - lo) * 0.05).max(1.0);
    let canvas = Canvas::default()
        .block(page_block(app.page))
        .x_bounds([lo - pad, hi + pad])
        .y_bounds([0.0, 4.0])
        .paint(|ctx| {
            if let Some(s) = &explicit_summary {
                draw_group_box(ctx, s, 3.0, EXPLICIT_COLOR, "explicit");
            }
            if let Some(s) = &clean_summary {
                draw_group_box(ctx, s, 1.0, CLEAN_COLOR, "non-explicit");
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let mut rows: Vec<Row> = Vec::new();
    if let Some(s) = &explicit_summary {
        rows.push(summary_row("explicit", s, EXPLICIT_COLOR));
    }
    if let Some(s) = &clean_summary {
        rows.push(summary_row("non-explicit", s, CLEAN_COLOR));
    }

    let header = Row::new(["group", "count", "mean", "min", "q1", "median", "q3", "max"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" five-number summary "),
    );
    frame.render_widget(table, chunks[1]);
}

/// Split violin: explicit density mirrored below the axis, non-explicit above.
fn draw_violin(frame: &mut Frame, area: Rect, app: &App, ui_settings: &UiSettings) {
    let Some((lo, hi)) = analysis::popularity_range(&app.tracks) else {
        draw_placeholder(frame, area, app.page);
        return;
    };

    let (explicit, clean) = analysis::split_by_explicit(&app.tracks);
    let bins = ui_settings.violin_bins;
    let explicit_profile = analysis::density(&explicit, bins, (lo, hi));
    let clean_profile = analysis::density(&clean, bins, (lo, hi));
    let explicit_mean = Summary::from_values(&explicit).map(|s| s.mean);
    let clean_mean = Summary::from_values(&clean).map(|s| s.mean);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let pad = ((hi - lo) * 0.05).max(1.0);
    let span = (hi - lo).max(1.0);
    let width = span / bins.max(1) as f64;

    let canvas = Canvas::default()
        .block(page_block(app.page))
        .x_bounds([lo - pad, hi + pad])
        .y_bounds([-1.3, 1.3])
        .paint(|ctx| {
            ctx.draw(&CanvasLine {
                x1: lo,
                y1: 0.0,
                x2: hi,
                y2: 0.0,
                color: Color::DarkGray,
            });

            for (i, &h) in explicit_profile.iter().enumerate() {
                if h > 0.0 {
                    let x = lo + width * (i as f64 + 0.5);
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: -h,
                        color: EXPLICIT_COLOR,
                    });
                }
            }
            for (i, &h) in clean_profile.iter().enumerate() {
                if h > 0.0 {
                    let x = lo + width * (i as f64 + 0.5);
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: h,
                        color: CLEAN_COLOR,
                    });
                }
            }

            // Mean markers per group
            if let Some(mean) = explicit_mean {
                ctx.draw(&CanvasLine {
                    x1: mean,
                    y1: -1.1,
                    x2: mean,
                    y2: 0.0,
                    color: Color::White,
                });
            }
            if let Some(mean) = clean_mean {
                ctx.draw(&CanvasLine {
                    x1: mean,
                    y1: 0.0,
                    x2: mean,
                    y2: 1.1,
                    color: Color::White,
                });
            }
        });
    frame.render_widget(canvas, chunks[0]);

    frame.render_widget(
        legend(&[
            ("▼ explicit", EXPLICIT_COLOR),
            ("▲ non-explicit", CLEAN_COLOR),
            ("| mean", Color::White),
        ]),
        chunks[1],
    );
}

/// The derived table: one row per track with every duration representation.
fn draw_table(frame: &mut Frame, area: Rect, app: &App, display: &[usize]) {
    let q = app.filter_query.trim();
    let query_lower = if q.is_empty() {
        None
    } else if app.uses_lower_names() {
        Some(q.to_ascii_lowercase())
    } else {
        None
    };

    // Only build rows for the visible window (avoid allocating the entire table).
    let total = display.len();
    // Borders plus the header row.
    let body_height = area.height.saturating_sub(3) as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = visible_window(total, body_height, sel_pos);

    let rows: Vec<Row> = display[start..end]
        .iter()
        .map(|&i| {
            let track = &app.tracks[i];
            let name_cell = if q.is_empty() {
                Cell::from(track.name.as_str())
            } else {
                let positions = match query_lower.as_deref() {
                    Some(ql) => app.fuzzy_match_positions_for_track_lower(i, ql),
                    None => App::fuzzy_match_positions(&track.name, q),
                };

                if let Some(positions) = positions {
                    let mut rendered = String::new();
                    let mut pos_iter = positions.into_iter();
                    let mut next_pos = pos_iter.next();

                    for (ci, ch) in track.name.chars().enumerate() {
                        if next_pos == Some(ci) {
                            for up in ch.to_uppercase() {
                                rendered.push(up);
                            }
                            next_pos = pos_iter.next();
                        } else {
                            rendered.push(ch);
                        }
                    }
                    Cell::from(rendered)
                } else {
                    Cell::from(track.name.as_str())
                }
            };

            Row::new(vec![
                name_cell,
                Cell::from(track.popularity.to_string()),
                Cell::from(if track.explicit { "yes" } else { "no" }),
                Cell::from(track.duration.ms().to_string()),
                Cell::from(track.duration.clock()),
                Cell::from(track.duration.minutes_seconds()),
                Cell::from(format!("{:.2}", track.duration.fractional_minutes())),
            ])
        })
        .collect();

    let header = Row::new([
        "name",
        "popularity",
        "explicit",
        "ms",
        "clock",
        "formatted",
        "minutes",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(page_block(app.page))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn axis_label(axis: ScatterAxis, v: f64) -> String {
    match axis {
        ScatterAxis::FractionalMinutes => format!("{:.1}", v),
        ScatterAxis::Milliseconds | ScatterAxis::Seconds => format!("{:.0}", v),
    }
}

/// Popularity against the selected duration representation, one dataset per
/// group.
fn draw_scatter(frame: &mut Frame, area: Rect, app: &App) {
    let Some((y_lo, y_hi)) = analysis::popularity_range(&app.tracks) else {
        draw_placeholder(frame, area, app.page);
        return;
    };

    let axis = app.scatter_axis;
    let explicit_points: Vec<(f64, f64)> = app
        .tracks
        .iter()
        .filter(|t| t.explicit)
        .map(|t| (axis.value(&t.duration), t.popularity))
        .collect();
    let clean_points: Vec<(f64, f64)> = app
        .tracks
        .iter()
        .filter(|t| !t.explicit)
        .map(|t| (axis.value(&t.duration), t.popularity))
        .collect();

    let mut x_lo = f64::MAX;
    let mut x_hi = f64::MIN;
    for (x, _) in explicit_points.iter().chain(clean_points.iter()) {
        x_lo = x_lo.min(*x);
        x_hi = x_hi.max(*x);
    }

    let x_pad = ((x_hi - x_lo) * 0.05).max(f64::EPSILON);
    let y_pad = ((y_hi - y_lo) * 0.05).max(1.0);
    let x_bounds = [x_lo - x_pad, x_hi + x_pad];
    let y_bounds = [y_lo - y_pad, y_hi + y_pad];

    let datasets = vec![
        Dataset::default()
            .name("explicit")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(EXPLICIT_COLOR))
            .data(&explicit_points),
        Dataset::default()
            .name("non-explicit")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(CLEAN_COLOR))
            .data(&clean_points),
    ];

    let x_mid = (x_bounds[0] + x_bounds[1]) / 2.0;
    let y_mid = (y_bounds[0] + y_bounds[1]) / 2.0;

    let chart = Chart::new(datasets)
        .block(page_block(app.page))
        .x_axis(
            Axis::default()
                .title(axis.label())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(x_bounds)
                .labels(vec![
                    axis_label(axis, x_bounds[0]),
                    axis_label(axis, x_mid),
                    axis_label(axis, x_bounds[1]),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("track popularity")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_mid),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}
