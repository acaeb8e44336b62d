//! Plain-text waterfall rendering.
//!
//! Thin presentation plumbing over the core: an axis ruler, one bar
//! row per visible span, and an optional per-span detail listing. All
//! timeline math comes from [`crate::trace`]; this module only turns
//! columns into characters.

use crate::core::{RenderConfig, Result, TraceLensError};
use crate::session::{Axis, FlaggedTrace, Session};
use crate::trace::{bar_geometry, layout::fraction_to_column};
use std::fmt::Write as _;

/// Bars never collapse below one column, so even sub-column spans
/// leave a visible mark.
const MIN_BAR_WIDTH: usize = 1;

const ROOT_BAR: char = '#';
const NESTED_BAR: char = '=';
const PHASE_BAR: char = ':';

/// Renders the session's current trace as a waterfall.
///
/// Returns a render error when no trace is loaded.
pub fn render_session(session: &Session, config: &RenderConfig) -> Result<String> {
    let payload = session
        .payload()
        .ok_or_else(|| TraceLensError::render("no trace loaded"))?;
    let axis = session
        .axis()
        .ok_or_else(|| TraceLensError::render("no trace loaded"))?;
    let forest = session.flagged_forest();

    let mut out = String::new();

    render_axis(&mut out, axis, config.width);

    if let Some(parsing) = &payload.parsing {
        render_bar(
            &mut out,
            "parsing",
            parsing.start_offset,
            parsing.duration,
            payload.duration,
            config.width,
            PHASE_BAR,
        );
    }
    if let Some(validation) = &payload.validation {
        render_bar(
            &mut out,
            "validation",
            validation.start_offset,
            validation.duration,
            payload.duration,
            config.width,
            PHASE_BAR,
        );
    }

    for root in &forest {
        if !root.visible {
            continue;
        }

        render_bar(
            &mut out,
            &root.trace.span.field_name,
            root.trace.span.start_offset,
            root.trace.span.duration,
            payload.duration,
            config.width,
            ROOT_BAR,
        );

        for child in &root.nested {
            if !child.visible {
                continue;
            }
            render_bar(
                &mut out,
                &child.trace.span.field_name,
                child.trace.span.start_offset,
                child.trace.span.duration,
                payload.duration,
                config.width,
                NESTED_BAR,
            );
        }
    }

    if config.details {
        render_details(&mut out, &forest);
    }

    Ok(out)
}

/// Writes the tick-label row and the ruler row.
///
/// Tick 0 is always the origin; interior ticks sit at their placement
/// fraction; the end label is the exact total duration rather than a
/// scale multiple.
fn render_axis(out: &mut String, axis: Axis, width: usize) {
    let mut labels = vec![' '; width + 16];
    let mut ruler = vec!['-'; width + 1];

    let mut last_end = write_label(&mut labels, 0, "0 ms");
    ruler[0] = '|';

    for i in 1..axis.scale.tick_count {
        let column = fraction_to_column(axis.scale.tick_fraction(i, axis.total_ms), width);
        let label = format!("{:.0} ms", axis.scale.tick_label_ms(i));

        if column >= width {
            break;
        }
        ruler[column] = '|';

        if column > last_end {
            last_end = write_label(&mut labels, column, &label);
        }
    }

    let end_label = format!("{:.0} ms", axis.total_ms);
    let end_column = (width + 1).saturating_sub(end_label.len());
    write_label(&mut labels, end_column.max(last_end + 1), &end_label);
    ruler[width] = '|';

    writeln!(out, "{}", trim_row(&labels)).unwrap();
    writeln!(out, "{}", ruler.iter().collect::<String>()).unwrap();
}

/// Places `label` into the row starting at `column`, returning the
/// column just past its end.
fn write_label(row: &mut Vec<char>, column: usize, label: &str) -> usize {
    let end = column + label.chars().count();
    if end > row.len() {
        row.resize(end, ' ');
    }
    for (offset, c) in label.chars().enumerate() {
        row[column + offset] = c;
    }
    end
}

fn trim_row(row: &[char]) -> String {
    row.iter().collect::<String>().trim_end().to_string()
}

fn render_bar(
    out: &mut String,
    label: &str,
    start_offset_ns: u64,
    duration_ns: u64,
    total_duration_ns: u64,
    width: usize,
    bar: char,
) {
    let geometry = bar_geometry(start_offset_ns, duration_ns, total_duration_ns, width);
    let bar_width = geometry.width.max(MIN_BAR_WIDTH);

    writeln!(
        out,
        "{}{} {}",
        " ".repeat(geometry.left),
        bar.to_string().repeat(bar_width),
        label
    )
    .unwrap();
}

/// Writes the per-span detail listing for every visible span.
fn render_details(out: &mut String, forest: &[FlaggedTrace<'_>]) {
    out.push('\n');
    writeln!(
        out,
        "{:<20} {:>14} {:>14}  {:<24} {}",
        "Field", "Duration(ms)", "Start(ms)", "Path", "Type"
    )
    .unwrap();

    for root in forest {
        if !root.visible {
            continue;
        }
        render_detail_row(out, root, 0);
        for child in &root.nested {
            if child.visible {
                render_detail_row(out, child, 2);
            }
        }
    }
}

fn render_detail_row(out: &mut String, flagged: &FlaggedTrace<'_>, indent: usize) {
    let span = &flagged.trace.span;
    writeln!(
        out,
        "{:<20} {:>14.4} {:>14.4}  {:<24} {}",
        format!("{}{}", " ".repeat(indent), span.field_name),
        span.duration_ms(),
        span.start_offset_ms(),
        span.path_display(),
        span.return_type,
    )
    .unwrap();
}
