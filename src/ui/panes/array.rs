//! Main array pane: bars for numbers, cells for strings, pointers underneath

use super::utils::{display_char, pane_block};
use crate::input::Notation;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

/// Tallest bar value handed to the chart; wider spans are scaled down
const BAR_SCALE: i128 = 1000;

/// Width of one cell (bar or character) plus the gap after it
fn cell_width(inner_width: u16, len: usize) -> u16 {
    if len == 0 {
        return 3;
    }
    (inner_width / len as u16).clamp(2, 7)
}

pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    notation: Notation,
    title: &str,
    is_focused: bool,
) {
    let block = pane_block(format!(" {} ", title), is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let has_expression = snapshot.expression.is_some();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(u16::from(has_expression)),
        ])
        .split(inner);

    let width = cell_width(inner.width, snapshot.array_state.len());
    match notation {
        Notation::ArrayLiteral => render_bars(frame, rows[0], snapshot, width),
        Notation::BracketString | Notation::Text => {
            render_cells(frame, rows[0], snapshot, width)
        }
    }
    frame.render_widget(Paragraph::new(pointer_line(snapshot, width)), rows[1]);

    if let Some(expression) = &snapshot.expression {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("expr ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(expression.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ])),
            rows[2],
        );
    }
}

fn render_bars(frame: &mut Frame, area: Rect, snapshot: &Snapshot, width: u16) {
    let heights = bar_heights(&snapshot.array_state);
    let bars: Vec<Bar> = snapshot
        .array_state
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (&value, height))| {
            let color = DEFAULT_THEME.mark_color(snapshot.mark_at(i));
            Bar::default()
                .value(height)
                .text_value(value.to_string())
                .label(Line::from(i.to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(DEFAULT_THEME.fg).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(width.saturating_sub(1).max(1))
        .bar_gap(1);
    frame.render_widget(chart, area);
}

/// Bar heights in `1..=BAR_SCALE`, measured from the lowest value (or zero)
/// so negative values still get a visible bar
fn bar_heights(values: &[i64]) -> Vec<u64> {
    let floor = values.iter().copied().min().unwrap_or(0).min(0);
    let spans: Vec<i128> = values
        .iter()
        .map(|&v| i128::from(v) - i128::from(floor) + 1)
        .collect();
    let top = spans.iter().copied().max().unwrap_or(1).max(BAR_SCALE);
    spans
        .into_iter()
        .map(|span| ((span * BAR_SCALE / top).max(1)) as u64)
        .collect()
}

fn render_cells(frame: &mut Frame, area: Rect, snapshot: &Snapshot, width: u16) {
    let spans: Vec<Span> = snapshot
        .array_state
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            let cell = format!("{:^w$}", display_char(code), w = width as usize);
            let style = match snapshot.mark_at(i) {
                None => Style::default().fg(DEFAULT_THEME.fg),
                mark => Style::default()
                    .fg(DEFAULT_THEME.current_line_bg)
                    .bg(DEFAULT_THEME.mark_color(mark))
                    .add_modifier(Modifier::BOLD),
            };
            Span::styled(cell, style)
        })
        .collect();

    let mut lines = vec![Line::default(); (area.height as usize).saturating_sub(1) / 2];
    lines.push(Line::from(spans));
    let indices: String = (0..snapshot.array_state.len())
        .map(|i| format!("{:^w$}", i, w = width as usize))
        .collect();
    lines.push(Line::from(Span::styled(
        indices,
        Style::default().fg(DEFAULT_THEME.comment),
    )));
    if snapshot.array_state.is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Pointer labels aligned under their cells
fn pointer_line(snapshot: &Snapshot, width: u16) -> Line<'static> {
    let width = width as usize;
    let spans: Vec<Span<'static>> = (0..snapshot.array_state.len())
        .map(|i| {
            let mut pointers = snapshot.pointers_at(i).peekable();
            let Some(first) = pointers.peek() else {
                return Span::raw(" ".repeat(width));
            };
            let color = DEFAULT_THEME.pointer_color(first.color);
            let labels: Vec<&str> = pointers.map(|p| p.label.as_str()).collect();
            let mut text = format!("↑{}", labels.join("/"));
            if text.chars().count() > width {
                text = text.chars().take(width).collect();
            }
            Span::styled(
                format!("{:<w$}", text, w = width),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}
