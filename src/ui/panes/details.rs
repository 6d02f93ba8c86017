//! Watch pane: variables, auxiliary payload, counters and result

use super::utils::{aux_lines, clamp_scroll, pane_block};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

/// All lines the pane would show, before scrolling
pub fn detail_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let label = Style::default().fg(DEFAULT_THEME.comment);

    for variable in &snapshot.variables {
        let value_style = if variable.highlight {
            Style::default()
                .fg(DEFAULT_THEME.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} = ", variable.name), label),
            Span::styled(variable.value.to_string(), value_style),
        ]));
    }

    if let Some(aux) = &snapshot.auxiliary_state {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(aux_lines(aux));
    }

    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(Line::from(vec![
        Span::styled("comparisons ", label),
        Span::styled(
            snapshot.metrics.comparisons.to_string(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
        Span::styled("  swaps ", label),
        Span::styled(
            snapshot.metrics.swaps.to_string(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    ]));

    if let Some(result) = &snapshot.result {
        lines.push(Line::from(vec![
            Span::styled("result ", label),
            Span::styled(
                result.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines
}

pub fn render_details_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Watch ".to_string(), is_focused).padding(Padding::new(1, 0, 0, 0));
    let lines = detail_lines(snapshot);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
