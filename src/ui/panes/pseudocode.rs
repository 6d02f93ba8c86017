//! Algorithm reference pane: pseudocode, complexity and parameters in effect

use super::utils::{clamp_scroll, pane_block};
use crate::registry::{AlgorithmDescriptor, Params};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_pseudocode_pane(
    frame: &mut Frame,
    area: Rect,
    descriptor: &AlgorithmDescriptor,
    params: &Params,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" {} ", descriptor.name), is_focused)
        .padding(Padding::new(1, 0, 0, 0));
    let comment = Style::default().fg(DEFAULT_THEME.comment);

    let mut lines: Vec<Line> = descriptor
        .pseudocode
        .iter()
        .enumerate()
        .map(|(n, code)| {
            Line::from(vec![
                Span::styled(format!("{:>2} ", n + 1), comment),
                Span::styled(*code, Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();

    lines.push(Line::default());
    let complexity = descriptor.complexity;
    for (label, value) in [
        ("best", complexity.best),
        ("average", complexity.average),
        ("worst", complexity.worst),
        ("space", complexity.space),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", label), comment),
            Span::styled(value, Style::default().fg(DEFAULT_THEME.secondary)),
        ]));
    }

    if !params.is_empty() {
        lines.push(Line::default());
        for (id, value) in params.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("{} = ", id), comment),
                Span::styled(
                    value.to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
