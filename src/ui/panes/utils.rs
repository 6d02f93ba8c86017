//! Helpers shared by the panes

use crate::snapshot::AuxiliaryState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

pub fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
}

/// Clamp a scroll offset so the last page stays full
pub fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}

/// A character code as a printable cell
pub fn display_char(code: i64) -> char {
    match u32::try_from(code).ok().and_then(char::from_u32) {
        Some(' ') => '␠',
        Some(c) if !c.is_control() => c,
        _ => '�',
    }
}

fn values(values: &[i64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn plain(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(DEFAULT_THEME.fg)))
}

fn active(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(DEFAULT_THEME.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Lines describing an auxiliary payload
pub fn aux_lines(aux: &AuxiliaryState) -> Vec<Line<'static>> {
    let mut lines = vec![heading(match aux {
        AuxiliaryState::Buckets { .. } => "Buckets",
        AuxiliaryState::Count { .. } => "Counts",
        AuxiliaryState::Heap { .. } => "Heap",
        AuxiliaryState::Merge { .. } => "Merge",
        AuxiliaryState::Gap { .. } => "Gaps",
        AuxiliaryState::Partition { .. } => "Partition",
        AuxiliaryState::Runs { .. } => "Runs",
        AuxiliaryState::Mode { .. } => "Frequencies",
        AuxiliaryState::Voting { .. } => "Vote",
        AuxiliaryState::Stack { .. } => "Stack",
    })];

    match aux {
        AuxiliaryState::Buckets {
            buckets,
            active_bucket,
            digit,
        } => {
            if let Some(d) = digit {
                lines.push(plain(format!("digit {}", d)));
            }
            for (i, bucket) in buckets.iter().enumerate() {
                let text = format!("{:>2}: {}", i, values(bucket));
                lines.push(if *active_bucket == Some(i) {
                    active(text)
                } else {
                    plain(text)
                });
            }
        }
        AuxiliaryState::Count {
            counts,
            offset,
            active: current,
        } => {
            for (k, count) in counts.iter().enumerate() {
                let text = format!("{:>4}: {}", offset + k as i64, count);
                lines.push(if *current == Some(k) {
                    active(text)
                } else {
                    plain(text)
                });
            }
        }
        AuxiliaryState::Heap {
            nodes,
            heap_size,
            removing,
        } => {
            // One line per heap level
            let size = (*heap_size).min(nodes.len());
            let mut start = 0;
            let mut width = 1;
            while start < size {
                let end = (start + width).min(size);
                lines.push(plain(values(&nodes[start..end])));
                start = end;
                width *= 2;
            }
            if size < nodes.len() {
                lines.push(Line::from(Span::styled(
                    format!("sorted tail {}", values(&nodes[size..])),
                    Style::default().fg(DEFAULT_THEME.success),
                )));
            }
            if *removing {
                lines.push(active("removing the root".to_string()));
            }
        }
        AuxiliaryState::Merge {
            left,
            right,
            merged,
            start,
            end,
        } => {
            lines.push(plain(format!("range [{}, {})", start, end)));
            lines.push(plain(format!("left   {}", values(left))));
            lines.push(plain(format!("right  {}", values(right))));
            lines.push(active(format!("merged {}", values(merged))));
        }
        AuxiliaryState::Gap { gap, sequence } => {
            let spans: Vec<Span<'static>> = sequence
                .iter()
                .map(|g| {
                    let style = if g == gap {
                        Style::default()
                            .fg(DEFAULT_THEME.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.fg)
                    };
                    Span::styled(format!("{} ", g), style)
                })
                .collect();
            lines.push(Line::from(spans));
        }
        AuxiliaryState::Partition {
            pivot_index,
            pivot_value,
            boundary,
            low,
            high,
        } => {
            lines.push(plain(format!("range [{}, {}]", low, high)));
            lines.push(active(format!("pivot a[{}] = {}", pivot_index, pivot_value)));
            lines.push(plain(format!("boundary {}", boundary)));
        }
        AuxiliaryState::Runs {
            runs,
            min_run,
            active: current,
        } => {
            lines.push(plain(format!("minRun {}", min_run)));
            for (i, run) in runs.iter().enumerate() {
                let text = format!("[{}, {})", run.start, run.end);
                lines.push(if *current == Some(i) {
                    active(text)
                } else {
                    plain(text)
                });
            }
        }
        AuxiliaryState::Mode { counts, best } => {
            for (value, count) in counts {
                let text = format!("{:>4}: {}", value, count);
                lines.push(if best.is_some_and(|b| b.value == *value) {
                    active(text)
                } else {
                    plain(text)
                });
            }
        }
        AuxiliaryState::Voting { candidate, count } => {
            let candidate = candidate.map_or("-".to_string(), |c| c.to_string());
            lines.push(plain(format!("candidate {}", candidate)));
            lines.push(plain(format!("count     {}", count)));
        }
        AuxiliaryState::Stack { items } => {
            if items.is_empty() {
                lines.push(plain("(empty)".to_string()));
            }
            for (depth, &code) in items.iter().enumerate().rev() {
                let text = format!("{:>2}: {}", depth, display_char(code));
                lines.push(if depth + 1 == items.len() {
                    active(text)
                } else {
                    plain(text)
                });
            }
        }
    }
    lines
}
