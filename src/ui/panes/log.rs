//! Step log pane rendering
//!
//! Renders the descriptions of every step up to the current position as a
//! scrolling list. Concluding steps stand out in the accent color, notable
//! steps in the regular foreground, and bookkeeping steps in the comment
//! color, so skimming the log shows the algorithm's shape.
//!
//! A `usize::MAX` scroll offset means "follow the newest entry"; the app sets
//! that sentinel whenever the position moves and the clamp below resolves it
//! to the bottom of the list.

use crate::step::{StepKind, StepResult};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use std::rc::Rc;

/// Render the step log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    steps: &[Rc<StepResult>],
    pointer: usize,
    theme: &Theme,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_count = pointer.min(steps.len().saturating_sub(1)) + 1;
    let all_items: Vec<ListItem> = steps[..visible_count]
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let desc_style = match step.kind() {
                StepKind::Algorithmic => Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
                StepKind::Significant => Style::default().fg(theme.fg),
                StepKind::Code => Style::default().fg(theme.comment),
            };
            let marker = if idx == pointer { "▸ " } else { "  " };
            let mut line = Line::from(vec![
                Span::styled(format!("{:>4} ", idx), Style::default().fg(theme.comment)),
                Span::styled(marker, Style::default().fg(theme.secondary)),
                Span::styled(step.description().to_string(), desc_style),
            ]);
            if idx == pointer {
                for span in &mut line.spans {
                    span.style = span.style.patch(Style::default().bg(theme.current_line_bg));
                }
            }
            ListItem::new(line)
        })
        .collect();

    // Clamp scroll offset only if content exceeds visible area
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
