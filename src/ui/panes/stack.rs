//! Stack pane rendering with tracked variables and call frames
//!
//! Renders the bookkeeping half of a step: the variables the algorithm is
//! tracking (loop counters, keys, boundaries) and, for recursive algorithms,
//! the frozen call stack captured when the step was emitted.
//!
//! # Layout
//!
//! - Tracked variables first, one per line, colored by their semantic role
//! - Call frames below, outermost first, each with the locals the caller
//!   saved when it recursed

use crate::step::StepResult;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    step: &StepResult,
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
        .title(" State ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = area.width.saturating_sub(2) as usize;
    let mut all_items: Vec<ListItem> = Vec::new();

    let variables = step.merged_variables();
    if !variables.is_empty() {
        all_items.push(ListItem::new(Line::from(Span::styled(
            "▸ Variables",
            Style::default().fg(theme.secondary),
        ))));
        for variable in &variables {
            let name_color = match variable.color {
                Some(color) => theme.semantic(color),
                None => theme.fg,
            };
            all_items.push(ListItem::new(Line::from(vec![
                Span::raw("    "),
                Span::styled(variable.name, Style::default().fg(name_color)),
                Span::styled(" = ", Style::default().fg(theme.comment)),
                Span::styled(
                    variable.value.to_string(),
                    Style::default().fg(theme.secondary),
                ),
            ])));
        }
        all_items.push(ListItem::new(""));
    }

    match step.call_stack() {
        Some(stack) if !stack.is_empty() => {
            for (depth, call_frame) in stack.frames().iter().enumerate() {
                let frame_header = Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(theme.secondary)),
                    Span::styled(
                        format!("Frame {} ", depth),
                        Style::default().fg(theme.comment),
                    ),
                    Span::styled("│ ", Style::default().fg(theme.comment)),
                    Span::styled(
                        format!("{}()", call_frame.function),
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                all_items.push(ListItem::new(frame_header));

                let saved = &call_frame.saved;
                if saved.is_empty() {
                    continue;
                }
                let joined = saved
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                if 4 + joined.len() <= content_width {
                    all_items.push(ListItem::new(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(joined, Style::default().fg(theme.comment)),
                    ])));
                } else {
                    for variable in saved {
                        all_items.push(ListItem::new(Line::from(vec![
                            Span::raw("    "),
                            Span::styled(
                                variable.to_string(),
                                Style::default().fg(theme.comment),
                            ),
                        ])));
                    }
                }
            }
        }
        _ => {
            all_items.push(ListItem::new(Line::from(Span::styled(
                "(no active calls)",
                Style::default().fg(theme.comment),
            ))));
        }
    }

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
