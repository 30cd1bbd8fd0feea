//! Heap tree pane rendering
//!
//! Renders the heap region of the array as a binary tree, using the implicit
//! children-at `2i+1`/`2i+2` layout. Only indexes below the heap boundary are
//! part of the tree; extracted elements live in the sorted tail of the array
//! pane. Each node shows its value, colored by the current step's highlight
//! for that position, with the array index alongside.

use crate::step::{ArraySnapshot, StepPayload, StepResult};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn push_tree_lines(
    snapshot: &ArraySnapshot,
    heap_end: usize,
    index: usize,
    prefix: String,
    connector: &'static str,
    theme: &Theme,
    lines: &mut Vec<Line<'static>>,
) {
    let item = snapshot.items()[index];
    let value_style = match snapshot.highlight(index) {
        Some(color) => Style::default()
            .fg(theme.semantic(color))
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(theme.fg),
    };

    let mut spans = Vec::new();
    if !prefix.is_empty() || !connector.is_empty() {
        spans.push(Span::styled(
            format!("{}{}", prefix, connector),
            Style::default().fg(theme.comment),
        ));
    }
    spans.push(Span::styled(item.value.to_string(), value_style));
    spans.push(Span::styled(
        format!("  [{}]", index),
        Style::default().fg(theme.comment),
    ));
    lines.push(Line::from(spans));

    let left = 2 * index + 1;
    let right = left + 1;
    if left >= heap_end {
        return;
    }
    let child_prefix = if connector.is_empty() {
        prefix
    } else if connector == "├─ " {
        format!("{}│  ", prefix)
    } else {
        format!("{}   ", prefix)
    };
    if right < heap_end {
        push_tree_lines(
            snapshot,
            heap_end,
            left,
            child_prefix.clone(),
            "├─ ",
            theme,
            lines,
        );
        push_tree_lines(snapshot, heap_end, right, child_prefix, "└─ ", theme, lines);
    } else {
        push_tree_lines(snapshot, heap_end, left, child_prefix, "└─ ", theme, lines);
    }
}

/// Render the heap tree pane
pub fn render_tree_pane(
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
        .title(" Heap ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = Vec::new();
    match step.payload() {
        StepPayload::Heap {
            array, heap_end, ..
        } if *heap_end > 0 => {
            push_tree_lines(array, *heap_end, 0, String::new(), "", theme, &mut lines);
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "(heap empty)",
                Style::default().fg(theme.comment),
            )));
        }
    }

    // Clamp scroll offset only if content exceeds visible area
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let paragraph = Paragraph::new(visible).block(block);
    frame.render_widget(paragraph, area);
}
