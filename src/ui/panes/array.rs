//! Array pane rendering
//!
//! Renders the working array as horizontal bars, one row per element, with
//! per-position semantic colors from the current step. Auxiliary arrays
//! (merge sort's take queues) render below the primary array under their own
//! headers, and tracked variables appear as markers next to the row their
//! value points at.

use crate::step::{ArraySnapshot, StepResult, Variable};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bar width for a value, scaled into `1..=max_bar` over the array's spread.
fn bar_width(value: i32, min_value: i32, spread: i64, max_bar: usize) -> usize {
    if max_bar == 0 {
        return 0;
    }
    if spread == 0 {
        return max_bar;
    }
    let offset = i64::from(value) - i64::from(min_value);
    (1 + (offset * (max_bar as i64 - 1)) / spread) as usize
}

fn push_array_rows(
    snapshot: &ArraySnapshot,
    variables: &[Variable],
    theme: &Theme,
    content_width: usize,
    indent: usize,
    lines: &mut Vec<Line<'static>>,
) {
    let items = snapshot.items();
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{}(empty)", " ".repeat(indent)),
            Style::default().fg(theme.comment),
        )));
        return;
    }

    let min_value = items.iter().map(|item| item.value).min().unwrap_or(0);
    let max_value = items.iter().map(|item| item.value).max().unwrap_or(0);
    let spread = i64::from(max_value) - i64::from(min_value);

    // Reserve room for the index column and the value plus markers after the bar
    let max_bar = content_width.saturating_sub(indent + 4 + 14);

    for (idx, item) in items.iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{}{:>3} ", " ".repeat(indent), idx),
            Style::default().fg(theme.comment),
        )];

        let (mut bar_style, mut value_style) = match snapshot.highlight(idx) {
            Some(color) => {
                let concrete = theme.semantic(color);
                (
                    Style::default().fg(concrete).add_modifier(Modifier::BOLD),
                    Style::default().fg(concrete).add_modifier(Modifier::BOLD),
                )
            }
            None => (
                Style::default().fg(theme.muted),
                Style::default().fg(theme.fg),
            ),
        };
        if item.duplicated {
            bar_style = bar_style.add_modifier(Modifier::DIM);
            value_style = value_style.add_modifier(Modifier::DIM);
        }

        let width = bar_width(item.value, min_value, spread, max_bar);
        spans.push(Span::styled("█".repeat(width), bar_style));
        spans.push(Span::styled(format!(" {}", item.value), value_style));

        if let Some(draw) = item.draw_index {
            if draw != idx {
                spans.push(Span::styled(
                    format!(" ⇢ {}", draw),
                    Style::default().fg(theme.comment),
                ));
            }
        }

        for variable in variables.iter().filter(|v| v.draw_at == Some(idx)) {
            let marker_color = match variable.color {
                Some(color) => theme.semantic(color),
                None => theme.accent,
            };
            spans.push(Span::styled(
                format!(" ◂ {}", variable.name),
                Style::default().fg(marker_color).add_modifier(Modifier::BOLD),
            ));
        }

        lines.push(Line::from(spans));
    }
}

/// Render the array pane
pub fn render_array_pane(
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
        .title(" Array ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    push_array_rows(
        step.primary(),
        step.variables(),
        theme,
        content_width,
        0,
        &mut lines,
    );

    for named in step.payload().auxiliary() {
        lines.push(Line::default());
        let mut header = vec![
            Span::styled("▸ ", Style::default().fg(theme.secondary)),
            Span::styled(
                named.name,
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ),
        ];
        if !named.variables.is_empty() {
            let joined = named
                .variables
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            header.push(Span::styled(
                format!("  ({})", joined),
                Style::default().fg(theme.comment),
            ));
        }
        lines.push(Line::from(header));
        push_array_rows(
            &named.snapshot,
            &named.variables,
            theme,
            content_width,
            2,
            &mut lines,
        );
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
