//! Pseudocode pane rendering
//!
//! Renders the pseudocode listing of the running algorithm. Lines touched by
//! the current step are marked with an arrow and tinted in the semantic color
//! the step attached to them, so comparisons, swaps, and completed regions
//! read differently at a glance.

use crate::step::StepResult;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn word_span(word: &str, theme: &Theme) -> Span<'static> {
    let style = match word {
        "for" | "while" | "if" | "else" | "to" | "downto" | "do" | "then" | "repeat" | "until"
        | "swap" | "not" | "and" | "or" | "return" | "procedure" => Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
        _ if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(theme.secondary)
        }
        _ => Style::default().fg(theme.fg),
    };
    Span::styled(word.to_string(), style)
}

/// Simple keyword emphasis for pseudocode lines
fn highlight_pseudocode(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            current_word.push(c);
            continue;
        }
        if !current_word.is_empty() {
            spans.push(word_span(&current_word, theme));
            current_word.clear();
        }
        let style = match c {
            '(' | ')' | '[' | ']' => Style::default().fg(theme.primary),
            _ => Style::default().fg(theme.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }
    if !current_word.is_empty() {
        spans.push(word_span(&current_word, theme));
    }

    spans
}

/// Render the pseudocode pane
#[allow(clippy::too_many_arguments)]
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    listing: &[&str],
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
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    // Clamp scroll offset only if content exceeds visible area
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if listing.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(listing.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let lines: Vec<Line> = listing
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let highlight = step.line_highlight(idx);
            let num_style = if highlight.is_some() {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.comment)
            };

            let mut spans = vec![Span::styled(format!("{:2} ", idx + 1), num_style)];
            let mut content = highlight_pseudocode(text, theme);
            match highlight {
                Some(color) => {
                    spans.push(Span::styled(
                        "▸ ",
                        Style::default()
                            .fg(theme.semantic(color))
                            .bg(theme.current_line_bg)
                            .add_modifier(Modifier::BOLD),
                    ));
                    let overlay = Style::default().bg(theme.current_line_bg);
                    for span in &mut content {
                        span.style = span.style.patch(overlay);
                    }
                }
                None => spans.push(Span::raw("  ")),
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
