//! Status bar rendering with keybindings and state indicators

use crate::step::StepKind;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub granularity: StepKind,
    pub code_step: usize,
    pub end_code: Option<usize>,
    pub full_step: usize,
    pub end_full: Option<usize>,
    pub sub_step: (usize, usize),
    pub is_playing: bool,
}

/// Render the status bar at the bottom.
///
/// Totals show as `?` until the algorithm's final step has been generated.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData, theme: &Theme) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(45),
            ratatui::layout::Constraint::Percentage(55),
        ])
        .split(area);

    // Left side: positions at all three granularities, the active one
    // highlighted, then the granularity badge and the message
    let code_text = match data.end_code {
        Some(end) => format!(" Step {}/{} ", data.code_step + 1, end + 1),
        None => format!(" Step {}/? ", data.code_step + 1),
    };
    let sub_text = format!(" Block {}.{} ", data.sub_step.0 + 1, data.sub_step.1 + 1);
    let full_text = match data.end_full {
        Some(end) => format!(" Pass {}/{} ", data.full_step + 1, end + 1),
        None => format!(" Pass {}/? ", data.full_step + 1),
    };

    let active_style = Style::default()
        .bg(theme.primary)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    let inactive_style = Style::default().bg(theme.comment).fg(Color::Black);

    let left_spans = vec![
        Span::styled(
            code_text,
            if data.granularity == StepKind::Code {
                active_style
            } else {
                inactive_style
            },
        ),
        Span::styled(
            sub_text,
            if data.granularity == StepKind::Significant {
                active_style
            } else {
                inactive_style
            },
        ),
        Span::styled(
            full_text,
            if data.granularity == StepKind::Algorithmic {
                active_style
            } else {
                inactive_style
            },
        ),
        Span::styled(
            format!(" {} ", data.granularity.label()),
            Style::default().bg(theme.comment).fg(Color::Black),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(theme.current_line_bg)
                .fg(theme.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default().bg(theme.current_line_bg).fg(theme.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(theme.comment).fg(Color::Black);
    let desc_style = Style::default().bg(theme.current_line_bg).fg(theme.fg);
    let sep_style = Style::default()
        .bg(theme.current_line_bg)
        .fg(theme.comment);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" g ", key_style),
        Span::styled(" grain ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ / ⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" rerun ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    // Show status indicators based on position and state
    let is_at_start = data.code_step == 0;
    let is_at_end = data.end_code.is_some_and(|end| data.code_step >= end);

    if data.is_playing {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " ▶ PLAYING ",
            Style::default()
                .bg(theme.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_end {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " SORTED ",
            Style::default()
                .bg(theme.sorted)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_start {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " START ",
            Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DARK_THEME;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(data: StatusRenderData) -> String {
        let backend = TestBackend::new(160, 1);
        let mut terminal = Terminal::new(backend).expect("test backend");
        terminal
            .draw(|frame| render_status_bar(frame, frame.area(), data, &DARK_THEME))
            .expect("status bar renders");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, 0).symbol());
        }
        text
    }

    #[test]
    fn test_all_three_positions_rendered_at_once() {
        let text = rendered_text(StatusRenderData {
            message: "Ready!",
            granularity: StepKind::Code,
            code_step: 4,
            end_code: Some(41),
            full_step: 1,
            end_full: Some(2),
            sub_step: (1, 2),
            is_playing: false,
        });
        assert!(text.contains("Step 5/42"), "code position missing: {}", text);
        assert!(text.contains("Block 2.3"), "sub position missing: {}", text);
        assert!(text.contains("Pass 2/3"), "full position missing: {}", text);
        assert!(text.contains(" code "), "granularity badge missing: {}", text);
    }

    #[test]
    fn test_unknown_totals_render_as_question_marks() {
        let text = rendered_text(StatusRenderData {
            message: "Stepping",
            granularity: StepKind::Algorithmic,
            code_step: 7,
            end_code: None,
            full_step: 2,
            end_full: None,
            sub_step: (2, 0),
            is_playing: false,
        });
        assert!(text.contains("Step 8/?"), "open code total missing: {}", text);
        assert!(text.contains("Pass 3/?"), "open full total missing: {}", text);
    }
}
