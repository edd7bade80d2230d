use crate::domain::{Phase, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current screen
fn hints(ui_mode: UiMode, phase: Option<Phase>) -> Vec<&'static str> {
    match (ui_mode, phase) {
        (UiMode::Session, Some(Phase::Editing)) => vec![
            " ↑/↓ select   ",
            "+ / - budget   ",
            "Enter make active   ",
            "x done   ",
            "Space start   ",
            "q quit",
        ],
        (UiMode::Session, _) => vec![
            " ↑/↓ select   ",
            "Enter make active   ",
            "x done   ",
            "e extend +5m   ",
            "s finish early   ",
            "q quit",
        ],
        (UiMode::QuickPrompt, _) => vec![" type minutes   ", "Enter start   ", "Esc cancel"],
        (UiMode::Review, _) => vec![
            " c close & save   ",
            "C close & complete   ",
            "m migrate rest to backlog   ",
            "q close",
        ],
        (UiMode::Done, _) => vec![" Enter / q exit"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, ui_mode: UiMode, phase: Option<Phase>) {
    let spans: Vec<Span> = hints(ui_mode, phase).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_phase() {
        let editing = hints(UiMode::Session, Some(Phase::Editing));
        assert!(editing.iter().any(|h| h.contains("Space start")));

        let running = hints(UiMode::Session, Some(Phase::Running));
        assert!(running.iter().any(|h| h.contains("extend")));
        assert!(!running.iter().any(|h| h.contains("budget")));
    }
}
