pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod review_pane;
pub mod session_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_quick_prompt, render_summary_modal};
use ratatui::{text::Span, widgets::Paragraph, Frame};
use review_pane::render_review_pane;
use session_pane::{render_clock_pane, render_items_pane};
use styles::hint_style;

/// Main render function - draws the entire focus screen
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let snapshot = app.snapshot();

    render_keybindings(
        f,
        layout.keybindings_area,
        app.ui_mode,
        snapshot.as_ref().map(|s| s.phase),
    );

    if let Some(snapshot) = &snapshot {
        render_clock_pane(f, snapshot, layout.clock_area);

        let review = app.session.as_ref().and_then(|s| s.review());
        match review {
            Some(review) if app.ui_mode == UiMode::Review => {
                render_review_pane(f, &review, layout.items_area)
            }
            _ => render_items_pane(f, app, snapshot, layout.items_area),
        }
    }

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::raw(format!(" {}", message))).style(hint_style());
        f.render_widget(status, layout.status_area);
    }

    match app.ui_mode {
        UiMode::QuickPrompt => render_quick_prompt(f, app, size),
        UiMode::Done => render_summary_modal(f, app, size),
        UiMode::Session | UiMode::Review => {}
    }
}
