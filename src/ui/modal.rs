use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the quick-start duration prompt
pub fn render_quick_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(prompt) = &app.quick_prompt else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let typed = if prompt.input.is_empty() {
        format!("{} (suggested)", prompt.suggested)
    } else {
        prompt.input.clone()
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", prompt.item_title)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Minutes: "),
            Span::styled(typed, modal_title_style()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" Start  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" ⚡ Quick start ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the recap after a session is resolved
pub fn render_summary_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let text = app
        .summary
        .clone()
        .unwrap_or_else(|| "Session closed. Recorded time was saved.".to_string());

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", text)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" Exit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Saved ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
