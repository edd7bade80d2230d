use crate::domain::format_minutes;
use crate::session::review::{ItemReview, Review};
use crate::ui::styles::{
    border_style, default_style, done_style, over_budget_style, title_style, waiting_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the end-of-session breakdown
pub fn render_review_pane(f: &mut Frame, review: &Review, area: Rect) {
    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    for row in &review.rows {
        lines.push(create_review_line(row));
    }

    lines.push(Line::raw(""));
    if review.task_level_minutes > 0 {
        lines.push(Line::raw(format!(
            "  Recorded on the task itself: {}",
            format_minutes(review.task_level_minutes)
        )));
    }
    lines.push(Line::from(vec![
        Span::raw("  This session: "),
        Span::styled(format_minutes(review.total_added_minutes), title_style()),
        Span::raw(format!("   {} item(s) still open", review.incomplete_count())),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(
                    format!(" Review: {} ", review.task_title),
                    title_style(),
                )),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Format:   ✓ Outline   12m / 10m  (+12m)
fn create_review_line(row: &ItemReview) -> Line<'static> {
    let (mark, mark_style) = if row.is_completed {
        ("✓", done_style())
    } else {
        ("·", waiting_style())
    };
    let time_style = if row.is_over_budget() {
        over_budget_style()
    } else {
        default_style()
    };

    Line::from(vec![
        Span::styled(format!("  {} ", mark), mark_style),
        Span::raw(row.title.clone()),
        Span::raw("   ".to_string()),
        Span::styled(
            format!(
                "{} / {}",
                format_minutes(row.actual_minutes),
                format_minutes(row.allocated_minutes)
            ),
            time_style,
        ),
        Span::raw(format!("  (+{})", format_minutes(row.added_minutes))),
    ])
}
