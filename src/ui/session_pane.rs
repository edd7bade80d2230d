use crate::app::AppState;
use crate::domain::{format_clock, format_minutes, item_badge, plant_glyph, ItemRow, Phase, SessionSnapshot};
use crate::ui::styles::{
    border_style, category_style, default_style, done_style, gauge_style, over_budget_style,
    recording_style, selected_style, title_style, waiting_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// Render the countdown with a gauge of time used
pub fn render_clock_pane(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let title = if snapshot.pinned {
        format!(" ⚡ {} (quick start) ", snapshot.task_title)
    } else {
        format!(" {} ", snapshot.task_title)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Clock text
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    let clock_line = Line::from(vec![
        Span::styled(format_clock(snapshot.remaining_secs), title_style()),
        Span::raw(format!(
            " left of {}   {}",
            format_clock(snapshot.total_secs),
            snapshot.phase.name()
        )),
    ]);
    f.render_widget(Paragraph::new(clock_line), chunks[0]);

    let percent = (snapshot.clock_ratio().clamp(0.0, 1.0) * 100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(percent)
        .label("");
    f.render_widget(gauge, chunks[2]);
}

/// Render the work items with the cursor highlighted
pub fn render_items_pane(f: &mut Frame, app: &AppState, snapshot: &SessionSnapshot, area: Rect) {
    let items: Vec<ListItem> = snapshot
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = create_item_line(row, app.settings.use_emoji);
            let style = if idx == app.cursor {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let mut title = if snapshot.implicit {
        " Task ".to_string()
    } else {
        " Work items ".to_string()
    };
    if snapshot.active_row().is_none() && snapshot.phase == Phase::Running {
        title = format!(
            " Work items (recording on the task, {}) ",
            format_clock(snapshot.task_pending_seconds)
        );
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );
    f.render_widget(list, area);
}

/// Format: [🌿] Outline  ⏱ 5m / 10m +01:30 ⏱ REC [Work]
fn create_item_line(row: &ItemRow, use_emoji: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let ratio = row.live_ratio();
    spans.push(Span::raw(format!("[{}] ", plant_glyph(ratio, use_emoji))));
    spans.push(Span::raw(row.title.clone()));
    spans.push(Span::raw("  ".to_string()));

    let time_style = if ratio > 1.0 && row.allocated_minutes > 0 {
        over_budget_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(
        format!(
            "⏱ {} / {} ",
            format_minutes(row.actual_minutes),
            format_minutes(row.allocated_minutes)
        ),
        time_style,
    ));
    if row.pending_seconds > 0 {
        spans.push(Span::raw(format!("+{} ", format_clock(row.pending_seconds))));
    }

    let badge_style = if row.is_completed {
        done_style()
    } else if row.is_active {
        recording_style()
    } else {
        waiting_style()
    };
    spans.push(Span::styled(item_badge(row).to_string(), badge_style));
    spans.push(Span::styled(
        format!(" [{}]", row.category.label()),
        category_style(row.category),
    ));

    Line::from(spans)
}
