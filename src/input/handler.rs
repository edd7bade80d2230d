use crate::app::AppState;
use crate::domain::{Phase, Resolution, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Minutes added or removed per `+` / `-` press while editing
const ALLOCATION_STEP: i32 = 5;

/// Handle keyboard input events. Returns true when the screen should close.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match app.ui_mode {
        UiMode::Session => handle_session_mode(app, key, now),
        UiMode::QuickPrompt => handle_quick_prompt_mode(app, key, now),
        UiMode::Review => handle_review_mode(app, key, now),
        UiMode::Done => Ok(matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
        )),
    }
}

/// Handle keys while the session is being edited or is running
fn handle_session_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    let phase = app.session.as_ref().map(|s| s.phase());

    match key.code {
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),

        KeyCode::Enter => app.activate_cursor_item(),
        KeyCode::Char('x') | KeyCode::Char('X') => app.complete_cursor_item(),

        // Plan adjustments before the clock starts
        KeyCode::Char('+') | KeyCode::Char('=') if phase == Some(Phase::Editing) => {
            app.adjust_cursor_allocation(ALLOCATION_STEP);
        }
        KeyCode::Char('-') | KeyCode::Char('_') if phase == Some(Phase::Editing) => {
            app.adjust_cursor_allocation(-ALLOCATION_STEP);
        }
        KeyCode::Char(' ') => app.start_clock(now),

        KeyCode::Char('e') | KeyCode::Char('E') => app.extend(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.finish_early(now),

        KeyCode::Char('q') | KeyCode::Esc => {
            app.abandon(now)?;
            return Ok(true);
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the quick-start duration prompt
fn handle_quick_prompt_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.quick_prompt_add_char(c),
        KeyCode::Backspace => app.quick_prompt_backspace(),
        KeyCode::Enter => app.confirm_quick(now)?,
        KeyCode::Esc | KeyCode::Char('q') => {
            app.cancel_quick();
            return Ok(true);
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys on the review screen
fn handle_review_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Char('c') => app.resolve(Resolution::CloseAndSave { complete: false })?,
        KeyCode::Char('C') => app.resolve(Resolution::CloseAndSave { complete: true })?,
        KeyCode::Char('m') | KeyCode::Char('M') => app.resolve(Resolution::MigrateRemaining)?,
        KeyCode::Char('q') | KeyCode::Esc => {
            app.abandon(now)?;
            return Ok(true);
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::TaskStatus;
    use crate::domain::{Category, Task};
    use crate::persistence::{Board, Settings};
    use crossterm::event::KeyModifiers;
    use std::time::Duration;
    use uuid::Uuid;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn focused_app() -> (AppState, Uuid) {
        let mut board = Board::default();
        let mut task = Task::new("Essay".to_string(), Category::Study, 0);
        task.add_subtask("Outline".to_string(), 10);
        task.add_subtask("Draft".to_string(), 20);
        let task_id = board.add_task(task);
        let settings = Settings {
            notifications: false,
            ..Settings::default()
        };
        let mut app = AppState::new(board, settings, None);
        app.open_focus(task_id, None).unwrap();
        (app, task_id)
    }

    #[test]
    fn test_plus_only_adjusts_while_editing() {
        let (mut app, _) = focused_app();
        let t0 = Instant::now();

        handle_key(&mut app, key(KeyCode::Char('+')), t0).unwrap();
        assert_eq!(app.snapshot().unwrap().rows[0].allocated_minutes, 15);

        handle_key(&mut app, key(KeyCode::Char(' ')), t0).unwrap();
        handle_key(&mut app, key(KeyCode::Char('+')), t0).unwrap();
        assert_eq!(app.snapshot().unwrap().rows[0].allocated_minutes, 15);
    }

    #[test]
    fn test_stop_then_close_and_complete() {
        let (mut app, task_id) = focused_app();
        let t0 = Instant::now();

        handle_key(&mut app, key(KeyCode::Char(' ')), t0).unwrap();
        app.tick(t0 + Duration::from_secs(30));
        handle_key(&mut app, key(KeyCode::Char('s')), t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Review);

        let quit = handle_key(&mut app, key(KeyCode::Char('C')), t0).unwrap();
        assert!(!quit);
        assert_eq!(
            app.board.task(task_id).unwrap().status,
            TaskStatus::Completed
        );
        assert!(handle_key(&mut app, key(KeyCode::Enter), t0).unwrap());
    }

    #[test]
    fn test_quit_while_running_abandons() {
        let (mut app, task_id) = focused_app();
        let t0 = Instant::now();
        handle_key(&mut app, key(KeyCode::Char(' ')), t0).unwrap();

        let quit = handle_key(&mut app, key(KeyCode::Char('q')), t0 + Duration::from_secs(5)).unwrap();
        assert!(quit);
        let task = app.board.task(task_id).unwrap();
        assert_eq!(task.actual_duration_minutes, 1);
        assert!(app.needs_save);
    }
}
