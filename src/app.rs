use crate::assist::{PlainSummarizer, Summarizer, SummaryContext};
use crate::domain::{Phase, Resolution, SessionSnapshot, UiMode};
use crate::error::SessionError;
use crate::notifications;
use crate::persistence::{save_board, Board, Settings};
use crate::session::{quick_start, quick_target, suggested_minutes, FocusSession, Reallocation};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Duration prompt shown before a quick-start session
#[derive(Debug, Clone)]
pub struct QuickPromptState {
    pub task_id: Uuid,
    pub item_id: Uuid,
    pub item_title: String,
    pub suggested: u32,
    pub input: String,
}

/// Main application state for the focus screen
pub struct AppState {
    pub board: Board,
    pub settings: Settings,
    /// Where the board is written; None keeps everything in memory
    pub board_path: Option<PathBuf>,
    pub session: Option<FocusSession>,
    pub quick_prompt: Option<QuickPromptState>,
    pub cursor: usize,
    pub ui_mode: UiMode,
    pub status_message: Option<String>,
    /// Recap of the last resolved session
    pub summary: Option<String>,
    pub needs_save: bool,
    summarizer: Box<dyn Summarizer>,
}

impl AppState {
    pub fn new(board: Board, settings: Settings, board_path: Option<PathBuf>) -> Self {
        Self {
            board,
            settings,
            board_path,
            session: None,
            quick_prompt: None,
            cursor: 0,
            ui_mode: UiMode::Done,
            status_message: None,
            summary: None,
            needs_save: false,
            summarizer: Box::new(PlainSummarizer),
        }
    }

    fn ensure_no_session(&self) -> Result<()> {
        let live = self
            .session
            .as_ref()
            .is_some_and(|s| s.phase() != Phase::Closed);
        if live {
            return Err(SessionError::SessionAlreadyActive.into());
        }
        Ok(())
    }

    /// Open a task in focus mode. The clock waits in the editing phase.
    /// `minutes` overrides the session length taken from the plan.
    pub fn open_focus(&mut self, task_id: Uuid, minutes: Option<u32>) -> Result<()> {
        self.ensure_no_session()?;
        let task = self.board.task(task_id).context("Task not found")?.clone();
        if task.is_backlog {
            anyhow::bail!("Backlog tasks must be promoted before focusing");
        }

        info!(task = %task.title, ?minutes, "opened focus screen");
        let mut session = FocusSession::new(task);
        if let Some(minutes) = minutes {
            session.set_total_minutes(minutes);
        }
        self.session = Some(session);
        self.cursor = 0;
        self.ui_mode = UiMode::Session;
        self.status_message = Some("Space to start the clock".to_string());
        Ok(())
    }

    /// Ask for a quick-start duration for one item
    pub fn open_quick_prompt(&mut self, task_id: Uuid, item_id: Uuid) -> Result<()> {
        self.ensure_no_session()?;
        let task = self.board.task(task_id).context("Task not found")?;
        let item = quick_target(task, item_id)?;

        self.quick_prompt = Some(QuickPromptState {
            task_id,
            item_id,
            suggested: suggested_minutes(&item, self.settings.default_quick_minutes),
            item_title: item.title,
            input: String::new(),
        });
        self.ui_mode = UiMode::QuickPrompt;
        Ok(())
    }

    pub fn quick_prompt_add_char(&mut self, c: char) {
        if let Some(prompt) = &mut self.quick_prompt {
            if c.is_ascii_digit() && prompt.input.len() < 4 {
                prompt.input.push(c);
            }
        }
    }

    pub fn quick_prompt_backspace(&mut self) {
        if let Some(prompt) = &mut self.quick_prompt {
            prompt.input.pop();
        }
    }

    /// Start the quick session with the typed duration (the suggestion if empty)
    pub fn confirm_quick(&mut self, now: Instant) -> Result<()> {
        let prompt = self.quick_prompt.take().context("No quick-start pending")?;
        let minutes = if prompt.input.is_empty() {
            prompt.suggested
        } else {
            prompt.input.parse::<u32>().unwrap_or(prompt.suggested)
        };
        self.start_quick(prompt.task_id, prompt.item_id, minutes, now)
    }

    /// Start a session pinned to one item straight away
    pub fn start_quick(
        &mut self,
        task_id: Uuid,
        item_id: Uuid,
        minutes: u32,
        now: Instant,
    ) -> Result<()> {
        self.ensure_no_session()?;
        let task = self.board.task(task_id).context("Task not found")?;
        let session = quick_start(task, item_id, minutes, now)?;

        self.session = Some(session);
        self.cursor = 0;
        self.ui_mode = UiMode::Session;
        self.status_message = None;
        Ok(())
    }

    pub fn cancel_quick(&mut self) {
        self.quick_prompt = None;
        self.ui_mode = UiMode::Done;
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(FocusSession::snapshot)
    }

    fn item_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.items().len())
    }

    /// Id of the item under the cursor
    pub fn cursor_item_id(&self) -> Option<Uuid> {
        self.session
            .as_ref()
            .and_then(|s| s.items().get(self.cursor))
            .map(|item| item.id)
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.item_count() {
            self.cursor += 1;
        }
    }

    /// Make the item under the cursor the recording one
    pub fn activate_cursor_item(&mut self) {
        let Some(item_id) = self.cursor_item_id() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.set_active(item_id) {
            self.status_message = Some("That item can't be made active".to_string());
        } else {
            self.status_message = None;
        }
    }

    /// Tick off the item under the cursor
    pub fn complete_cursor_item(&mut self) {
        let Some(item_id) = self.cursor_item_id() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            if session.complete_item(item_id) {
                self.status_message = Some("Item completed".to_string());
            }
        }
    }

    /// Change the budget of the item under the cursor while editing
    pub fn adjust_cursor_allocation(&mut self, delta_minutes: i32) {
        let Some(item_id) = self.cursor_item_id() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.adjust_allocation(item_id, delta_minutes);
        }
    }

    pub fn start_clock(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase() != Phase::Editing {
            return;
        }
        match session.start(now) {
            Phase::Reviewing => {
                self.status_message = Some("Nothing planned, straight to review".to_string());
                self.ui_mode = UiMode::Review;
            }
            _ => {
                // Follow the auto-selected item
                if let Some(active) = session.active_item_id() {
                    if let Some(idx) = session.items().iter().position(|i| i.id == active) {
                        self.cursor = idx;
                    }
                }
                self.status_message = None;
            }
        }
    }

    /// "Extend +5m"
    pub fn extend(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(outcome) = session.reallocate() else {
            return;
        };
        let message = match outcome {
            Reallocation::Transferred { taken, .. } if taken < 5 => {
                format!("+5m from the next item (only {}m was left there)", taken)
            }
            Reallocation::Transferred { .. } => "+5m borrowed from the next item".to_string(),
            Reallocation::ClockExtended { .. } => "+5m added to the clock".to_string(),
        };
        self.status_message = Some(message);
    }

    /// Finish early and go to review
    pub fn finish_early(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            if session.stop(now) {
                self.ui_mode = UiMode::Review;
                self.status_message = None;
            }
        }
    }

    /// Advance the session clock; notify when it runs out
    pub fn tick(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase() != Phase::Running {
            return;
        }
        if session.tick(now) == Phase::Reviewing {
            self.ui_mode = UiMode::Review;
            self.status_message = Some("Time's up".to_string());
            if self.settings.notifications {
                notifications::notify_session_over(&session.task().title);
            }
        }
    }

    /// Apply the chosen resolution and store the outcome on the board
    pub fn resolve(&mut self, choice: Resolution) -> Result<()> {
        let session = self.session.as_mut().context("No session open")?;
        let review = session.review();

        let resolved = match session.resolve(choice) {
            Ok(resolved) => resolved,
            Err(err @ SessionError::UnsupportedResolution(_)) => {
                self.status_message = Some(err.to_string());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        info!(task = %resolved.task.title, ?choice, "session resolved");

        if let Some(review) = review {
            let context = SummaryContext {
                review,
                migrated: resolved.backlog.len(),
            };
            let summary = self.summarizer.summarize(&context);
            if self.settings.notifications {
                notifications::notify_session_saved(&summary);
            }
            self.summary = Some(summary);
        }

        self.board.apply_resolution(resolved);
        self.needs_save = true;
        self.ui_mode = UiMode::Done;
        self.status_message = None;
        Ok(())
    }

    /// Leave the screen. A live session keeps its recorded time.
    pub fn abandon(&mut self, now: Instant) -> Result<()> {
        self.quick_prompt = None;
        let Some(session) = self.session.as_mut() else {
            self.ui_mode = UiMode::Done;
            return Ok(());
        };
        if session.phase() == Phase::Closed {
            self.ui_mode = UiMode::Done;
            return Ok(());
        }

        let resolved = session.abandon(now)?;
        warn!(task = %resolved.task.title, "session abandoned");
        self.board.apply_resolution(resolved);
        self.needs_save = true;
        self.ui_mode = UiMode::Done;
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.board_path {
            save_board(path, &self.board)?;
        }
        self.needs_save = false;
        Ok(())
    }
}
