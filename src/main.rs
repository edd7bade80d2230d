mod app;
mod assist;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod session;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use assist::{Categorizer, KeywordCategorizer};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{flatten_tasks, format_minutes, tree_connector, Category, Task};
use persistence::{
    board_file, get_stint_dir, init_local_dir, load_board, load_settings, log_file, save_board,
    save_settings, settings_file, Board, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "Timed focus sessions over your task list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .stint directory in the current directory
    Init,
    /// Add a task
    Add {
        title: String,
        /// Planned minutes (ignored once the task has subtasks)
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Add a subtask (work item) to a task
    Sub {
        /// Task number from `stint list`
        task: usize,
        title: String,
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
    },
    /// List tasks and their work items
    List,
    /// Manage the backlog
    Backlog {
        #[command(subcommand)]
        command: BacklogCommands,
    },
    /// Tick off a work item (or a whole task) without timing it
    Done {
        task: usize,
        /// Subtask number within the task
        sub: Option<usize>,
    },
    /// Toggle a task between completed and todo
    Toggle { task: usize },
    /// Remove a task, or one of its subtasks
    Remove { task: usize, sub: Option<usize> },
    /// Open a task in focus mode
    Focus {
        task: usize,
        /// Session length instead of the planned duration
        #[arg(short, long)]
        minutes: Option<u32>,
    },
    /// Time a single work item, or a task without subtasks
    Quick {
        task: usize,
        /// Subtask number; omit for a task without subtasks
        sub: Option<usize>,
        /// Skip the prompt and start with this many minutes
        #[arg(short, long)]
        minutes: Option<u32>,
    },
}

#[derive(Subcommand)]
enum BacklogCommands {
    /// Add a backlog task; the category is guessed from the title if omitted
    Add {
        title: String,
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// List backlog tasks
    List,
    /// Move a backlog task into a task as a work item
    Promote {
        /// Backlog number from `stint backlog list`
        number: usize,
        /// Task number from `stint list`
        into: usize,
    },
}

fn parse_category(label: &str) -> Result<Category, String> {
    Category::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = Category::all().iter().map(|c| c.label()).collect();
        format!("unknown category, expected one of: {}", known.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        let dir = init_local_dir()?;
        save_settings(dir.join("settings.json"), &Settings::default())?;
        println!("Initialized stint directory: {}", dir.display());
        println!();
        println!("Stint will now use this local directory for its board.");
        return Ok(());
    }

    let settings = load_settings(settings_file()?)?;
    let _log_guard = match logging::init_logging(&log_file()?, &settings.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let board_path = board_file()?;
    let mut board = load_board(&board_path)?;

    match cli.command {
        Commands::Init => {}
        Commands::Add {
            title,
            minutes,
            category,
        } => {
            let task = Task::new(title, category.unwrap_or_default(), minutes);
            println!("Added \"{}\" ({})", task.title, task.category.label());
            board.add_task(task);
            save_board(&board_path, &board)?;
        }
        Commands::Sub {
            task,
            title,
            minutes,
        } => {
            let task_id = board.active_id(task)?;
            let task = board.task_mut(task_id).context("Task not found")?;
            let keeps_plan = task.subtasks.is_empty() && task.planned_duration_minutes > 0;
            task.add_subtask(title, minutes);
            if keeps_plan {
                println!(
                    "Kept the existing plan of \"{}\" as its first item",
                    task.title
                );
            }
            println!(
                "\"{}\" now plans {}",
                task.title,
                format_minutes(task.planned_duration_minutes)
            );
            save_board(&board_path, &board)?;
        }
        Commands::List => print_tasks(&board),
        Commands::Backlog { command } => run_backlog(command, &mut board, &board_path)?,
        Commands::Done { task, sub } => {
            let task_id = board.active_id(task)?;
            match sub {
                Some(sub) => {
                    let item_id = board.subtask_id(task_id, sub)?;
                    let task = board.task_mut(task_id).context("Task not found")?;
                    session::quick_complete(task, item_id)?;
                }
                None => {
                    let task = board.task_mut(task_id).context("Task not found")?;
                    if task.subtasks.is_empty() {
                        session::quick_complete(task, task_id)?;
                    } else {
                        task.mark_completed();
                    }
                }
            }
            save_board(&board_path, &board)?;
        }
        Commands::Toggle { task } => {
            let task_id = board.active_id(task)?;
            let task = board.task_mut(task_id).context("Task not found")?;
            task.toggle_completed();
            println!("\"{}\" is now {}", task.title, task.status.to_tag());
            save_board(&board_path, &board)?;
        }
        Commands::Remove { task, sub } => {
            let task_id = board.active_id(task)?;
            match sub {
                Some(sub) => {
                    let item_id = board.subtask_id(task_id, sub)?;
                    let task = board.task_mut(task_id).context("Task not found")?;
                    task.remove_subtask(item_id);
                }
                None => {
                    board.remove_task(task_id);
                }
            }
            save_board(&board_path, &board)?;
        }
        Commands::Focus { task, minutes } => {
            let task_id = board.active_id(task)?;
            let mut app = AppState::new(board, settings, Some(board_path));
            app.open_focus(task_id, minutes)?;
            run_tui(app)?;
        }
        Commands::Quick { task, sub, minutes } => {
            let task_id = board.active_id(task)?;
            let item_id = match sub {
                Some(sub) => board.subtask_id(task_id, sub)?,
                None => task_id,
            };
            let mut app = AppState::new(board, settings, Some(board_path));
            match minutes {
                Some(minutes) => app.start_quick(task_id, item_id, minutes, Instant::now())?,
                None => app.open_quick_prompt(task_id, item_id)?,
            }
            run_tui(app)?;
        }
    }

    Ok(())
}

fn run_backlog(command: BacklogCommands, board: &mut Board, path: &std::path::Path) -> Result<()> {
    match command {
        BacklogCommands::Add {
            title,
            minutes,
            category,
        } => {
            let category = category.unwrap_or_else(|| KeywordCategorizer.categorize(&title));
            let task = Task::new_backlog(title, category, minutes);
            println!("Backlogged \"{}\" ({})", task.title, task.category.label());
            board.add_task(task);
            save_board(path, board)?;
        }
        BacklogCommands::List => {
            for (idx, task) in board.backlog().iter().enumerate() {
                println!(
                    "{:>3}. {}  [{}] {}",
                    idx + 1,
                    task.title,
                    task.category.label(),
                    format_minutes(task.planned_duration_minutes)
                );
            }
        }
        BacklogCommands::Promote { number, into } => {
            let backlog_id = board.backlog_id(number)?;
            let into_id = board.active_id(into)?;
            board.promote(backlog_id, into_id)?;
            if let Some(task) = board.task(into_id) {
                println!(
                    "\"{}\" now plans {}",
                    task.title,
                    format_minutes(task.planned_duration_minutes)
                );
            }
            save_board(path, board)?;
        }
    }
    Ok(())
}

fn print_tasks(board: &Board) {
    let tasks = board.active();
    for row in flatten_tasks(&tasks) {
        let task = tasks[row.task_index];
        match row.subtask_index {
            None => println!(
                "{:>3}. {}  [{}] {} / {}  {}",
                row.number,
                task.title,
                task.category.label(),
                format_minutes(task.actual_duration_minutes),
                format_minutes(task.planned_duration_minutes),
                task.status.to_tag()
            ),
            Some(st_idx) => {
                let item = &task.subtasks[st_idx];
                let mark = if item.is_completed { "✓" } else { " " };
                println!(
                    "      {} {}. {} {}  {} / {}",
                    tree_connector(row.is_last),
                    row.number,
                    mark,
                    item.title,
                    item.actual_formatted(),
                    item.allocated_formatted()
                );
            }
        }
    }
}

fn run_tui(mut app: AppState) -> Result<()> {
    let stint_dir = get_stint_dir()?;
    info!(dir = %stint_dir.display(), "starting focus screen");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Leaving on an error still keeps the recorded time
    if result.is_err() {
        if let Err(e) = app.abandon(Instant::now()) {
            tracing::error!(error = %e, "failed to close session");
        }
    }
    if app.needs_save {
        app.save()?;
    }
    if let Some(summary) = &app.summary {
        println!("{}", summary);
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration(app.settings.tick_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, Instant::now())? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());

        if app.needs_save {
            app.save()?;
        }
    }
}
