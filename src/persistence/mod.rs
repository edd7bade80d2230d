pub mod files;
pub mod settings;
pub mod store;

pub use files::{
    atomic_write, board_file, get_stint_dir, init_local_dir, log_file, read_file, settings_file,
};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{load_board, save_board, Board};
