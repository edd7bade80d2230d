pub mod enums;
pub mod item;
pub mod views;

pub use enums::{Category, Phase, Resolution, UiMode};
pub use item::{format_minutes, Task, WorkItem};
pub use views::{
    flatten_tasks, format_clock, item_badge, plant_glyph, tree_connector, ItemRow, SessionSnapshot,
};
