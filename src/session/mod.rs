pub mod clock;
pub mod focus;
pub mod ledger;
pub mod quick;
pub mod realloc;
pub mod review;
pub mod selector;

pub use focus::FocusSession;
pub use quick::{
    quick_complete, quick_start, quick_target, suggested_minutes, DEFAULT_QUICK_MINUTES,
};
pub use realloc::Reallocation;
pub use review::{Resolved, Review};
