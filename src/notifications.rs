/// Cross-platform notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

#[cfg(target_os = "macos")]
fn display(title: &str, message: &str) {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        message.replace('"', "\\\""),
        title.replace('"', "\\\"")
    );

    let _ = Command::new("osascript").arg("-e").arg(&script).output();
}

/// Send a notification when a session clock runs out
pub fn notify_session_over(task_title: &str) {
    #[cfg(target_os = "macos")]
    display("Stint - Time's up", &format!("⏰ {}", task_title));

    #[cfg(not(target_os = "macos"))]
    {
        let _ = task_title;
    }
}

/// Send a notification when a session is resolved
pub fn notify_session_saved(summary: &str) {
    #[cfg(target_os = "macos")]
    display("Stint - Session saved", summary);

    #[cfg(not(target_os = "macos"))]
    {
        let _ = summary;
    }
}
