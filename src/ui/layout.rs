use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Focus screen layout
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub clock_area: Rect,
    pub items_area: Rect,
    pub status_area: Rect,
}

/// Create the focus screen layout
/// - Top bar: keybindings (1 row)
/// - Clock pane with countdown and gauge
/// - Item list (or review breakdown)
/// - Status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(5), // Clock
            Constraint::Min(0),    // Items
            Constraint::Length(1), // Status line
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        clock_area: chunks[1],
        items_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.clock_area.height, 5);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.items_area.height, 43);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 10);
    }
}
