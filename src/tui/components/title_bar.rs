//! # TitleBar Component
//!
//! Single-line top bar: where the learner is, plus the latest status message.
//! Purely presentational — all three props come in from the draw code.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    /// Open course title, if a course view is active.
    pub course_title: Option<String>,
    /// 1-based step position within the course, `(current, total)`.
    pub position: Option<(usize, usize)>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        course_title: Option<String>,
        position: Option<(usize, usize)>,
        status_message: String,
    ) -> Self {
        Self {
            course_title,
            position,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text = String::from("Sensei");
        if let Some(title) = &self.course_title {
            text.push_str(&format!(" — {title}"));
        }
        if let Some((current, total)) = self.position {
            text.push_str(&format!(" (step {current}/{total})"));
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        frame.render_widget(Span::raw(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut bar: TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_in_course() {
        let text = rendered(TitleBar::new(
            Some("Linear Regression".into()),
            Some((3, 8)),
            "Visualizing Error (MSE)".into(),
        ));
        assert!(text.contains("Sensei — Linear Regression (step 3/8)"));
        assert!(text.contains("| Visualizing Error (MSE)"));
    }

    #[test]
    fn test_title_bar_on_picker() {
        let text = rendered(TitleBar::new(None, None, "Welcome to Sensei!".into()));
        assert!(text.contains("Sensei | Welcome to Sensei!"));
        assert!(!text.contains("step"));
    }

    #[test]
    fn test_title_bar_without_status() {
        let text = rendered(TitleBar::new(None, None, String::new()));
        assert!(text.contains("Sensei"));
        assert!(!text.contains('|'));
    }
}
