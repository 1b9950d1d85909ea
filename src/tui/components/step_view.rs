//! # Step View
//!
//! Scrollable pane for a step's markdown content. The content is rendered
//! into a `ScrollView` canvas sized to the wrapped text, so arrow keys and
//! PageUp/PageDown scroll through material taller than the terminal.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Scroll state, persisted across frames in `TuiState`.
#[derive(Default)]
pub struct StepViewState {
    pub scroll: ScrollViewState,
}

impl StepViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top — called whenever the step changes.
    pub fn reset(&mut self) {
        self.scroll = ScrollViewState::default();
    }
}

impl EventHandler for StepViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.scroll.scroll_up(),
            TuiEvent::CursorDown => self.scroll.scroll_down(),
            TuiEvent::PageUp => self.scroll.scroll_page_up(),
            TuiEvent::PageDown => self.scroll.scroll_page_down(),
            _ => return None,
        }
        None
    }
}

/// Transient render wrapper: markdown content + borrowed scroll state.
pub struct StepView<'a> {
    state: &'a mut StepViewState,
    content: &'a str,
}

impl<'a> StepView<'a> {
    pub fn new(state: &'a mut StepViewState, content: &'a str) -> Self {
        Self { state, content }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar gutter

        let text = markdown::render(self.content, Color::Gray);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height.max(1)));

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_markdown_content() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = StepViewState::new();

        terminal
            .draw(|f| {
                let mut view = StepView::new(&mut state, "Hello **learner**.");
                view.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Hello"));
        assert!(text.contains("learner"));
    }

    #[test]
    fn test_scroll_events_move_offset() {
        let mut state = StepViewState::new();

        // Give the scroll view something to scroll through first.
        let backend = TestBackend::new(20, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let long = "line\n\nline\n\nline\n\nline\n\nline\n\nline\n\nline";
        terminal
            .draw(|f| StepView::new(&mut state, long).render(f, f.area()))
            .unwrap();

        let before = state.scroll.offset().y;
        state.handle_event(&TuiEvent::CursorDown);
        terminal
            .draw(|f| StepView::new(&mut state, long).render(f, f.area()))
            .unwrap();
        assert!(state.scroll.offset().y > before);

        state.reset();
        assert_eq!(state.scroll.offset().y, 0);
    }
}
