use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and render into a
/// `Frame` within a given `Rect`. `render` takes `&mut self` so stateful
/// components can update scroll offsets or cached layout during the pass,
/// matching Ratatui's `StatefulWidget` pattern.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
///
/// Implemented on the *persistent state* type (which lives in `TuiState`),
/// not on the transient per-frame render wrapper — event handling needs state
/// that outlives a frame.
pub trait EventHandler {
    /// The high-level event this component emits, if any.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
