//! # Playground Panel
//!
//! The embedded-playground stand-in for experiment steps. The actual
//! visualizations are external renderables the terminal can't host; what the
//! core cares about is the contract around them: typed parameters the learner
//! manipulates, reported one-way to the hosting step over the
//! [`PlaygroundBridge`]. This panel owns the parameter values, renders them
//! as sliders/toggles, and reports every change through the bridge — it never
//! touches navigation or quiz state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::bridge::{ParamValue, PlaygroundBridge};
use crate::core::catalog::{Control, ParamSpec};
use crate::tui::event::TuiEvent;

const SLIDER_WIDTH: usize = 16;

/// Parameter values plus cursor, persisted while an experiment step is open.
pub struct PlaygroundState {
    specs: Vec<ParamSpec>,
    values: Vec<ParamValue>,
    pub selected: usize,
    bridge: PlaygroundBridge,
}

impl PlaygroundState {
    /// Seed values from the spec defaults. Nothing is reported until the
    /// learner actually changes something.
    pub fn new(specs: &[ParamSpec], bridge: PlaygroundBridge) -> Self {
        let values = specs
            .iter()
            .map(|spec| match spec.control {
                Control::Slider { default, .. } => ParamValue::Number(default),
                Control::Toggle { default } => ParamValue::Flag(default),
            })
            .collect();
        Self {
            specs: specs.to_vec(),
            values,
            selected: 0,
            bridge,
        }
    }

    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.specs
            .iter()
            .position(|s| s.name == name)
            .map(|i| &self.values[i])
    }

    /// Handle a key event. Returns true when a parameter changed (and was
    /// therefore reported over the bridge).
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        if self.specs.is_empty() {
            return false;
        }
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                false
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.specs.len() - 1);
                false
            }
            TuiEvent::CursorLeft => self.nudge(-1.0),
            TuiEvent::CursorRight => self.nudge(1.0),
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.flip(),
            _ => false,
        }
    }

    /// Move a slider one increment in `direction`, clamped to its range.
    fn nudge(&mut self, direction: f64) -> bool {
        let spec = &self.specs[self.selected];
        let Control::Slider { min, max, step, .. } = spec.control else {
            // Left/Right on a toggle flips it, same as Enter.
            return self.flip();
        };
        let ParamValue::Number(current) = self.values[self.selected] else {
            return false;
        };
        let next = (current + direction * step).clamp(min, max);
        if next == current {
            return false;
        }
        self.values[self.selected] = ParamValue::Number(next);
        self.bridge
            .on_parameter_change(&spec.name, ParamValue::Number(next));
        true
    }

    fn flip(&mut self) -> bool {
        let spec = &self.specs[self.selected];
        let ParamValue::Flag(current) = self.values[self.selected] else {
            return false;
        };
        self.values[self.selected] = ParamValue::Flag(!current);
        self.bridge
            .on_parameter_change(&spec.name, ParamValue::Flag(!current));
        true
    }
}

/// Transient render wrapper for an experiment step's playground.
pub struct PlaygroundPanel<'a> {
    state: &'a mut PlaygroundState,
    visualization: &'a str,
}

impl<'a> PlaygroundPanel<'a> {
    pub fn new(state: &'a mut PlaygroundState, visualization: &'a str) -> Self {
        Self {
            state,
            visualization,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Playground — {} ", self.visualization))
            .title_bottom(
                Line::from(" ↑↓ Parameter  ←→ Adjust  Enter Toggle ").centered(),
            )
            .padding(Padding::horizontal(1));

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("⟨{}⟩ renders in the host environment; parameters stream live.", self.visualization),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());

        for (i, spec) in self.state.specs.iter().enumerate() {
            let style = if i == self.state.selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if i == self.state.selected { "▸ " } else { "  " };

            let control = match (&spec.control, &self.state.values[i]) {
                (Control::Slider { min, max, .. }, ParamValue::Number(v)) => {
                    format!("{} {:>7.2}", slider_bar(*v, *min, *max), v)
                }
                (Control::Toggle { .. }, ParamValue::Flag(on)) => {
                    if *on { "[ on]".to_string() } else { "[off]".to_string() }
                }
                _ => String::new(),
            };

            lines.push(Line::from(vec![
                Span::styled(cursor.to_string(), style),
                Span::styled(format!("{:<18}", spec.label()), style),
                Span::styled(control, style),
            ]));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
        frame.render_widget(paragraph, area);
    }
}

/// Fixed-width bar showing where `value` sits in `[min, max]`.
fn slider_bar(value: f64, min: f64, max: f64) -> String {
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let knob = (ratio * (SLIDER_WIDTH - 1) as f64).round() as usize;
    let mut bar = String::with_capacity(SLIDER_WIDTH);
    for i in 0..SLIDER_WIDTH {
        bar.push(if i == knob { '█' } else { '─' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::experiment_step;

    fn playground() -> (PlaygroundState, std::sync::mpsc::Receiver<crate::core::bridge::ParameterChange>) {
        let step = experiment_step("play");
        let specs = match &step.body {
            crate::core::catalog::StepBody::Experiment { params, .. } => params.clone(),
            _ => unreachable!(),
        };
        let (bridge, rx) = PlaygroundBridge::channel();
        (PlaygroundState::new(&specs, bridge), rx)
    }

    #[test]
    fn test_defaults_seeded_without_reporting() {
        let (state, rx) = playground();
        assert_eq!(state.value("slope"), Some(&ParamValue::Number(1.0)));
        assert_eq!(state.value("noise"), Some(&ParamValue::Flag(false)));
        assert!(rx.try_recv().is_err(), "no change should be reported yet");
    }

    #[test]
    fn test_slider_nudge_reports_over_bridge() {
        let (mut state, rx) = playground();
        assert!(state.handle_event(&TuiEvent::CursorRight));

        let change = rx.try_recv().unwrap();
        assert_eq!(change.name, "slope");
        assert_eq!(change.value, ParamValue::Number(1.5));
        assert_eq!(state.value("slope"), Some(&ParamValue::Number(1.5)));
    }

    #[test]
    fn test_slider_clamps_at_range_edge() {
        let (mut state, rx) = playground();
        // slope: min -3, max 3, step 0.5, default 1 → four nudges to the cap
        for _ in 0..4 {
            state.handle_event(&TuiEvent::CursorRight);
        }
        assert_eq!(state.value("slope"), Some(&ParamValue::Number(3.0)));

        // At the cap, further nudges change (and report) nothing.
        assert!(!state.handle_event(&TuiEvent::CursorRight));
        assert_eq!(rx.try_iter().count(), 4);
    }

    #[test]
    fn test_toggle_flips_and_reports() {
        let (mut state, rx) = playground();
        state.handle_event(&TuiEvent::CursorDown); // onto the toggle
        assert!(state.handle_event(&TuiEvent::Submit));
        assert_eq!(state.value("noise"), Some(&ParamValue::Flag(true)));

        let change = rx.try_recv().unwrap();
        assert_eq!(change.name, "noise");
        assert_eq!(change.value, ParamValue::Flag(true));
    }

    #[test]
    fn test_cursor_clamps_to_param_count() {
        let (mut state, _rx) = playground();
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_slider_bar_positions() {
        assert!(slider_bar(0.0, 0.0, 10.0).starts_with('█'));
        assert!(slider_bar(10.0, 0.0, 10.0).ends_with('█'));
        assert_eq!(slider_bar(5.0, 0.0, 10.0).chars().filter(|&c| c == '█').count(), 1);
    }
}
