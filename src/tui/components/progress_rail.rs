//! # Progress Rail
//!
//! Left-hand column listing every step of the open course: number, title,
//! completion mark, and the cursor position. The numbers double as jump
//! targets (pressing `1`-`9` jumps to that step).

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding};

use crate::core::catalog::{Course, StepBody};
use crate::tui::component::Component;

pub struct ProgressRail<'a> {
    pub course: &'a Course,
    pub current: usize,
    pub completed: &'a BTreeSet<String>,
}

impl<'a> ProgressRail<'a> {
    pub fn new(course: &'a Course, current: usize, completed: &'a BTreeSet<String>) -> Self {
        Self {
            course,
            current,
            completed,
        }
    }
}

/// Short tag shown after the title for non-concept steps.
fn kind_tag(body: &StepBody) -> &'static str {
    match body {
        StepBody::Concept { .. } => "",
        StepBody::Experiment { .. } => " ⚘",
        StepBody::Quiz { .. } => " ?",
    }
}

impl Component for ProgressRail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .course
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let is_current = i == self.current;
                let is_done = self.completed.contains(&step.id);

                let cursor = if is_current { "▸" } else { " " };
                let mark = if is_done { "✓" } else { " " };

                let style = if is_current {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else if is_done {
                    Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let line = Line::from(vec![
                    Span::styled(format!("{cursor} "), style),
                    Span::styled(format!("{} ", i + 1), style.add_modifier(Modifier::DIM)),
                    Span::styled(step.title.clone(), style),
                    Span::styled(kind_tag(&step.body), style.add_modifier(Modifier::DIM)),
                    Span::styled(format!(" {mark}"), Style::default().fg(Color::Green)),
                ]);
                ListItem::new(line)
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
