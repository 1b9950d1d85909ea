//! Top-level draw: lays out the frame and dispatches to the right components
//! for the current screen (picker, course view, or error).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::catalog::{Layout as StepLayout, StepBody};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CoursePicker, PlaygroundPanel, ProgressRail, QuizView, StepView, TitleBar,
};
use crate::tui::markdown;

const RAIL_WIDTH: u16 = 30;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    // Title bar
    let (course_title, position) = match &app.session {
        Some(session) => (
            Some(session.navigator.course().title.clone()),
            Some((session.navigator.index() + 1, session.navigator.len())),
        ),
        None => (None, None),
    };
    TitleBar::new(course_title, position, app.status_message.clone())
        .render(frame, title_area);

    // Main area + help line
    let help = if let Some(error_msg) = &app.error {
        draw_error_view(frame, main_area, error_msg);
        " Esc Back "
    } else if app.session.is_some() {
        draw_course_view(frame, main_area, app, tui);
        " n Next  p Prev  1-9 Jump  Esc Courses  q Quit "
    } else {
        CoursePicker::new(&mut tui.picker).render(frame, main_area);
        ""
    };
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(error_paragraph, area);
}

fn draw_course_view(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(session) = &app.session else {
        return;
    };
    let step = session.navigator.current();

    // Fullscreen steps claim the whole width; everything else gets the rail.
    let content_area = if step.layout == StepLayout::Fullscreen {
        area
    } else {
        let [rail_area, content_area] =
            Layout::horizontal([Constraint::Length(RAIL_WIDTH), Constraint::Min(0)]).areas(area);
        ProgressRail::new(
            session.navigator.course(),
            session.navigator.index(),
            session.navigator.completed_step_ids(),
        )
        .render(frame, rail_area);
        content_area
    };

    match &step.body {
        StepBody::Concept { content } => {
            StepView::new(&mut tui.step_view, content).render(frame, content_area);
        }
        StepBody::Experiment {
            content,
            visualization,
            ..
        } => {
            let panel_area = split_off_intro(frame, content_area, content.as_deref());
            if let Some(playground) = &mut tui.playground {
                PlaygroundPanel::new(playground, visualization).render(frame, panel_area);
            }
        }
        StepBody::Quiz {
            content, questions, ..
        } => {
            let quiz_area = split_off_intro(frame, content_area, content.as_deref());
            QuizView::new(
                &mut tui.quiz,
                questions,
                &session.attempt,
                session.result.as_ref(),
            )
            .render(frame, quiz_area);
        }
    }
}

/// Render an optional markdown intro at the top of `area` and return what's
/// left for the step's main component.
fn split_off_intro(frame: &mut Frame, area: Rect, content: Option<&str>) -> Rect {
    let Some(content) = content else {
        return area;
    };
    let text = markdown::render(content, Color::Gray);
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    // +1 for a separating blank line; never more than half the pane.
    let height = (paragraph.line_count(area.width) as u16 + 1).min(area.height / 2);

    let [intro_area, rest] =
        Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area);
    frame.render_widget(paragraph, intro_area);
    rest
}
