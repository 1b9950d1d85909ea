//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`). The catalog is
//! an injected dependency everywhere, so tests fabricate small ones here
//! instead of dragging in the built-in content.

use std::sync::Arc;

use crate::core::catalog::{
    Catalog, Choice, Control, Course, ParamSpec, Question, Step, StepBody,
};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;

pub fn concept_step(id: &str) -> Step {
    Step {
        id: id.to_string(),
        title: format!("Step {id}"),
        layout: Default::default(),
        body: StepBody::Concept {
            content: format!("Content for {id}."),
        },
    }
}

pub fn experiment_step(id: &str) -> Step {
    Step {
        id: id.to_string(),
        title: format!("Step {id}"),
        layout: Default::default(),
        body: StepBody::Experiment {
            content: None,
            visualization: "test-playground".to_string(),
            params: vec![
                ParamSpec {
                    name: "slope".to_string(),
                    label: Some("Slope (m)".to_string()),
                    control: Control::Slider {
                        min: -3.0,
                        max: 3.0,
                        step: 0.5,
                        default: 1.0,
                    },
                },
                ParamSpec {
                    name: "noise".to_string(),
                    label: None,
                    control: Control::Toggle { default: false },
                },
            ],
        },
    }
}

pub fn quiz_step(id: &str, questions: Vec<Question>) -> Step {
    Step {
        id: id.to_string(),
        title: format!("Step {id}"),
        layout: Default::default(),
        body: StepBody::Quiz {
            content: None,
            questions,
        },
    }
}

/// Three single-answer questions with options a/b/c. The correct option
/// differs per question so tests catch positional mix-ups.
pub fn sample_bank() -> Vec<Question> {
    let make = |id: u32, correct_id: &str| Question {
        id,
        prompt: format!("Question {id}?"),
        options: ["a", "b", "c"]
            .iter()
            .map(|opt| Choice {
                id: opt.to_string(),
                text: format!("Option {opt}"),
                correct: *opt == correct_id,
            })
            .collect(),
        explanation: format!("Explanation {id}."),
    };
    vec![make(1, "b"), make(2, "a"), make(3, "c")]
}

/// The correct option id for a question (tests only; banks are well-formed).
pub fn correct_option(question: &Question) -> String {
    question
        .options
        .iter()
        .find(|o| o.correct)
        .map(|o| o.id.clone())
        .expect("sample questions have a correct option")
}

/// A course of `n` concept steps with ids `step-0..step-n`.
pub fn sample_course(id: &str, n: usize) -> Course {
    Course {
        id: id.to_string(),
        title: format!("Course {id}"),
        description: format!("A fabricated course called {id}."),
        steps: (0..n).map(|i| concept_step(&format!("step-{i}"))).collect(),
    }
}

/// concept → quiz → concept, so gating tests have a step on both sides.
pub fn quiz_course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        title: format!("Course {id}"),
        description: String::new(),
        steps: vec![
            concept_step("intro"),
            quiz_step("quiz", sample_bank()),
            concept_step("outro"),
        ],
    }
}

pub fn catalog_of(courses: Vec<Course>) -> Arc<Catalog> {
    Arc::new(Catalog::new(courses).expect("test catalog must validate"))
}

fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        default_course: None,
        require_quiz_pass: false,
        pass_threshold: 70,
        progress_enabled: false, // tests never touch the real home directory
        progress_dir: None,
    }
}

/// An App over a small fabricated catalog: "demo" (4 concept steps +
/// an experiment) and "quizzy" (concept, quiz, concept).
pub fn test_app() -> App {
    let mut demo = sample_course("demo", 4);
    demo.steps.push(experiment_step("play"));
    let catalog = catalog_of(vec![demo, quiz_course("quizzy")]);
    App::new(catalog, &test_config())
}
