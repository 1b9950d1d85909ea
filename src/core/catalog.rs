//! # Course Catalog
//!
//! The data model for courses, steps, and quiz question banks, plus the
//! validation that runs once when the catalog is loaded.
//!
//! The catalog is authoring data, not runtime input: a malformed course is a
//! bug in the content files, so loading fails fast instead of absorbing the
//! error. After load the catalog is immutable and shared behind an `Arc`, and
//! everything else (navigator, reducer, UI) borrows from it.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// An ordered bank of quiz questions attached to a quiz step.
pub type QuestionBank = Vec<Question>;

/// The whole course collection, validated and read-only after load.
#[derive(Debug)]
pub struct Catalog {
    courses: Vec<Course>,
}

/// One course: an ordered sequence of steps under a single topic.
#[derive(Debug, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<Step>,
}

/// Lightweight course listing entry (id, title, description).
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// One unit of course content. The step-type-specific fields live in
/// [`StepBody`], a tagged union keyed by `type`, so a quiz step statically
/// carries its question bank and an experiment step its visualization
/// reference — there is no open-ended props bag.
#[derive(Debug, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub layout: Layout,
    #[serde(flatten)]
    pub body: StepBody,
}

/// How the rendering layer should place the step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Inline,
    Fullscreen,
}

/// Step payload, keyed by the `type` field in course files.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepBody {
    /// Narrated content, rendered as markdown.
    Concept { content: String },
    /// An embedded playground. `visualization` names the external renderable;
    /// `params` is its typed parameter contract.
    Experiment {
        #[serde(default)]
        content: Option<String>,
        visualization: String,
        #[serde(default)]
        params: Vec<ParamSpec>,
    },
    /// An auto-graded knowledge check.
    Quiz {
        #[serde(default)]
        content: Option<String>,
        questions: QuestionBank,
    },
}

/// One adjustable playground parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub control: Control,
}

impl ParamSpec {
    /// Display label, falling back to the parameter name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// The control surface a parameter exposes to the learner.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum Control {
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    Toggle {
        default: bool,
    },
}

/// A single-answer multiple-choice question.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<Choice>,
    pub explanation: String,
}

/// One selectable answer. Exactly one choice per question carries
/// `correct = true`; the catalog load and the grader both enforce this.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl Step {
    pub fn is_quiz(&self) -> bool {
        matches!(self.body, StepBody::Quiz { .. })
    }

    /// The step's question bank, if it is a quiz step.
    pub fn questions(&self) -> Option<&QuestionBank> {
        match &self.body {
            StepBody::Quiz { questions, .. } => Some(questions),
            _ => None,
        }
    }

    /// The markdown content for this step, if any.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            StepBody::Concept { content } => Some(content),
            StepBody::Experiment { content, .. } | StepBody::Quiz { content, .. } => {
                content.as_deref()
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum CatalogError {
    /// A course file failed to parse.
    Parse {
        file: &'static str,
        source: toml::de::Error,
    },
    /// Lookup of an unknown course id.
    NotFound(String),
    /// An authoring invariant does not hold. The message names the course,
    /// step, and question involved.
    Invalid(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse { file, source } => {
                write!(f, "course file {file} failed to parse: {source}")
            }
            CatalogError::NotFound(id) => write!(f, "unknown course: {id}"),
            CatalogError::Invalid(msg) => write!(f, "invalid course data: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ============================================================================
// Catalog
// ============================================================================

impl Catalog {
    /// Build a catalog, validating every authoring invariant up front.
    /// Any violation rejects the whole catalog — no partial load.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen_ids = HashSet::new();
        for course in &courses {
            if !seen_ids.insert(course.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate course id '{}'",
                    course.id
                )));
            }
            validate_course(course)?;
        }
        Ok(Self { courses })
    }

    /// Look up a course by id.
    pub fn course(&self, id: &str) -> Result<&Course, CatalogError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Course listing in catalog order.
    pub fn summaries(&self) -> Vec<CourseSummary> {
        self.courses
            .iter()
            .map(|c| CourseSummary {
                id: c.id.clone(),
                title: c.title.clone(),
                description: c.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Per-course invariants. Step ids are unique within one course only — the
/// same id (e.g. `quiz`) may recur across courses.
fn validate_course(course: &Course) -> Result<(), CatalogError> {
    if course.steps.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "course '{}' has no steps",
            course.id
        )));
    }

    let mut step_ids = HashSet::new();
    for step in &course.steps {
        if !step_ids.insert(step.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "course '{}' reuses step id '{}'",
                course.id, step.id
            )));
        }
        match &step.body {
            StepBody::Concept { .. } => {}
            StepBody::Experiment {
                visualization,
                params,
                ..
            } => {
                if visualization.is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "experiment step '{}/{}' has an empty visualization reference",
                        course.id, step.id
                    )));
                }
                for spec in params {
                    validate_param(course, step, spec)?;
                }
            }
            StepBody::Quiz { questions, .. } => {
                validate_bank(course, step, questions)?;
            }
        }
    }
    Ok(())
}

fn validate_param(course: &Course, step: &Step, spec: &ParamSpec) -> Result<(), CatalogError> {
    if let Control::Slider {
        min, max, step: by, ..
    } = spec.control
        && (min >= max || by <= 0.0)
    {
        return Err(CatalogError::Invalid(format!(
            "slider '{}' in step '{}/{}' has a degenerate range",
            spec.name, course.id, step.id
        )));
    }
    Ok(())
}

fn validate_bank(course: &Course, step: &Step, bank: &QuestionBank) -> Result<(), CatalogError> {
    if bank.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "quiz step '{}/{}' has no questions",
            course.id, step.id
        )));
    }

    let mut question_ids = HashSet::new();
    for question in bank {
        if !question_ids.insert(question.id) {
            return Err(CatalogError::Invalid(format!(
                "quiz step '{}/{}' reuses question id {}",
                course.id, step.id, question.id
            )));
        }

        let mut option_ids = HashSet::new();
        for option in &question.options {
            if !option_ids.insert(option.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "question {} in '{}/{}' reuses option id '{}'",
                    question.id, course.id, step.id, option.id
                )));
            }
        }

        let correct = question.options.iter().filter(|o| o.correct).count();
        if correct != 1 {
            return Err(CatalogError::Invalid(format!(
                "question {} in '{}/{}' has {} correct options (want exactly 1)",
                question.id, course.id, step.id, correct
            )));
        }
    }
    Ok(())
}
