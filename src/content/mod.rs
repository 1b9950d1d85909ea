//! # Built-in Course Content
//!
//! The course catalog ships inside the binary as TOML, one file per course.
//! Authoring lives in the `.toml` files next to this module; this code only
//! parses and validates them. Loading happens once at startup and any
//! authoring error is fatal — there is no partial catalog.

use crate::core::catalog::{Catalog, CatalogError, Course};

const COURSE_FILES: &[(&str, &str)] = &[
    (
        "linear_regression.toml",
        include_str!("linear_regression.toml"),
    ),
    ("knn_lvq.toml", include_str!("knn_lvq.toml")),
];

/// Parse and validate the embedded catalog.
pub fn builtin() -> Result<Catalog, CatalogError> {
    let mut courses = Vec::with_capacity(COURSE_FILES.len());
    for &(file, raw) in COURSE_FILES {
        let course: Course =
            toml::from_str(raw).map_err(|source| CatalogError::Parse { file, source })?;
        courses.push(course);
    }
    Catalog::new(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::StepBody;

    #[test]
    fn test_builtin_catalog_loads_and_validates() {
        let catalog = builtin().expect("embedded content must be well-formed");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_linear_regression_course_shape() {
        let catalog = builtin().unwrap();
        let course = catalog.course("linear-regression").unwrap();
        assert_eq!(course.steps.len(), 8);

        // intro → goal → playground → mse → gradient-descent → overfitting
        // → correlation → quiz, matching the published course.
        assert_eq!(course.steps[0].id, "intro");
        assert!(matches!(
            course.steps[2].body,
            StepBody::Experiment { .. }
        ));
        assert!(course.steps[7].is_quiz());
        assert_eq!(course.steps[7].questions().unwrap().len(), 3);
    }

    #[test]
    fn test_knn_course_has_fullscreen_playground() {
        use crate::core::catalog::Layout;

        let catalog = builtin().unwrap();
        let course = catalog.course("knn-lvq").unwrap();
        let playground = course
            .steps
            .iter()
            .find(|s| s.id == "playground")
            .unwrap();
        assert_eq!(playground.layout, Layout::Fullscreen);
        match &playground.body {
            StepBody::Experiment {
                visualization,
                params,
                ..
            } => {
                assert_eq!(visualization, "knn-decision");
                assert_eq!(params.len(), 2);
            }
            other => panic!("expected experiment, got {other:?}"),
        }
    }

    #[test]
    fn test_every_quiz_question_has_exactly_one_correct_option() {
        // Catalog::new already enforces this; assert it directly so a
        // validation regression can't slip through unnoticed.
        let catalog = builtin().unwrap();
        for summary in catalog.summaries() {
            let course = catalog.course(&summary.id).unwrap();
            for step in &course.steps {
                if let Some(bank) = step.questions() {
                    for question in bank {
                        let correct =
                            question.options.iter().filter(|o| o.correct).count();
                        assert_eq!(
                            correct, 1,
                            "question {} in {}/{}",
                            question.id, course.id, step.id
                        );
                    }
                }
            }
        }
    }
}
