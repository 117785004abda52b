//! Sanity checks for hand-curated course content.
//!
//! Lookups resolve duplicated slugs to the first entry, so a duplicate is
//! never an error at read time; it just hides the later entry. These checks
//! surface such problems before learners run into them.

use std::collections::HashSet;

use crate::model::{CoursesDocument, TopicBody};

/// A warning from course content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Course slug (if applicable).
    pub course: Option<String>,
    /// Topic slug (if applicable).
    pub topic: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn course(course: &str, message: impl Into<String>) -> Self {
        Self {
            course: Some(course.to_string()),
            topic: None,
            message: message.into(),
        }
    }

    fn topic(course: &str, topic: &str, message: impl Into<String>) -> Self {
        Self {
            course: Some(course.to_string()),
            topic: Some(topic.to_string()),
            message: message.into(),
        }
    }

    /// `course/topic` location prefix for display.
    pub fn location(&self) -> String {
        match (&self.course, &self.topic) {
            (Some(c), Some(t)) => format!("{c}/{t}"),
            (Some(c), None) => c.clone(),
            _ => String::new(),
        }
    }
}

/// Validate a courses document for common issues.
pub fn validate_courses(document: &CoursesDocument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_courses = HashSet::new();

    for course in &document.courses {
        if course.slug.trim().is_empty() {
            warnings.push(ValidationWarning::course(
                &course.slug,
                "course slug is empty",
            ));
        } else if !seen_courses.insert(course.slug.as_str()) {
            warnings.push(ValidationWarning::course(
                &course.slug,
                format!("duplicate course slug: {} (only the first is reachable)", course.slug),
            ));
        }

        if course.topics.is_empty() {
            warnings.push(ValidationWarning::course(&course.slug, "course has no topics"));
        }

        let mut seen_topics = HashSet::new();
        for topic in &course.topics {
            if topic.slug.trim().is_empty() {
                warnings.push(ValidationWarning::topic(
                    &course.slug,
                    &topic.slug,
                    "topic slug is empty",
                ));
            } else if !seen_topics.insert(topic.slug.as_str()) {
                warnings.push(ValidationWarning::topic(
                    &course.slug,
                    &topic.slug,
                    format!("duplicate topic slug: {} (only the first is reachable)", topic.slug),
                ));
            }

            match topic.body() {
                TopicBody::Inline("") => warnings.push(ValidationWarning::topic(
                    &course.slug,
                    &topic.slug,
                    "topic has no content",
                )),
                TopicBody::Template(name) if name.len() == ".html".len() => {
                    warnings.push(ValidationWarning::topic(
                        &course.slug,
                        &topic.slug,
                        "template reference has no file name",
                    ))
                }
                _ => {}
            }
        }
    }

    warnings
}
