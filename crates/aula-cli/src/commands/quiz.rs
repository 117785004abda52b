//! The `aula quiz` and `aula score` commands.

use anyhow::Result;
use serde_json::Value;

use aula_core::PortalConfig;

use super::{open_portal, signed_in};
use crate::QuizFormat;

pub fn show(
    config: &PortalConfig,
    course_slug: &str,
    topic_slug: &str,
    format: QuizFormat,
) -> Result<()> {
    let portal = open_portal(config);
    let page = signed_in(portal.quiz(course_slug, topic_slug))?;

    match format {
        QuizFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.quiz)?);
        }
        QuizFormat::Text => {
            let title = page.topic.title().unwrap_or(page.topic.slug.as_str());
            println!("Quiz: {title} ({} question(s))", page.quiz.len());
            for (i, question) in page.quiz.iter().enumerate() {
                println!("\n{}. {}", i + 1, prompt_of(question));
            }
        }
    }
    Ok(())
}

/// Best-effort one-line prompt for a question of unknown shape.
fn prompt_of(question: &Value) -> String {
    ["pregunta", "question", "q"]
        .iter()
        .find_map(|key| question.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| question.to_string())
}

pub fn score(config: &PortalConfig, correct: &str, total: &str) -> Result<()> {
    let portal = open_portal(config);
    let outcome = portal.submit_quiz(correct, total);
    println!("{}/{} correct ({})", outcome.correct, outcome.total, outcome.tier);
    println!("{}", outcome.message());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_prefers_known_keys() {
        assert_eq!(prompt_of(&json!({"pregunta": "¿Qué es?"})), "¿Qué es?");
        assert_eq!(prompt_of(&json!({"question": "What?"})), "What?");
        assert_eq!(prompt_of(&json!([1, 2])), "[1,2]");
    }
}
