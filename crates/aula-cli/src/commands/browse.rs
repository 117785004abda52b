//! The `aula courses`, `topics` and `topic` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use aula_core::model::TopicBody;
use aula_core::PortalConfig;

use super::{open_portal, signed_in};

pub fn courses(config: &PortalConfig) -> Result<()> {
    let portal = open_portal(config);
    let courses = signed_in(portal.courses())?;

    if courses.is_empty() {
        println!("No courses yet. Run `aula init` to add sample content.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Course", "Title", "Topics"]);
    for course in &courses {
        table.add_row(vec![
            Cell::new(&course.slug),
            Cell::new(course.title().unwrap_or("")),
            Cell::new(course.topics.len()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn topics(config: &PortalConfig, course_slug: &str) -> Result<()> {
    let portal = open_portal(config);
    let topics = signed_in(portal.topics(course_slug))?;

    if topics.is_empty() {
        println!("No topics for {course_slug}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Title", "Questions"]);
    for topic in &topics {
        table.add_row(vec![
            Cell::new(&topic.slug),
            Cell::new(topic.title().unwrap_or("")),
            Cell::new(topic.quiz.len()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn topic(config: &PortalConfig, course_slug: &str, topic_slug: &str) -> Result<()> {
    let portal = open_portal(config);
    let page = signed_in(portal.topic(course_slug, topic_slug))?;

    let course_title = page.course.title().unwrap_or(page.course.slug.as_str());
    let topic_title = page.topic.title().unwrap_or(page.topic.slug.as_str());
    println!("{course_title} / {topic_title}\n");

    match page.topic.body() {
        TopicBody::Template(name) => println!("(rendered from template {name})"),
        TopicBody::Inline(text) => println!("{text}"),
    }

    if !page.topic.quiz.is_empty() {
        println!(
            "\nQuiz: {} question(s). Run `aula quiz {course_slug} {topic_slug}`.",
            page.topic.quiz.len()
        );
    }
    Ok(())
}
