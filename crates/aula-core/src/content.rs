//! Read-only lookups over the courses document.
//!
//! Every call re-reads the document, so edits to `courses.json` are picked up
//! without a restart. Slugs match exactly (case-sensitive) and the first entry
//! in document order wins.

use std::sync::Arc;

use crate::error::{ContentError, StoreError};
use crate::model::{Course, CoursesDocument, Question, Topic};
use crate::store::DocumentStore;

/// Default file name of the courses document.
pub const COURSES_DOCUMENT: &str = "courses.json";

/// A topic together with the course it belongs to.
#[derive(Debug, Clone)]
pub struct TopicPage {
    pub course: Course,
    pub topic: Topic,
}

/// A topic's quiz together with its course and topic.
#[derive(Debug, Clone)]
pub struct QuizPage {
    pub course: Course,
    pub topic: Topic,
    pub quiz: Vec<Question>,
}

/// Repository of curated course content.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    store: Arc<DocumentStore>,
    document: String,
}

impl ContentRepository {
    /// Repository over `courses.json` in the given store.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_document(store, COURSES_DOCUMENT)
    }

    /// Repository over a custom document name.
    pub fn with_document(store: Arc<DocumentStore>, document: impl Into<String>) -> Self {
        Self {
            store,
            document: document.into(),
        }
    }

    /// The whole courses document as persisted.
    pub fn document(&self) -> Result<CoursesDocument, StoreError> {
        self.store.load(&self.document)
    }

    /// The courses document as it is on disk, without healing it.
    /// `None` when the file does not exist.
    pub fn inspect(&self) -> Result<Option<CoursesDocument>, StoreError> {
        self.store.inspect(&self.document)
    }

    /// All courses in document order.
    pub fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.document()?.courses)
    }

    /// Topics of a course, or an empty list if no course has that slug.
    pub fn list_topics(&self, course_slug: &str) -> Result<Vec<Topic>, StoreError> {
        let document = self.document()?;
        Ok(document
            .courses
            .into_iter()
            .find(|c| c.slug == course_slug)
            .map(|c| c.topics)
            .unwrap_or_default())
    }

    /// Look up a single topic page.
    pub fn get_topic(&self, course_slug: &str, topic_slug: &str) -> Result<TopicPage, ContentError> {
        let document = self.document()?;
        let course = document
            .courses
            .into_iter()
            .find(|c| c.slug == course_slug)
            .ok_or_else(|| ContentError::CourseNotFound(course_slug.to_string()))?;
        let topic = course
            .topic(topic_slug)
            .cloned()
            .ok_or_else(|| ContentError::TopicNotFound {
                course: course_slug.to_string(),
                topic: topic_slug.to_string(),
            })?;
        Ok(TopicPage { course, topic })
    }

    /// Look up a topic's quiz. A topic without questions yields an empty quiz.
    pub fn get_quiz(&self, course_slug: &str, topic_slug: &str) -> Result<QuizPage, ContentError> {
        let TopicPage { course, topic } = self.get_topic(course_slug, topic_slug)?;
        let quiz = topic.quiz.clone();
        Ok(QuizPage {
            course,
            topic,
            quiz,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COURSES: &str = r#"{
  "courses": [
    {
      "slug": "python",
      "title": "Python básico",
      "topics": [
        {
          "slug": "variables",
          "title": "Variables",
          "contenido": "Una variable guarda un valor.",
          "quiz": [
            {"pregunta": "¿Qué guarda una variable?", "opciones": ["Un valor", "Nada"], "respuesta": 0}
          ]
        },
        {"slug": "bucles", "title": "Bucles", "contenido": "bucles.html"}
      ]
    },
    {"slug": "web", "title": "Web", "topics": []}
  ]
}"#;

    fn repo_with(content: &str) -> (tempfile::TempDir, ContentRepository) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(COURSES_DOCUMENT), content).unwrap();
        let store = Arc::new(DocumentStore::new(dir.path()));
        (dir, ContentRepository::new(store))
    }

    #[test]
    fn list_courses_in_document_order() {
        let (_dir, repo) = repo_with(COURSES);
        let slugs: Vec<String> = repo
            .list_courses()
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, vec!["python", "web"]);
    }

    #[test]
    fn list_topics_of_known_course() {
        let (_dir, repo) = repo_with(COURSES);
        let topics = repo.list_topics("python").unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].slug, "variables");
        assert_eq!(topics[1].slug, "bucles");
    }

    #[test]
    fn list_topics_of_unknown_course_is_empty() {
        let (_dir, repo) = repo_with(COURSES);
        assert!(repo.list_topics("nonexistent-course").unwrap().is_empty());
        assert!(repo.list_topics("Python").unwrap().is_empty());
    }

    #[test]
    fn get_topic_found() {
        let (_dir, repo) = repo_with(COURSES);
        let page = repo.get_topic("python", "variables").unwrap();
        assert_eq!(page.course.title(), Some("Python básico"));
        assert_eq!(page.topic.contenido, "Una variable guarda un valor.");
    }

    #[test]
    fn get_topic_distinguishes_missing_course_and_topic() {
        let (_dir, repo) = repo_with(COURSES);

        let err = repo.get_topic("python", "nonexistent-topic").unwrap_err();
        assert!(matches!(err, ContentError::TopicNotFound { .. }));

        let err = repo.get_topic("course-x", "variables").unwrap_err();
        assert!(matches!(err, ContentError::CourseNotFound(ref slug) if slug == "course-x"));
    }

    #[test]
    fn get_quiz_passes_questions_through() {
        let (_dir, repo) = repo_with(COURSES);
        let page = repo.get_quiz("python", "variables").unwrap();
        assert_eq!(page.quiz.len(), 1);
        assert_eq!(page.quiz[0]["respuesta"], json!(0));
        assert_eq!(page.topic.slug, "variables");
    }

    #[test]
    fn get_quiz_without_questions_is_empty() {
        let (_dir, repo) = repo_with(COURSES);
        let page = repo.get_quiz("python", "bucles").unwrap();
        assert!(page.quiz.is_empty());

        let err = repo.get_quiz("web", "anything").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn lookups_do_not_rewrite_valid_content() {
        let (dir, repo) = repo_with(COURSES);
        repo.list_courses().unwrap();
        repo.list_topics("python").unwrap();
        let _ = repo.get_topic("python", "variables");
        let _ = repo.get_quiz("nope", "nope");

        let raw = std::fs::read_to_string(dir.path().join(COURSES_DOCUMENT)).unwrap();
        assert_eq!(raw, COURSES);
    }

    #[test]
    fn corrupt_content_reads_as_no_courses() {
        let (dir, repo) = repo_with("{ broken");
        assert!(repo.list_courses().unwrap().is_empty());
        assert!(matches!(
            repo.get_topic("python", "variables"),
            Err(ContentError::CourseNotFound(_))
        ));

        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(COURSES_DOCUMENT)).unwrap(),
        )
        .unwrap();
        assert_eq!(raw, json!({"courses": []}));
    }

    #[test]
    fn null_content_keeps_the_rest_of_the_course() {
        let raw = r#"{"courses": [{"slug": "py", "topics": [
            {"slug": "a", "contenido": "texto"},
            {"slug": "b", "contenido": null}
        ]}]}"#;
        let (dir, repo) = repo_with(raw);

        assert_eq!(repo.list_courses().unwrap().len(), 1);
        assert_eq!(repo.list_topics("py").unwrap().len(), 2);
        assert_eq!(repo.get_topic("py", "a").unwrap().topic.contenido, "texto");
        assert_eq!(repo.get_topic("py", "b").unwrap().topic.contenido, "");

        let on_disk = std::fs::read_to_string(dir.path().join(COURSES_DOCUMENT)).unwrap();
        assert_eq!(on_disk, raw);
    }

    #[test]
    fn inspect_reports_broken_content() {
        let (_dir, repo) = repo_with("{ broken");
        assert!(matches!(repo.inspect(), Err(StoreError::Malformed { .. })));
    }
}
