//! Persisted document types.
//!
//! Field names follow the on-disk JSON exactly, since course content is
//! curated by hand outside this program. Display fields the core does not
//! interpret (`title`, `description`, ...) are kept in `extra` so a re-save
//! never drops them.
//!
//! Content is hand-edited, so field decoding is forgiving: a `null` or
//! wrongly typed field reads as its empty value, and a record list entry
//! that is not an object is skipped. One bad record never makes the rest of
//! the document unreadable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A named JSON aggregate persisted as one file.
///
/// `Default` is the empty document the store falls back to when the backing
/// file is missing or unreadable.
pub trait Document: Serialize + DeserializeOwned + Default {
    /// Short name used in log lines.
    const KIND: &'static str;
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient")]
    pub username: String,
    /// Argon2 PHC string. Stored under `password` for compatibility.
    #[serde(rename = "password", default, deserialize_with = "lenient")]
    pub password_hash: String,
}

/// Root of `users.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersDocument {
    #[serde(default, deserialize_with = "records")]
    pub users: Vec<User>,
}

impl Document for UsersDocument {
    const KIND: &'static str = "users";
}

impl UsersDocument {
    /// First user whose name matches ignoring case.
    pub fn find(&self, username: &str) -> Option<&User> {
        let wanted = username.to_lowercase();
        self.users
            .iter()
            .find(|u| u.username.to_lowercase() == wanted)
    }
}

/// A quiz question. Opaque to the core; rendered by the caller.
pub type Question = Value;

/// A topic inside a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    /// Inline text, or the name of a template ending in `.html`.
    #[serde(default, deserialize_with = "lenient")]
    pub contenido: String,
    #[serde(default, deserialize_with = "lenient")]
    pub quiz: Vec<Question>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a topic's `contenido` should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicBody<'a> {
    /// A template file to render instead of the generic topic page.
    Template(&'a str),
    /// Raw content for the generic topic page.
    Inline(&'a str),
}

impl Topic {
    /// Optional display title.
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }

    /// Classify `contenido` after trimming surrounding whitespace.
    pub fn body(&self) -> TopicBody<'_> {
        let content = self.contenido.trim();
        if content.to_lowercase().ends_with(".html") {
            TopicBody::Template(content)
        } else {
            TopicBody::Inline(content)
        }
    }
}

/// A course and its topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "records")]
    pub topics: Vec<Topic>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Optional display title.
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }

    /// First topic with exactly this slug.
    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.slug == slug)
    }
}

/// Root of `courses.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoursesDocument {
    #[serde(default, deserialize_with = "records")]
    pub courses: Vec<Course>,
}

impl Document for CoursesDocument {
    const KIND: &'static str = "courses";
}

impl CoursesDocument {
    /// First course with exactly this slug.
    pub fn course(&self, slug: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.slug == slug)
    }
}

/// Root of `session.json`: the signed-in principal, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<String>,
}

impl Document for SessionDocument {
    const KIND: &'static str = "session";
}

/// Decode a field, reading `null` or a value of the wrong type as `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode a list of records, skipping entries that are not records.
fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable record");
                None
            }
        })
        .collect())
}
