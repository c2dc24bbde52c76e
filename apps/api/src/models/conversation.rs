use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::render::text_to_html;
use crate::conversation::session::Reply;

/// One recorded answer, tagged with where in the questionnaire it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub phase: u8,
    pub question_index: usize,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    Coach,
    User,
}

/// A transcript entry. `html` is what the front end inserts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub author: Author,
    pub content: String,
    pub html: String,
    /// Pre-rendered structured content, passed through untouched.
    pub special: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Self::new(Author::User, text.to_string(), text_to_html(text), false)
    }

    pub fn coach(reply: Reply) -> Self {
        match reply {
            Reply::Text(text) => {
                let html = text_to_html(&text);
                Self::new(Author::Coach, text, html, false)
            }
            Reply::Special(markup) => Self::new(Author::Coach, markup.clone(), markup, true),
        }
    }

    fn new(author: Author, content: String, html: String, special: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            content,
            html,
            special,
            created_at: Utc::now(),
        }
    }
}
