//! Validation of create payloads.

use crate::error::ValidationError;
use crate::types::{CreateTodo, NewTodo};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 40;

/// Check a create payload and turn it into the fields of a new todo.
///
/// Checks run in order and stop at the first failure: `title` and `author`
/// must be present and non-empty, then the title must be between
/// `TITLE_MIN_CHARS` and `TITLE_MAX_CHARS` characters inclusive.
pub fn validate_create(payload: CreateTodo) -> Result<NewTodo, ValidationError> {
    let (title, author) = match (payload.title, payload.author) {
        (Some(title), Some(author)) if !title.is_empty() && !author.is_empty() => (title, author),
        _ => return Err(ValidationError::MissingRequiredField),
    };

    let len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return Err(ValidationError::TitleLengthOutOfRange);
    }

    Ok(NewTodo {
        title,
        content: payload.content.unwrap_or_default(),
        tags: payload.tags.unwrap_or_default(),
        author,
    })
}
