use serde_json::Value;

use crate::error::ZoomError;

/// Position of a walk over a cursor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePosition {
    /// the original request has not been consumed yet
    First,
    /// the next request carries this cursor
    Next(String),
    Exhausted,
}

impl PagePosition {
    /// Position following a page: a non-empty string cursor continues the chain,
    /// anything else (absent, null, empty, non-string) ends it.
    pub fn after(body: &Value, cursor_field: &str) -> Self {
        next_cursor(body, cursor_field)
            .map(PagePosition::Next)
            .unwrap_or(PagePosition::Exhausted)
    }
}

pub fn next_cursor(body: &Value, cursor_field: &str) -> Option<String> {
    body.get(cursor_field)
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_owned)
}

/// Items of one page. A missing or null items field is an empty page.
pub fn take_items(body: Value, items_field: &str) -> Result<Vec<Value>, ZoomError> {
    let items = match body {
        Value::Object(mut map) => map.remove(items_field),
        _ => None,
    };

    match items {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ZoomError::UnexpectedPayload {
            field: items_field.to_owned(),
            reason: format!("expected an array, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
