//! Loosely typed board payloads to domain values.
//!
//! Remote sources hand back whatever JSON the endpoint produced. Every field
//! that is missing or has the wrong type is replaced with a default instead
//! of failing the whole payload; only a payload without any boards is an
//! error.

use kanban_core::{KanbanError, KanbanResult};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Board, Column, Subtask, Task};

pub const UNTITLED_BOARD: &str = "Untitled board";
pub const UNTITLED_TASK: &str = "Untitled task";
pub const DEFAULT_COLUMN_NAME: &str = "Todo";

const NO_BOARDS_MESSAGE: &str = "API response did not include any boards. \
     Expected an array of boards or an object like { boards: [...] }.";

fn field<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    obj.and_then(|o| o.get(key))
}

fn as_string(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn as_array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn as_id(value: Option<&Value>) -> Uuid {
    value
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub fn normalize_subtask(input: &Value) -> Subtask {
    let obj = input.as_object();
    Subtask {
        title: as_string(field(obj, "title"), ""),
        is_completed: is_truthy(field(obj, "isCompleted")),
    }
}

pub fn normalize_task(input: &Value, column_name: &str) -> Task {
    let obj = input.as_object();
    Task {
        id: as_id(field(obj, "id")),
        title: as_string(field(obj, "title"), UNTITLED_TASK),
        description: as_string(field(obj, "description"), ""),
        status: as_string(field(obj, "status"), column_name),
        subtasks: as_array(field(obj, "subtasks"))
            .iter()
            .map(normalize_subtask)
            .collect(),
    }
}

pub fn normalize_column(input: &Value) -> Column {
    let obj = input.as_object();
    let name = as_string(field(obj, "name"), DEFAULT_COLUMN_NAME);
    let tasks = as_array(field(obj, "tasks"))
        .iter()
        .map(|t| normalize_task(t, &name))
        .collect();
    Column {
        id: as_id(field(obj, "id")),
        name,
        tasks,
    }
}

pub fn normalize_board(input: &Value) -> Board {
    let obj = input.as_object();
    Board {
        id: as_id(field(obj, "id")),
        name: as_string(field(obj, "name"), UNTITLED_BOARD),
        columns: as_array(field(obj, "columns"))
            .iter()
            .map(normalize_column)
            .collect(),
    }
}

/// The raw board list: the payload itself when it is an array, else its `boards` field.
pub fn extract_boards_payload(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        other => as_array(other.as_object().and_then(|o| o.get("boards"))),
    }
}

/// Normalize a whole payload. Fails only when no boards can be found.
pub fn normalize_boards(payload: &Value) -> KanbanResult<Vec<Board>> {
    let raw = extract_boards_payload(payload);
    if raw.is_empty() {
        return Err(KanbanError::MalformedPayload(NO_BOARDS_MESSAGE.to_string()));
    }
    tracing::debug!("Normalizing {} boards", raw.len());
    Ok(raw.iter().map(normalize_board).collect())
}
