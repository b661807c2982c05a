//! Demo source: jsonplaceholder users become boards, their todos become tasks.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use kanban_core::{KanbanResult, RemoteConfig};
use kanban_domain::{Board, Column, Task};
use serde::Deserialize;

use crate::client::{apply_delay, build_client, get_json};
use crate::source::BoardSource;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const TODO: &str = "Todo";
const DOING: &str = "Doing";
const DONE: &str = "Done";
const COLUMN_NAMES: [&str; 3] = [TODO, DOING, DONE];

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderUser {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderTodo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl PlaceholderTodo {
    /// Completed todos are done; open ones are spread over Todo/Doing by id parity.
    fn column_name(&self) -> &'static str {
        if self.completed {
            DONE
        } else if self.id % 2 == 0 {
            DOING
        } else {
            TODO
        }
    }
}

/// One board per user, in user order, each with Todo/Doing/Done columns.
pub fn boards_from_users_and_todos(
    users: &[PlaceholderUser],
    todos: &[PlaceholderTodo],
) -> Vec<Board> {
    let mut todos_by_user: HashMap<u64, Vec<&PlaceholderTodo>> = HashMap::new();
    for todo in todos {
        todos_by_user.entry(todo.user_id).or_default().push(todo);
    }

    users
        .iter()
        .map(|user| {
            let user_todos = todos_by_user.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
            let columns = COLUMN_NAMES
                .iter()
                .map(|&name| {
                    let tasks = user_todos
                        .iter()
                        .filter(|todo| todo.column_name() == name)
                        .map(|todo| Task::new(todo.title.clone(), name))
                        .collect();
                    Column::with_tasks(name, tasks)
                })
                .collect();
            Board::with_columns(user.name.clone(), columns)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct JsonPlaceholderSource {
    base_url: String,
    timeout: Duration,
    delay: Option<Duration>,
}

impl JsonPlaceholderSource {
    pub fn from_config(config: &RemoteConfig) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: config.timeout(),
            delay: config.api_delay(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl BoardSource for JsonPlaceholderSource {
    async fn fetch_boards(&self) -> KanbanResult<Vec<Board>> {
        let client = build_client(self.timeout)?;
        let users_url = format!("{}/users", self.base_url);
        let todos_url = format!("{}/todos", self.base_url);

        let (users, todos) = futures::try_join!(
            get_json::<Vec<PlaceholderUser>>(&client, &users_url, &[]),
            get_json::<Vec<PlaceholderTodo>>(&client, &todos_url, &[]),
        )?;
        apply_delay(self.delay).await;

        let boards = boards_from_users_and_todos(&users, &todos);
        tracing::info!(
            "Fetched {} users and {} todos from {}",
            users.len(),
            todos.len(),
            self.base_url
        );
        Ok(boards)
    }

    fn name(&self) -> &'static str {
        "jsonplaceholder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(user_id: u64, id: u64, completed: bool) -> PlaceholderTodo {
        PlaceholderTodo {
            user_id,
            id,
            title: format!("todo {}", id),
            completed,
        }
    }

    #[test]
    fn test_grouping_and_status() {
        let users = vec![
            PlaceholderUser {
                id: 1,
                name: "Leanne Graham".to_string(),
            },
            PlaceholderUser {
                id: 2,
                name: "Ervin Howell".to_string(),
            },
        ];
        let todos = vec![
            todo(1, 1, false),
            todo(1, 2, false),
            todo(1, 3, true),
            todo(1, 4, true),
            todo(2, 5, false),
            todo(9, 6, false),
        ];

        let boards = boards_from_users_and_todos(&users, &todos);

        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].name, "Leanne Graham");
        assert_eq!(boards[0].column_names(), vec!["Todo", "Doing", "Done"]);

        let titles = |column: &Column| -> Vec<String> {
            column.tasks.iter().map(|t| t.title.clone()).collect()
        };
        assert_eq!(titles(&boards[0].columns[0]), vec!["todo 1"]);
        assert_eq!(titles(&boards[0].columns[1]), vec!["todo 2"]);
        assert_eq!(titles(&boards[0].columns[2]), vec!["todo 3", "todo 4"]);
        assert!(boards[0].tasks().all(|t| !t.status.is_empty()));
        assert_eq!(boards[0].columns[2].tasks[0].status, "Done");

        assert_eq!(boards[1].task_count(), 1);
    }

    #[test]
    fn test_user_without_todos_gets_empty_columns() {
        let users = vec![PlaceholderUser {
            id: 3,
            name: "Clementine".to_string(),
        }];
        let boards = boards_from_users_and_todos(&users, &[]);
        assert_eq!(boards[0].columns.len(), 3);
        assert_eq!(boards[0].task_count(), 0);
    }

    #[test]
    fn test_todo_wire_names() {
        let todo: PlaceholderTodo =
            serde_json::from_str(r#"{"userId":1,"id":2,"title":"x","completed":true}"#).unwrap();
        assert_eq!(todo.user_id, 1);
        assert!(todo.completed);
    }
}
