//! Field-level change tracking for tasks.
//!
//! After an update, the previous and new task are compared field by field and
//! one history entry is posted per changed field. Posts are sequential; a
//! failure stops the remaining posts and leaves the entries already written.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Board, HistoryEntry, NewHistoryEntry, Task};
use chrono::NaiveDate;
use tracing::{debug, warn};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_START_DATE: &str = "startDate";
pub const FIELD_END_DATE: &str = "endDate";
pub const FIELD_ASSIGNEE: &str = "assignee";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_COLUMN: &str = "column";

fn date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format("%Y-%m-%d").to_string())
}

fn tags(value: &[String]) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.join(", "))
    }
}

// Lookup ids are rendered by name when the board knows them
fn lookup_name(
    id: Option<u64>,
    board: Option<&Board>,
    find: fn(&Board, u64) -> Option<String>,
) -> Option<String> {
    let id = id?;
    board
        .and_then(|b| find(b, id))
        .or_else(|| Some(id.to_string()))
}

fn status_name(board: &Board, id: u64) -> Option<String> {
    board.status(id).map(|s| s.name.clone())
}

fn type_name(board: &Board, id: u64) -> Option<String> {
    board.task_type(id).map(|t| t.name.clone())
}

fn column_name(board: &Board, id: u64) -> Option<String> {
    board
        .column_index(id)
        .map(|i| board.columns[i].name.clone())
}

/// Compares two versions of a task and returns one entry per changed field
pub fn diff_tasks(before: &Task, after: &Task, board: Option<&Board>) -> Vec<NewHistoryEntry> {
    let mut changes = Vec::new();
    let mut push = |field: &str, old: Option<String>, new: Option<String>| {
        if old != new {
            changes.push(NewHistoryEntry {
                field: field.to_string(),
                old_value: old,
                new_value: new,
            });
        }
    };

    push(
        FIELD_TITLE,
        Some(before.title.clone()),
        Some(after.title.clone()),
    );
    push(
        FIELD_DESCRIPTION,
        before.description.clone(),
        after.description.clone(),
    );
    push(
        FIELD_PRIORITY,
        Some(before.priority.to_string()),
        Some(after.priority.to_string()),
    );
    push(
        FIELD_STATUS,
        lookup_name(before.status_id, board, status_name),
        lookup_name(after.status_id, board, status_name),
    );
    push(
        FIELD_TYPE,
        lookup_name(before.type_id, board, type_name),
        lookup_name(after.type_id, board, type_name),
    );
    push(
        FIELD_START_DATE,
        date(before.start_date),
        date(after.start_date),
    );
    push(FIELD_END_DATE, date(before.end_date), date(after.end_date));
    push(
        FIELD_ASSIGNEE,
        before.assignee.clone(),
        after.assignee.clone(),
    );
    push(FIELD_TAGS, tags(&before.tags), tags(&after.tags));
    if before.column_id != after.column_id {
        push(
            FIELD_COLUMN,
            lookup_name(Some(before.column_id), board, column_name),
            lookup_name(Some(after.column_id), board, column_name),
        );
    }

    changes
}

/// Posts each change in order, stopping at the first failure
pub async fn record_changes(
    api: &ApiClient,
    task_id: u64,
    changes: &[NewHistoryEntry],
) -> Result<Vec<HistoryEntry>> {
    let mut recorded = Vec::with_capacity(changes.len());
    for change in changes {
        match api.create_history_entry(task_id, change).await {
            Ok(entry) => recorded.push(entry),
            Err(err) => {
                warn!(
                    task_id,
                    field = %change.field,
                    recorded = recorded.len(),
                    total = changes.len(),
                    "history recording stopped: {}",
                    err
                );
                return Err(err);
            }
        }
    }
    debug!(task_id, count = recorded.len(), "history recorded");
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{board_json, client_for, task_json};
    use crate::models::Priority;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task() -> Task {
        serde_json::from_value(task_json(100, 10, "Set up CI", 0)).unwrap()
    }

    fn board() -> Board {
        serde_json::from_value(board_json()).unwrap()
    }

    #[test]
    fn test_identical_tasks_have_no_changes() {
        assert!(diff_tasks(&task(), &task(), None).is_empty());
    }

    #[test]
    fn test_each_changed_field_yields_one_entry() {
        let before = task();
        let mut after = task();
        after.title = "Set up CI pipeline".to_string();
        after.priority = Priority::Medium;
        after.tags = vec!["infra".to_string()];

        let changes = diff_tasks(&before, &after, None);
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec![FIELD_TITLE, FIELD_PRIORITY, FIELD_TAGS]);
        assert_eq!(changes[1].old_value.as_deref(), Some("NONE"));
        assert_eq!(changes[1].new_value.as_deref(), Some("MEDIUM"));
        assert_eq!(changes[2].old_value, None);
        assert_eq!(changes[2].new_value.as_deref(), Some("infra"));
    }

    #[test]
    fn test_lookups_render_by_name_when_board_known() {
        let before = task();
        let mut after = task();
        after.status_id = Some(2);
        after.column_id = 11;

        let board = board();
        let changes = diff_tasks(&before, &after, Some(&board));
        assert_eq!(changes[0].field, FIELD_STATUS);
        assert_eq!(changes[0].new_value.as_deref(), Some("Blocked"));
        assert_eq!(changes[1].field, FIELD_COLUMN);
        assert_eq!(changes[1].old_value.as_deref(), Some("Todo"));
        assert_eq!(changes[1].new_value.as_deref(), Some("Doing"));

        let without_board = diff_tasks(&before, &after, None);
        assert_eq!(without_board[0].new_value.as_deref(), Some("2"));
    }

    #[test]
    fn test_dates_are_formatted() {
        let before = task();
        let mut after = task();
        after.end_date = NaiveDate::from_ymd_opt(2026, 12, 24);
        let changes = diff_tasks(&before, &after, None);
        assert_eq!(changes[0].field, FIELD_END_DATE);
        assert_eq!(changes[0].new_value.as_deref(), Some("2026-12-24"));
    }

    #[tokio::test]
    async fn test_history_failure_leaves_partial_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/100/history"))
            .and(body_json(json!({
                "field": "title", "oldValue": "a", "newValue": "b"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1, "taskId": 100, "field": "title"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/100/history"))
            .and(body_json(json!({
                "field": "priority", "oldValue": "NONE", "newValue": "LOW"
            })))
            .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let changes = vec![
            NewHistoryEntry {
                field: "title".to_string(),
                old_value: Some("a".to_string()),
                new_value: Some("b".to_string()),
            },
            NewHistoryEntry {
                field: "priority".to_string(),
                old_value: Some("NONE".to_string()),
                new_value: Some("LOW".to_string()),
            },
            NewHistoryEntry {
                field: "tags".to_string(),
                old_value: None,
                new_value: Some("x".to_string()),
            },
        ];
        let result = record_changes(&api, 100, &changes).await;
        assert_eq!(result.unwrap_err().status(), Some(500));
        // the tags entry was never attempted
        let posted = server.received_requests().await.unwrap();
        assert_eq!(posted.len(), 2);
    }
}
