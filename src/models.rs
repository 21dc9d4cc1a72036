use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// Priority of a task, serialized upper-case
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "NONE",
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Next priority in the cycle NONE -> LOW -> MEDIUM -> HIGH -> NONE
    pub fn cycle(self) -> Priority {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    pub fn parse(value: &str) -> Option<Priority> {
        match value.to_ascii_lowercase().as_str() {
            "none" | "0" => Some(Priority::None),
            "low" | "1" => Some(Priority::Low),
            "medium" | "med" | "2" => Some(Priority::Medium),
            "high" | "3" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Viewer,
    Member,
    Admin,
    Owner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Viewer => "viewer",
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Owner => "owner",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl User {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

/// Board-scoped lookup entry, used for both custom statuses and task types
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub position: i64,
}

pub type BoardStatus = LookupEntry;
pub type TaskType = LookupEntry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub task_statuses: Vec<BoardStatus>,
    #[serde(default)]
    pub task_types: Vec<TaskType>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Sort columns, tasks and lookups by their position keys
    pub fn normalize(&mut self) {
        self.columns.sort_by_key(|c| c.position);
        for column in &mut self.columns {
            column.tasks.sort_by_key(|t| t.position);
        }
        self.task_statuses.sort_by_key(|s| s.position);
        self.task_types.sort_by_key(|t| t.position);
    }

    pub fn column_index(&self, column_id: u64) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Locate a task as (column index, task index)
    pub fn find_task(&self, task_id: u64) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, column)| {
            column
                .tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|ti| (ci, ti))
        })
    }

    pub fn task(&self, task_id: u64) -> Option<&Task> {
        self.find_task(task_id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    pub fn task_mut(&mut self, task_id: u64) -> Option<&mut Task> {
        let (ci, ti) = self.find_task(task_id)?;
        Some(&mut self.columns[ci].tasks[ti])
    }

    pub fn status(&self, status_id: u64) -> Option<&BoardStatus> {
        self.task_statuses.iter().find(|s| s.id == status_id)
    }

    pub fn task_type(&self, type_id: u64) -> Option<&TaskType> {
        self.task_types.iter().find(|t| t.id == type_id)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: u64,
    pub name: String,
    pub position: i64,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Column {
    /// Renumber task positions to match vector order
    pub fn renumber(&mut self) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.position = i as i64;
            task.column_id = self.id;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    #[serde(default)]
    pub column_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status_id: Option<u64>,
    #[serde(default)]
    pub type_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Adds a tag unless already present. Returns whether the set changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| !t.eq_ignore_ascii_case(tag));
        before != self.tags.len()
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    /// Shallow merge of a server response into this task.
    ///
    /// Scalar fields come from `updated`; nested collections are only taken
    /// when the response carries them. A response without `columnId` keeps
    /// the current column.
    pub fn merge(&mut self, updated: Task) {
        let Task {
            subtasks,
            comments,
            attachments,
            history,
            ..
        } = &updated;
        let keep_subtasks = subtasks.is_empty();
        let keep_comments = comments.is_empty();
        let keep_attachments = attachments.is_empty();
        let keep_history = history.is_empty();

        let old = std::mem::replace(self, updated);
        if self.column_id == 0 {
            self.column_id = old.column_id;
        }
        if keep_subtasks {
            self.subtasks = old.subtasks;
        }
        if keep_comments {
            self.comments = old.comments;
        }
        if keep_attachments {
            self.attachments = old.attachments;
        }
        if keep_history {
            self.history = old.history;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimate: Option<f32>,
    #[serde(default)]
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub task_id: u64,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u64,
    #[serde(default)]
    pub task_id: u64,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    #[serde(default)]
    pub task_id: u64,
    pub field: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub id: u64,
    #[serde(default)]
    pub board_id: u64,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub type_id: Option<u64>,
    #[serde(default)]
    pub subtasks: Vec<String>,
}

impl TaskTemplate {
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            tags: self.tags.clone(),
            type_id: self.type_id,
            ..NewTask::default()
        }
    }

    /// Template capturing the reusable parts of an existing task
    pub fn from_task(name: &str, task: &Task) -> NewTemplate {
        NewTemplate {
            name: name.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            tags: task.tags.clone(),
            type_id: task.type_id,
            subtasks: task.subtasks.iter().map(|s| s.title.clone()).collect(),
        }
    }
}

// Write payloads

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveColumn {
    pub position: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    pub column_id: u64,
    pub position: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Partial task update. `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }

    /// The task as it would look once this update is applied locally
    pub fn apply_to(&self, task: &Task) -> Task {
        let mut next = task.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(status_id) = self.status_id {
            next.status_id = status_id;
        }
        if let Some(type_id) = self.type_id {
            next.type_id = type_id;
        }
        if let Some(start_date) = self.start_date {
            next.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            next.end_date = end_date;
        }
        if let Some(tags) = &self.tags {
            next.tags = tags.clone();
        }
        if let Some(assignee) = &self.assignee {
            next.assignee = assignee.clone();
        }
        next
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubtask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Option<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<String>,
}

/// Payload for creating or updating a board status or task type
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLookup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_json() -> serde_json::Value {
        json!({
            "id": 12,
            "columnId": 3,
            "title": "Write release notes",
            "description": "<p>Cover the new board view</p>",
            "position": 1,
            "endDate": "2026-11-02",
            "priority": "HIGH",
            "statusId": 4,
            "tags": ["docs"],
            "subtasks": [
                {"id": 1, "title": "Draft", "completed": true, "position": 0},
                {"id": 2, "title": "Review", "completed": false, "position": 1}
            ]
        })
    }

    #[test]
    fn test_task_deserializes_camel_case_fields() {
        let task: Task = serde_json::from_value(task_json()).unwrap();
        assert_eq!(task.column_id, 3);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(task.status_id, Some(4));
        assert_eq!(task.completed_subtasks(), 1);
        assert!(task.comments.is_empty());
    }

    #[test]
    fn test_missing_priority_defaults_to_none() {
        let task: Task =
            serde_json::from_value(json!({"id": 1, "title": "Bare task"})).unwrap();
        assert_eq!(task.priority, Priority::None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_priority_cycle_wraps() {
        let mut p = Priority::None;
        for _ in 0..4 {
            p = p.cycle();
        }
        assert_eq!(p, Priority::None);
        assert_eq!(Priority::Medium.cycle(), Priority::High);
    }

    #[test]
    fn test_priority_parse_accepts_names_and_digits() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("med"), Some(Priority::Medium));
        assert_eq!(Priority::parse("1"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_tags_behave_as_a_set() {
        let mut task: Task = serde_json::from_value(task_json()).unwrap();
        assert!(!task.add_tag("Docs"));
        assert!(task.add_tag("release"));
        assert!(!task.add_tag("   "));
        assert_eq!(task.tags, vec!["docs", "release"]);
        assert!(task.remove_tag("DOCS"));
        assert!(!task.remove_tag("missing"));
        assert_eq!(task.tags, vec!["release"]);
    }

    #[test]
    fn test_merge_keeps_collections_missing_from_response() {
        let mut task: Task = serde_json::from_value(task_json()).unwrap();
        let response: Task = serde_json::from_value(json!({
            "id": 12,
            "columnId": 3,
            "title": "Write release notes",
            "priority": "LOW"
        }))
        .unwrap();
        task.merge(response);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.subtasks.len(), 2);
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_merge_keeps_column_missing_from_response() {
        let mut task: Task = serde_json::from_value(task_json()).unwrap();
        let column_id = task.column_id;
        let response: Task = serde_json::from_value(json!({
            "id": 12,
            "title": "Write release notes"
        }))
        .unwrap();
        task.merge(response);
        assert_eq!(task.column_id, column_id);
    }

    #[test]
    fn test_task_update_serializes_only_set_fields() {
        let update = TaskUpdate {
            priority: Some(Priority::Medium),
            end_date: Some(None),
            ..TaskUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"priority": "MEDIUM", "endDate": null}));
        assert!(TaskUpdate::default().is_empty());
    }

    #[test]
    fn test_task_update_apply_to() {
        let task: Task = serde_json::from_value(task_json()).unwrap();
        let update = TaskUpdate {
            title: Some("Publish release notes".to_string()),
            status_id: Some(None),
            ..TaskUpdate::default()
        };
        let next = update.apply_to(&task);
        assert_eq!(next.title, "Publish release notes");
        assert_eq!(next.status_id, None);
        assert_eq!(next.priority, Priority::High);
    }

    #[test]
    fn test_board_normalize_and_lookup() {
        let mut board: Board = serde_json::from_value(json!({
            "id": 1,
            "name": "Roadmap",
            "columns": [
                {"id": 20, "name": "Done", "position": 2, "tasks": []},
                {"id": 10, "name": "Todo", "position": 0, "tasks": [
                    {"id": 5, "title": "b", "position": 1},
                    {"id": 4, "title": "a", "position": 0}
                ]}
            ]
        }))
        .unwrap();
        board.normalize();
        assert_eq!(board.columns[0].name, "Todo");
        assert_eq!(board.columns[0].tasks[0].id, 4);
        assert_eq!(board.find_task(5), Some((0, 1)));
        assert_eq!(board.column_index(20), Some(1));
        assert_eq!(board.task_count(), 2);
        assert!(board.task(99).is_none());
    }

    #[test]
    fn test_template_round_trips_to_new_task() {
        let task: Task = serde_json::from_value(task_json()).unwrap();
        let template = TaskTemplate::from_task("Release", &task);
        assert_eq!(template.subtasks, vec!["Draft", "Review"]);
        let stored = TaskTemplate {
            id: 1,
            board_id: 1,
            name: template.name,
            title: template.title,
            description: template.description,
            priority: template.priority,
            tags: template.tags,
            type_id: template.type_id,
            subtasks: template.subtasks,
        };
        let new_task = stored.to_new_task();
        assert_eq!(new_task.title, "Write release notes");
        assert_eq!(new_task.priority, Priority::High);
        assert_eq!(new_task.tags, vec!["docs"]);
    }
}
