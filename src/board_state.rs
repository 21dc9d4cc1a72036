//! The open board and the local reorder/update operations on it.
//!
//! Every mutating operation follows the same pattern: snapshot, apply the
//! change locally, send the request, and restore the snapshot if the request
//! fails. Positions are renumbered `0..n` after each local splice.

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::history;
use crate::models::{Board, Column, Subtask, SubtaskUpdate, Task, TaskUpdate};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct BoardState {
    pub board: Board,
}

fn renumber_columns(columns: &mut [Column]) {
    for (i, column) in columns.iter_mut().enumerate() {
        column.position = i as i64;
    }
}

impl BoardState {
    pub fn new(mut board: Board) -> Self {
        board.normalize();
        Self { board }
    }

    pub fn id(&self) -> u64 {
        self.board.id
    }

    fn rollback(&mut self, snapshot: Board, err: &AppError) {
        warn!(board_id = self.board.id, "rolling back local change: {}", err);
        self.board = snapshot;
    }

    /// Moves a column to `to` (clamped to the last slot)
    pub async fn move_column(&mut self, api: &ApiClient, from: usize, to: usize) -> Result<()> {
        let len = self.board.columns.len();
        if from >= len {
            return Err(AppError::invalid_input(format!(
                "column index {} out of range",
                from
            )));
        }
        let to = to.min(len - 1);
        if from == to {
            return Ok(());
        }

        let snapshot = self.board.clone();
        let column = self.board.columns.remove(from);
        let column_id = column.id;
        self.board.columns.insert(to, column);
        renumber_columns(&mut self.board.columns);
        debug!(column_id, from, to, "column moved locally");

        if let Err(err) = api.move_column(self.board.id, column_id, to as i64).await {
            self.rollback(snapshot, &err);
            return Err(err);
        }
        Ok(())
    }

    /// Moves a task to `to_index` in `to_column` (clamped to the column end)
    pub async fn move_task(
        &mut self,
        api: &ApiClient,
        task_id: u64,
        to_column: usize,
        to_index: usize,
    ) -> Result<()> {
        let (from_column, from_index) = self
            .board
            .find_task(task_id)
            .ok_or_else(|| AppError::not_found("task", task_id))?;
        if to_column >= self.board.columns.len() {
            return Err(AppError::invalid_input(format!(
                "column index {} out of range",
                to_column
            )));
        }

        let snapshot = self.board.clone();
        let task = self.board.columns[from_column].tasks.remove(from_index);
        let target_len = self.board.columns[to_column].tasks.len();
        let to_index = to_index.min(target_len);
        if from_column == to_column && from_index == to_index {
            self.board = snapshot;
            return Ok(());
        }

        self.board.columns[to_column].tasks.insert(to_index, task);
        self.board.columns[from_column].renumber();
        self.board.columns[to_column].renumber();
        let column_id = self.board.columns[to_column].id;
        debug!(task_id, column_id, to_index, "task moved locally");

        if let Err(err) = api
            .move_task(task_id, column_id, to_index as i64)
            .await
        {
            self.rollback(snapshot, &err);
            return Err(err);
        }
        Ok(())
    }

    /// Moves a task one step: up/down within its column, left/right to the
    /// end of the neighbouring column. Returns false at the board edges.
    pub async fn shift_task(
        &mut self,
        api: &ApiClient,
        task_id: u64,
        direction: Direction,
    ) -> Result<bool> {
        let (column, index) = self
            .board
            .find_task(task_id)
            .ok_or_else(|| AppError::not_found("task", task_id))?;
        let last_column = self.board.columns.len().saturating_sub(1);
        let column_len = self.board.columns[column].tasks.len();

        let target = match direction {
            Direction::Up if index > 0 => (column, index - 1),
            Direction::Down if index + 1 < column_len => (column, index + 1),
            Direction::Left if column > 0 => {
                (column - 1, self.board.columns[column - 1].tasks.len())
            }
            Direction::Right if column < last_column => {
                (column + 1, self.board.columns[column + 1].tasks.len())
            }
            _ => return Ok(false),
        };
        self.move_task(api, task_id, target.0, target.1).await?;
        Ok(true)
    }

    /// Removes the task locally first and restores it if the delete fails
    pub async fn delete_task(&mut self, api: &ApiClient, task_id: u64) -> Result<()> {
        let (column, index) = self
            .board
            .find_task(task_id)
            .ok_or_else(|| AppError::not_found("task", task_id))?;
        let snapshot = self.board.clone();
        self.board.columns[column].tasks.remove(index);
        self.board.columns[column].renumber();

        if let Err(err) = api.delete_task(task_id).await {
            self.rollback(snapshot, &err);
            return Err(err);
        }
        Ok(())
    }

    pub async fn delete_column(&mut self, api: &ApiClient, column_id: u64) -> Result<()> {
        let index = self
            .board
            .column_index(column_id)
            .ok_or_else(|| AppError::not_found("column", column_id))?;
        api.delete_column(self.board.id, column_id).await?;
        self.board.columns.remove(index);
        renumber_columns(&mut self.board.columns);
        Ok(())
    }

    pub fn insert_column(&mut self, column: Column) {
        self.board.columns.push(column);
        renumber_columns(&mut self.board.columns);
    }

    /// Places a newly created task at the end of its column
    pub fn insert_task(&mut self, task: Task) {
        if let Some(index) = self.board.column_index(task.column_id) {
            let column = &mut self.board.columns[index];
            column.tasks.push(task);
            column.renumber();
        }
    }

    /// Replaces the board copy of a task with a fresher one
    pub fn replace_task(&mut self, task: &Task) {
        if let Some(existing) = self.board.task_mut(task.id) {
            existing.merge(task.clone());
        }
    }

    /// Applies `update` to a task and records its history.
    ///
    /// The local copy changes before the request and is restored if the
    /// update itself fails. A history failure keeps the update and is
    /// returned so the caller can report it.
    pub async fn update_task(
        &mut self,
        api: &ApiClient,
        task_id: u64,
        update: &TaskUpdate,
    ) -> Result<Task> {
        let current = self
            .board
            .task(task_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("task", task_id))?;
        if update.is_empty() {
            return Ok(current);
        }
        let snapshot = self.board.clone();
        self.replace_task(&update.apply_to(&current));

        let response = match api.update_task(task_id, update).await {
            Ok(response) => response,
            Err(err) => {
                self.rollback(snapshot, &err);
                return Err(err);
            }
        };
        let mut updated = current.clone();
        updated.merge(response);
        self.replace_task(&updated);

        let changes = history::diff_tasks(&current, &updated, Some(&self.board));
        let recorded = history::record_changes(api, task_id, &changes).await?;
        for entry in recorded.into_iter().rev() {
            updated.history.insert(0, entry);
        }
        self.replace_task(&updated);
        Ok(updated)
    }
}

/// Flips a subtask's completed flag locally, reverting if the server refuses
pub async fn toggle_subtask(api: &ApiClient, task: &mut Task, subtask_id: u64) -> Result<Subtask> {
    let subtask = task
        .subtasks
        .iter_mut()
        .find(|s| s.id == subtask_id)
        .ok_or_else(|| AppError::not_found("subtask", subtask_id))?;
    let previous = subtask.completed;
    subtask.completed = !previous;

    let update = SubtaskUpdate {
        completed: Some(!previous),
        ..SubtaskUpdate::default()
    };
    match api.update_subtask(task.id, subtask_id, &update).await {
        Ok(saved) => {
            if let Some(local) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                *local = saved.clone();
            }
            Ok(saved)
        }
        Err(err) => {
            if let Some(local) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                local.completed = previous;
            }
            warn!(subtask_id, "subtask toggle rolled back: {}", err);
            Err(err)
        }
    }
}

/// Swaps a subtask with its neighbour and persists the new order
pub async fn shift_subtask(
    api: &ApiClient,
    task: &mut Task,
    subtask_id: u64,
    up: bool,
) -> Result<bool> {
    let index = task
        .subtasks
        .iter()
        .position(|s| s.id == subtask_id)
        .ok_or_else(|| AppError::not_found("subtask", subtask_id))?;
    let target = if up {
        match index.checked_sub(1) {
            Some(t) => t,
            None => return Ok(false),
        }
    } else if index + 1 < task.subtasks.len() {
        index + 1
    } else {
        return Ok(false);
    };

    let snapshot = task.subtasks.clone();
    task.subtasks.swap(index, target);
    for (i, subtask) in task.subtasks.iter_mut().enumerate() {
        subtask.position = i as i64;
    }
    let ids: Vec<u64> = task.subtasks.iter().map(|s| s.id).collect();
    if let Err(err) = api.reorder_subtasks(task.id, &ids).await {
        task.subtasks = snapshot;
        return Err(err);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{board_json, client_for, task_json};
    use crate::models::Priority;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state() -> BoardState {
        BoardState::new(serde_json::from_value(board_json()).unwrap())
    }

    fn task_ids(state: &BoardState, column: usize) -> Vec<u64> {
        state.board.columns[column]
            .tasks
            .iter()
            .map(|t| t.id)
            .collect()
    }

    fn positions(state: &BoardState, column: usize) -> Vec<i64> {
        state.board.columns[column]
            .tasks
            .iter()
            .map(|t| t.position)
            .collect()
    }

    #[tokio::test]
    async fn test_move_column_splices_and_renumbers() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/columns/12/move"))
            .and(body_json(json!({"position": 0})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        state.move_column(&api, 2, 0).await.unwrap();
        let ids: Vec<u64> = state.board.columns.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![12, 10, 11]);
        let positions: Vec<i64> = state.board.columns.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_failed_column_move_restores_order() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/columns/10/move"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let before = state.board.clone();
        assert!(state.move_column(&api, 0, 2).await.is_err());
        assert_eq!(state.board, before);
    }

    #[tokio::test]
    async fn test_move_to_same_slot_sends_nothing() {
        let server = MockServer::start().await;
        let api = client_for(&server).await;
        let mut state = state();
        state.move_column(&api, 1, 1).await.unwrap();
        state.move_task(&api, 101, 0, 1).await.unwrap();
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_move_task_within_column() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/100/move"))
            .and(body_json(json!({"columnId": 10, "position": 2})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        state.move_task(&api, 100, 0, 2).await.unwrap();
        assert_eq!(task_ids(&state, 0), vec![101, 102, 100]);
        assert_eq!(positions(&state, 0), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_shift_task_right_appends_to_next_column() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/101/move"))
            .and(body_json(json!({"columnId": 11, "position": 1})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        assert!(state.shift_task(&api, 101, Direction::Right).await.unwrap());
        assert_eq!(task_ids(&state, 0), vec![100, 102]);
        assert_eq!(task_ids(&state, 1), vec![110, 101]);
        assert_eq!(state.board.task(101).unwrap().column_id, 11);
        assert_eq!(positions(&state, 0), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_shift_task_at_edges_is_noop() {
        let server = MockServer::start().await;
        let api = client_for(&server).await;
        let mut state = state();
        assert!(!state.shift_task(&api, 100, Direction::Left).await.unwrap());
        assert!(!state.shift_task(&api, 100, Direction::Up).await.unwrap());
        assert!(!state.shift_task(&api, 102, Direction::Down).await.unwrap());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_task_move_restores_both_columns() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/110/move"))
            .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let before = state.board.clone();
        let err = state
            .shift_task(&api, 110, Direction::Left)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(state.board, before);
    }

    #[tokio::test]
    async fn test_unknown_task_is_not_found() {
        let server = MockServer::start().await;
        let api = client_for(&server).await;
        let mut state = state();
        assert!(matches!(
            state.move_task(&api, 999, 0, 0).await,
            Err(AppError::NotFound { resource: "task", id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_failed_delete_restores_task() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/101"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        assert!(state.delete_task(&api, 101).await.is_err());
        assert_eq!(task_ids(&state, 0), vec![100, 101, 102]);
    }

    #[tokio::test]
    async fn test_delete_task_renumbers_column() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/100"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        state.delete_task(&api, 100).await.unwrap();
        assert_eq!(task_ids(&state, 0), vec![101, 102]);
        assert_eq!(positions(&state, 0), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_update_task_merges_response() {
        let server = MockServer::start().await;
        let mut response = task_json(110, 11, "Refactor auth", 0);
        response["priority"] = json!("LOW");
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/110"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/110/history"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1, "taskId": 110, "field": "priority"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let update = TaskUpdate {
            priority: Some(Priority::Low),
            ..TaskUpdate::default()
        };
        let task = state.update_task(&api, 110, &update).await.unwrap();
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(state.board.task(110).unwrap().priority, Priority::Low);
        assert_eq!(state.board.task(110).unwrap().history.len(), 1);
    }

    #[tokio::test]
    async fn test_update_response_without_column_keeps_column() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/110"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 110, "title": "Refactor auth", "position": 0, "priority": "LOW"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/110/history"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1, "taskId": 110, "field": "priority"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let update = TaskUpdate {
            priority: Some(Priority::Low),
            ..TaskUpdate::default()
        };
        let task = state.update_task(&api, 110, &update).await.unwrap();
        assert_eq!(task.column_id, 11);
        assert_eq!(state.board.task(110).unwrap().column_id, 11);
        assert_eq!(task_ids(&state, 1), vec![110]);
        let posts = server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .count();
        assert_eq!(posts, 1);
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/110"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let update = TaskUpdate {
            priority: Some(Priority::High),
            ..TaskUpdate::default()
        };
        assert!(state.update_task(&api, 110, &update).await.is_err());
        assert_eq!(state.board.task(110).unwrap().priority, Priority::None);
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let server = MockServer::start().await;
        let api = client_for(&server).await;
        let mut state = state();
        let task = state
            .update_task(&api, 100, &TaskUpdate::default())
            .await
            .unwrap();
        assert_eq!(task.title, "Set up CI");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_keeps_update() {
        let server = MockServer::start().await;
        let mut response = task_json(110, 11, "Refactor auth module", 0);
        response["priority"] = json!("NONE");
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/110"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/110/history"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut state = state();
        let update = TaskUpdate {
            title: Some("Refactor auth module".to_string()),
            ..TaskUpdate::default()
        };
        let err = state.update_task(&api, 110, &update).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(state.board.task(110).unwrap().title, "Refactor auth module");
    }

    #[tokio::test]
    async fn test_toggle_subtask_reverts_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/100/subtasks/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut task: Task = serde_json::from_value(json!({
            "id": 100, "title": "t",
            "subtasks": [{"id": 1, "title": "s", "completed": false}]
        }))
        .unwrap();
        assert!(toggle_subtask(&api, &mut task, 1).await.is_err());
        assert!(!task.subtasks[0].completed);
    }

    #[tokio::test]
    async fn test_toggle_subtask_saves_server_copy() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/100/subtasks/1"))
            .and(body_json(json!({"completed": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 1, "title": "s", "completed": true}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut task: Task = serde_json::from_value(json!({
            "id": 100, "title": "t",
            "subtasks": [{"id": 1, "title": "s", "completed": false}]
        }))
        .unwrap();
        let saved = toggle_subtask(&api, &mut task, 1).await.unwrap();
        assert!(saved.completed);
        assert!(task.subtasks[0].completed);
    }

    #[tokio::test]
    async fn test_shift_subtask_persists_order() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/100/subtasks/reorder"))
            .and(body_json(json!({"subtaskIds": [2, 1]})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let mut task: Task = serde_json::from_value(json!({
            "id": 100, "title": "t",
            "subtasks": [
                {"id": 1, "title": "a", "position": 0},
                {"id": 2, "title": "b", "position": 1}
            ]
        }))
        .unwrap();
        assert!(shift_subtask(&api, &mut task, 2, true).await.unwrap());
        assert_eq!(task.subtasks[0].id, 2);
        assert!(!shift_subtask(&api, &mut task, 2, true).await.unwrap());
    }
}
