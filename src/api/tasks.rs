use super::ApiClient;
use crate::error::{AppError, Result};
use crate::models::{
    Attachment, Comment, HistoryEntry, MoveTask, NewComment, NewHistoryEntry, NewSubtask, NewTask,
    Subtask, SubtaskUpdate, Task, TaskTemplate, TaskUpdate,
};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;
use std::path::Path;
use tracing::{info, instrument, warn};

impl ApiClient {
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn create_task(&self, board_id: u64, column_id: u64, task: &NewTask) -> Result<Task> {
        let mut created: Task = self
            .post(
                &format!("/api/boards/{}/columns/{}/tasks", board_id, column_id),
                task,
            )
            .await?;
        if created.column_id == 0 {
            created.column_id = column_id;
        }
        Ok(created)
    }

    pub async fn get_task(&self, task_id: u64) -> Result<Task> {
        let mut task: Task = self.get(&format!("/api/tasks/{}", task_id)).await?;
        task.subtasks.sort_by_key(|s| s.position);
        Ok(task)
    }

    #[instrument(skip(self, update))]
    pub async fn update_task(&self, task_id: u64, update: &TaskUpdate) -> Result<Task> {
        self.patch(&format!("/api/tasks/{}", task_id), update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: u64) -> Result<()> {
        self.delete(&format!("/api/tasks/{}", task_id)).await
    }

    #[instrument(skip(self))]
    pub async fn move_task(&self, task_id: u64, column_id: u64, position: i64) -> Result<()> {
        self.put_no_content(
            &format!("/api/tasks/{}/move", task_id),
            &MoveTask {
                column_id,
                position,
            },
        )
        .await
    }

    /// Creates a task from a template, then its subtasks one by one.
    ///
    /// Only a failed task creation is an `Err`. A failed subtask stops the
    /// remaining ones and comes back beside the task, which already exists.
    #[instrument(skip(self, template), fields(template = %template.name))]
    pub async fn create_task_from_template(
        &self,
        board_id: u64,
        column_id: u64,
        template: &TaskTemplate,
    ) -> Result<(Task, Option<AppError>)> {
        let mut task = self
            .create_task(board_id, column_id, &template.to_new_task())
            .await?;
        for title in &template.subtasks {
            let created = self
                .create_subtask(
                    task.id,
                    &NewSubtask {
                        title: title.clone(),
                        ..NewSubtask::default()
                    },
                )
                .await;
            match created {
                Ok(subtask) => task.subtasks.push(subtask),
                Err(err) => {
                    warn!(task_id = task.id, "template subtask failed: {}", err);
                    return Ok((task, Some(err)));
                }
            }
        }
        info!(task_id = task.id, "task created from template");
        Ok((task, None))
    }

    // Subtasks

    pub async fn list_subtasks(&self, task_id: u64) -> Result<Vec<Subtask>> {
        let mut subtasks: Vec<Subtask> =
            self.get(&format!("/api/tasks/{}/subtasks", task_id)).await?;
        subtasks.sort_by_key(|s| s.position);
        Ok(subtasks)
    }

    pub async fn create_subtask(&self, task_id: u64, subtask: &NewSubtask) -> Result<Subtask> {
        self.post(&format!("/api/tasks/{}/subtasks", task_id), subtask)
            .await
    }

    pub async fn update_subtask(
        &self,
        task_id: u64,
        subtask_id: u64,
        update: &SubtaskUpdate,
    ) -> Result<Subtask> {
        self.patch(
            &format!("/api/tasks/{}/subtasks/{}", task_id, subtask_id),
            update,
        )
        .await
    }

    pub async fn delete_subtask(&self, task_id: u64, subtask_id: u64) -> Result<()> {
        self.delete(&format!("/api/tasks/{}/subtasks/{}", task_id, subtask_id))
            .await
    }

    pub async fn reorder_subtasks(&self, task_id: u64, subtask_ids: &[u64]) -> Result<()> {
        self.put_no_content(
            &format!("/api/tasks/{}/subtasks/reorder", task_id),
            &json!({ "subtaskIds": subtask_ids }),
        )
        .await
    }

    // Comments

    pub async fn list_comments(&self, task_id: u64) -> Result<Vec<Comment>> {
        self.get(&format!("/api/tasks/{}/comments", task_id)).await
    }

    pub async fn create_comment(&self, task_id: u64, content: &str) -> Result<Comment> {
        self.post(
            &format!("/api/tasks/{}/comments", task_id),
            &NewComment {
                content: content.to_string(),
            },
        )
        .await
    }

    pub async fn update_comment(
        &self,
        task_id: u64,
        comment_id: u64,
        content: &str,
    ) -> Result<Comment> {
        self.put(
            &format!("/api/tasks/{}/comments/{}", task_id, comment_id),
            &NewComment {
                content: content.to_string(),
            },
        )
        .await
    }

    pub async fn delete_comment(&self, task_id: u64, comment_id: u64) -> Result<()> {
        self.delete(&format!("/api/tasks/{}/comments/{}", task_id, comment_id))
            .await
    }

    // Attachments

    pub async fn list_attachments(&self, task_id: u64) -> Result<Vec<Attachment>> {
        self.get(&format!("/api/tasks/{}/attachments", task_id))
            .await
    }

    /// Uploads a local file as a multipart `file` part
    #[instrument(skip(self))]
    pub async fn upload_attachment(&self, task_id: u64, file: &Path) -> Result<Attachment> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::invalid_input(format!("not a file: {}", file.display())))?
            .to_string();
        let bytes = tokio::fs::read(file).await?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let builder = self
            .request(Method::POST, &format!("/api/tasks/{}/attachments", task_id))
            .multipart(form);
        let res = self.send(builder).await?;
        Ok(res.json::<Attachment>().await?)
    }

    /// Fetches the raw attachment bytes
    pub async fn download_attachment(&self, task_id: u64, attachment_id: u64) -> Result<Vec<u8>> {
        let builder = self.request(
            Method::GET,
            &format!(
                "/api/tasks/{}/attachments/{}/download",
                task_id, attachment_id
            ),
        );
        let res = self.send(builder).await?;
        Ok(res.bytes().await?.to_vec())
    }

    pub async fn delete_attachment(&self, task_id: u64, attachment_id: u64) -> Result<()> {
        self.delete(&format!(
            "/api/tasks/{}/attachments/{}",
            task_id, attachment_id
        ))
        .await
    }

    // History

    pub async fn list_history(&self, task_id: u64) -> Result<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> =
            self.get(&format!("/api/tasks/{}/history", task_id)).await?;
        // newest first
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    pub async fn create_history_entry(
        &self,
        task_id: u64,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry> {
        self.post(&format!("/api/tasks/{}/history", task_id), entry)
            .await
    }
}
