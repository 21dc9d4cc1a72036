use super::ApiClient;
use crate::error::Result;
use crate::models::{
    Board, BoardMember, BoardStatus, BoardUpdate, Column, ColumnUpdate, MoveColumn, NewBoard,
    NewColumn, NewLookup, NewMember, NewTemplate, Role, TaskTemplate, TaskType, User,
};
use serde_json::json;
use tracing::instrument;

impl ApiClient {
    pub async fn current_user(&self) -> Result<User> {
        self.get("/api/users/me").await
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        self.get("/api/boards").await
    }

    #[instrument(skip(self))]
    pub async fn get_board(&self, board_id: u64) -> Result<Board> {
        let mut board: Board = self.get(&format!("/api/boards/{}", board_id)).await?;
        board.normalize();
        Ok(board)
    }

    #[instrument(skip(self, board), fields(name = %board.name))]
    pub async fn create_board(&self, board: &NewBoard) -> Result<Board> {
        self.post("/api/boards", board).await
    }

    pub async fn update_board(&self, board_id: u64, update: &BoardUpdate) -> Result<Board> {
        self.put(&format!("/api/boards/{}", board_id), update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_board(&self, board_id: u64) -> Result<()> {
        self.delete(&format!("/api/boards/{}", board_id)).await
    }

    // Columns

    pub async fn create_column(&self, board_id: u64, column: &NewColumn) -> Result<Column> {
        self.post(&format!("/api/boards/{}/columns", board_id), column)
            .await
    }

    pub async fn update_column(
        &self,
        board_id: u64,
        column_id: u64,
        update: &ColumnUpdate,
    ) -> Result<Column> {
        self.put(
            &format!("/api/boards/{}/columns/{}", board_id, column_id),
            update,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_column(&self, board_id: u64, column_id: u64) -> Result<()> {
        self.delete(&format!("/api/boards/{}/columns/{}", board_id, column_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn move_column(&self, board_id: u64, column_id: u64, position: i64) -> Result<()> {
        self.put_no_content(
            &format!("/api/boards/{}/columns/{}/move", board_id, column_id),
            &MoveColumn { position },
        )
        .await
    }

    // Statuses and types

    pub async fn list_statuses(&self, board_id: u64) -> Result<Vec<BoardStatus>> {
        self.get(&format!("/api/boards/{}/statuses", board_id)).await
    }

    pub async fn create_status(&self, board_id: u64, status: &NewLookup) -> Result<BoardStatus> {
        self.post(&format!("/api/boards/{}/statuses", board_id), status)
            .await
    }

    pub async fn update_status(
        &self,
        board_id: u64,
        status_id: u64,
        status: &NewLookup,
    ) -> Result<BoardStatus> {
        self.put(
            &format!("/api/boards/{}/statuses/{}", board_id, status_id),
            status,
        )
        .await
    }

    pub async fn delete_status(&self, board_id: u64, status_id: u64) -> Result<()> {
        self.delete(&format!("/api/boards/{}/statuses/{}", board_id, status_id))
            .await
    }

    pub async fn list_types(&self, board_id: u64) -> Result<Vec<TaskType>> {
        self.get(&format!("/api/boards/{}/types", board_id)).await
    }

    pub async fn create_type(&self, board_id: u64, task_type: &NewLookup) -> Result<TaskType> {
        self.post(&format!("/api/boards/{}/types", board_id), task_type)
            .await
    }

    pub async fn update_type(
        &self,
        board_id: u64,
        type_id: u64,
        task_type: &NewLookup,
    ) -> Result<TaskType> {
        self.put(
            &format!("/api/boards/{}/types/{}", board_id, type_id),
            task_type,
        )
        .await
    }

    pub async fn delete_type(&self, board_id: u64, type_id: u64) -> Result<()> {
        self.delete(&format!("/api/boards/{}/types/{}", board_id, type_id))
            .await
    }

    /// Every tag used by tasks on the board
    pub async fn list_tags(&self, board_id: u64) -> Result<Vec<String>> {
        self.get(&format!("/api/boards/{}/tags", board_id)).await
    }

    // Members

    pub async fn list_members(&self, board_id: u64) -> Result<Vec<BoardMember>> {
        self.get(&format!("/api/boards/{}/members", board_id)).await
    }

    pub async fn add_member(&self, board_id: u64, member: &NewMember) -> Result<BoardMember> {
        self.post(&format!("/api/boards/{}/members", board_id), member)
            .await
    }

    pub async fn update_member_role(
        &self,
        board_id: u64,
        user_id: u64,
        role: Role,
    ) -> Result<BoardMember> {
        self.put(
            &format!("/api/boards/{}/members/{}", board_id, user_id),
            &json!({ "role": role }),
        )
        .await
    }

    pub async fn remove_member(&self, board_id: u64, user_id: u64) -> Result<()> {
        self.delete(&format!("/api/boards/{}/members/{}", board_id, user_id))
            .await
    }

    // Templates

    pub async fn list_templates(&self, board_id: u64) -> Result<Vec<TaskTemplate>> {
        self.get(&format!("/api/boards/{}/templates", board_id)).await
    }

    pub async fn create_template(
        &self,
        board_id: u64,
        template: &NewTemplate,
    ) -> Result<TaskTemplate> {
        self.post(&format!("/api/boards/{}/templates", board_id), template)
            .await
    }

    pub async fn update_template(
        &self,
        board_id: u64,
        template_id: u64,
        template: &NewTemplate,
    ) -> Result<TaskTemplate> {
        self.put(
            &format!("/api/boards/{}/templates/{}", board_id, template_id),
            template,
        )
        .await
    }

    pub async fn delete_template(&self, board_id: u64, template_id: u64) -> Result<()> {
        self.delete(&format!(
            "/api/boards/{}/templates/{}",
            board_id, template_id
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{board_json, client_for};
    use crate::models::{NewBoard, NewColumn, Role};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_board_sorts_columns_and_tasks() {
        let server = MockServer::start().await;
        let mut body = board_json();
        body["columns"].as_array_mut().unwrap().reverse();
        Mock::given(method("GET"))
            .and(path("/api/boards/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let board = client_for(&server).await.get_board(1).await.unwrap();
        let names: Vec<&str> = board.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Todo", "Doing", "Done"]);
        assert_eq!(board.task_statuses.len(), 2);
    }

    #[tokio::test]
    async fn test_create_board_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/boards"))
            .and(body_json(json!({"name": "Launch"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": 7, "name": "Launch"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let board = client_for(&server)
            .await
            .create_board(&NewBoard {
                name: "Launch".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(board.id, 7);
        assert!(board.columns.is_empty());
    }

    #[tokio::test]
    async fn test_create_column_and_move_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/boards/1/columns"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"id": 13, "name": "Review", "position": 3}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/columns/13/move"))
            .and(body_json(json!({"position": 1})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let column = client
            .create_column(
                1,
                &NewColumn {
                    name: "Review".to_string(),
                    color: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(column.position, 3);
        client.move_column(1, column.id, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_member_role_update_sends_upper_case_role() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/members/5"))
            .and(body_json(json!({"role": "ADMIN"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"userId": 5, "username": "sam", "role": "ADMIN"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let member = client_for(&server)
            .await
            .update_member_role(1, 5, Role::Admin)
            .await
            .unwrap();
        assert_eq!(member.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_list_tags_and_templates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/boards/1/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["backend", "ui"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/boards/1/templates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 3, "name": "Bug report", "title": "Bug: ", "priority": "HIGH",
                 "subtasks": ["Reproduce", "Fix", "Verify"]}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.list_tags(1).await.unwrap(), vec!["backend", "ui"]);
        let templates = client.list_templates(1).await.unwrap();
        assert_eq!(templates[0].subtasks.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_board_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/boards/4"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.delete_board(4).await.unwrap();
    }
}
