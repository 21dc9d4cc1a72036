//! Board administration: members and the custom status / type lists

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::i18n::Msg;
use crate::models::{BoardMember, BoardStatus, LookupEntry, NewLookup, NewMember, Role, TaskType};
use ratatui::widgets::ListState;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsTab {
    Members,
    Statuses,
    Types,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [
        SettingsTab::Members,
        SettingsTab::Statuses,
        SettingsTab::Types,
    ];

    pub fn label(self) -> Msg {
        match self {
            SettingsTab::Members => Msg::Members,
            SettingsTab::Statuses => Msg::Statuses,
            SettingsTab::Types => Msg::Types,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SettingsTab::Members => 0,
            SettingsTab::Statuses => 1,
            SettingsTab::Types => 2,
        }
    }

    fn next(self) -> SettingsTab {
        SettingsTab::ALL[(self.index() + 1) % SettingsTab::ALL.len()]
    }
}

/// Roles an owner or admin can hand out, in cycling order
pub fn next_role(role: Role) -> Role {
    match role {
        Role::Viewer => Role::Member,
        Role::Member => Role::Admin,
        Role::Admin | Role::Owner => Role::Viewer,
    }
}

pub struct BoardSettings {
    pub board_id: u64,
    pub tab: SettingsTab,
    pub members: Vec<BoardMember>,
    pub statuses: Vec<BoardStatus>,
    pub types: Vec<TaskType>,
    pub list: ListState,
}

fn sorted(mut entries: Vec<LookupEntry>) -> Vec<LookupEntry> {
    entries.sort_by_key(|e| e.position);
    entries
}

impl BoardSettings {
    pub async fn load(api: &ApiClient, board_id: u64) -> Result<Self> {
        let members = api.list_members(board_id).await?;
        let statuses = sorted(api.list_statuses(board_id).await?);
        let types = sorted(api.list_types(board_id).await?);
        let mut settings = Self {
            board_id,
            tab: SettingsTab::Members,
            members,
            statuses,
            types,
            list: ListState::default(),
        };
        settings.clamp();
        Ok(settings)
    }

    pub fn len(&self) -> usize {
        match self.tab {
            SettingsTab::Members => self.members.len(),
            SettingsTab::Statuses => self.statuses.len(),
            SettingsTab::Types => self.types.len(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list.selected().filter(|i| *i < self.len())
    }

    fn clamp(&mut self) {
        let len = self.len();
        if len == 0 {
            self.list.select(None);
        } else {
            let i = self.list.selected().unwrap_or(0).min(len - 1);
            self.list.select(Some(i));
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.list = ListState::default();
        self.clamp();
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected() {
            if i + 1 < self.len() {
                self.list.select(Some(i + 1));
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected() {
            self.list.select(Some(i.saturating_sub(1)));
        }
    }

    /// Id and display name of the selected row
    pub fn selected_entry(&self) -> Option<(u64, String)> {
        let i = self.selected()?;
        Some(match self.tab {
            SettingsTab::Members => (self.members[i].user_id, self.members[i].username.clone()),
            SettingsTab::Statuses => (self.statuses[i].id, self.statuses[i].name.clone()),
            SettingsTab::Types => (self.types[i].id, self.types[i].name.clone()),
        })
    }

    fn lookups_mut(&mut self) -> Option<&mut Vec<LookupEntry>> {
        match self.tab {
            SettingsTab::Members => None,
            SettingsTab::Statuses => Some(&mut self.statuses),
            SettingsTab::Types => Some(&mut self.types),
        }
    }

    /// Invites a user as member, or appends a status / type named `name`
    pub async fn add(&mut self, api: &ApiClient, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("name cannot be empty"));
        }
        match self.tab {
            SettingsTab::Members => {
                let member = NewMember {
                    username: name.to_string(),
                    role: Role::Member,
                };
                let member = api.add_member(self.board_id, &member).await?;
                info!(board_id = self.board_id, user_id = member.user_id, "member added");
                self.members.push(member);
            }
            SettingsTab::Statuses => {
                let lookup = NewLookup {
                    name: name.to_string(),
                    color: None,
                    position: Some(self.statuses.len() as i64),
                };
                let status = api.create_status(self.board_id, &lookup).await?;
                self.statuses.push(status);
            }
            SettingsTab::Types => {
                let lookup = NewLookup {
                    name: name.to_string(),
                    color: None,
                    position: Some(self.types.len() as i64),
                };
                let task_type = api.create_type(self.board_id, &lookup).await?;
                self.types.push(task_type);
            }
        }
        self.list.select(Some(self.len() - 1));
        Ok(())
    }

    /// Renames a status or type, keeping its color and position
    pub async fn rename(&mut self, api: &ApiClient, id: u64, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("name cannot be empty"));
        }
        let tab = self.tab;
        let board_id = self.board_id;
        let entries = self
            .lookups_mut()
            .ok_or_else(|| AppError::invalid_input("members cannot be renamed"))?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found("lookup", id))?;
        let lookup = NewLookup {
            name: name.to_string(),
            color: entry.color.clone(),
            position: Some(entry.position),
        };
        let saved = if tab == SettingsTab::Statuses {
            api.update_status(board_id, id, &lookup).await?
        } else {
            api.update_type(board_id, id, &lookup).await?
        };
        *entry = saved;
        Ok(())
    }

    /// Moves a member to the next assignable role; the owner is left alone
    pub async fn cycle_role(&mut self, api: &ApiClient, user_id: u64) -> Result<Role> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| AppError::not_found("member", user_id))?;
        if member.role == Role::Owner {
            return Err(AppError::invalid_input("the owner's role cannot change"));
        }
        let role = next_role(member.role);
        let saved = api
            .update_member_role(self.board_id, user_id, role)
            .await?;
        info!(board_id = self.board_id, user_id, %role, "member role changed");
        *member = saved;
        Ok(member.role)
    }

    pub async fn remove_member(&mut self, api: &ApiClient, user_id: u64) -> Result<()> {
        api.remove_member(self.board_id, user_id).await?;
        self.members.retain(|m| m.user_id != user_id);
        self.clamp();
        Ok(())
    }

    pub async fn delete_status(&mut self, api: &ApiClient, status_id: u64) -> Result<()> {
        api.delete_status(self.board_id, status_id).await?;
        self.statuses.retain(|s| s.id != status_id);
        self.clamp();
        Ok(())
    }

    pub async fn delete_type(&mut self, api: &ApiClient, type_id: u64) -> Result<()> {
        api.delete_type(self.board_id, type_id).await?;
        self.types.retain(|t| t.id != type_id);
        self.clamp();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_lists(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/boards/1/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"userId": 1, "username": "own", "role": "OWNER"},
                {"userId": 3, "username": "max", "role": "MEMBER"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/boards/1/statuses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "name": "Blocked", "position": 1},
                {"id": 1, "name": "Open", "position": 0, "color": "#00ff00"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/boards/1/types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }

    #[test]
    fn test_role_cycle_skips_owner() {
        assert_eq!(next_role(Role::Viewer), Role::Member);
        assert_eq!(next_role(Role::Member), Role::Admin);
        assert_eq!(next_role(Role::Admin), Role::Viewer);
    }

    #[tokio::test]
    async fn test_load_sorts_lookups_and_selects_first_row() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        assert_eq!(settings.selected(), Some(0));
        assert_eq!(settings.statuses[0].name, "Open");

        settings.next_tab();
        settings.next_tab();
        assert_eq!(settings.tab, SettingsTab::Types);
        assert_eq!(settings.selected(), None);
    }

    #[tokio::test]
    async fn test_rename_status_keeps_color_and_position() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/statuses/1"))
            .and(body_json(json!({"name": "Ready", "color": "#00ff00", "position": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 1, "name": "Ready", "position": 0, "color": "#00ff00"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        settings.next_tab();
        settings.rename(&api, 1, " Ready ").await.unwrap();
        assert_eq!(settings.statuses[0].name, "Ready");
    }

    #[tokio::test]
    async fn test_add_type_appends_at_end() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/boards/1/types"))
            .and(body_json(json!({"name": "Chore", "position": 0})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 7, "name": "Chore", "position": 0, "isCustom": true}
            )))
            .expect(1)
            .mount(&server)
            .await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        settings.tab = SettingsTab::Types;
        settings.add(&api, "Chore").await.unwrap();
        assert_eq!(settings.selected_entry(), Some((7, "Chore".to_string())));
        assert!(settings.add(&api, "  ").await.is_err());
    }

    #[tokio::test]
    async fn test_member_role_cycles_and_owner_is_fixed() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("PUT"))
            .and(path("/api/boards/1/members/3"))
            .and(body_json(json!({"role": "ADMIN"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"userId": 3, "username": "max", "role": "ADMIN"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        assert_eq!(settings.cycle_role(&api, 3).await.unwrap(), Role::Admin);
        assert!(matches!(
            settings.cycle_role(&api, 1).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_add_and_remove_member() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/boards/1/members"))
            .and(body_json(json!({"username": "kim", "role": "MEMBER"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"userId": 4, "username": "kim", "role": "MEMBER"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/boards/1/members/4"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        settings.add(&api, "kim").await.unwrap();
        assert_eq!(settings.members.len(), 3);
        assert_eq!(settings.selected(), Some(2));

        settings.remove_member(&api, 4).await.unwrap();
        assert_eq!(settings.members.len(), 2);
        assert_eq!(settings.selected(), Some(1));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_the_status() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/api/boards/1/statuses/2"))
            .respond_with(ResponseTemplate::new(409).set_body_string("status in use"))
            .mount(&server)
            .await;
        let api = client_for(&server).await;

        let mut settings = BoardSettings::load(&api, 1).await.unwrap();
        let err = settings.delete_status(&api, 2).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(settings.statuses.len(), 2);
    }
}
