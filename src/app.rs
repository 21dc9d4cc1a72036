use crate::api::ApiClient;
use crate::board_state::{self, BoardState, Direction};
use crate::dialog::{ConfirmDialog, DialogOutcome, PendingAction};
use crate::error::{AppError, Result};
use crate::filter::{self, SortKey, TaskFilter, UnknownName};
use crate::i18n::{tr, trf, Locale, Msg};
use crate::models::{
    Board, BoardUpdate, ColumnUpdate, LookupEntry, NewBoard, NewColumn, NewSubtask, NewTemplate,
    Task, TaskTemplate, TaskUpdate, User,
};
use crate::parser::parse_task_input;
use crate::permissions::{Permission, RoleContext};
use crate::settings::{BoardSettings, SettingsTab};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Boards,
    Board,
    Task,
    Templates,
    Settings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    NewBoard,
    NewColumn,
    RenameColumn { column_id: u64 },
    NewTask { column_id: u64 },
    EditTitle,
    EditDescription,
    Assignee,
    EndDate,
    Tag,
    NewSubtask,
    NewComment,
    EditComment { comment_id: u64 },
    UploadPath,
    TemplateName,
    RenameTemplate { template_id: u64 },
    Filter,
    RenameBoard,
    NewMember,
    NewStatus,
    NewType,
    RenameLookup { id: u64 },
}

impl Prompt {
    pub fn label(&self) -> Msg {
        match self {
            Prompt::NewBoard => Msg::NewBoard,
            Prompt::NewColumn => Msg::NewColumn,
            Prompt::RenameColumn { .. } | Prompt::EditTitle => Msg::EditTitle,
            Prompt::NewTask { .. } => Msg::NewTask,
            Prompt::EditDescription => Msg::Description,
            Prompt::Assignee => Msg::Assignee,
            Prompt::EndDate => Msg::Dates,
            Prompt::Tag => Msg::NewTag,
            Prompt::NewSubtask => Msg::NewSubtask,
            Prompt::NewComment => Msg::NewComment,
            Prompt::EditComment { .. } => Msg::Edit,
            Prompt::UploadPath => Msg::FilePath,
            Prompt::TemplateName => Msg::TemplateName,
            Prompt::RenameTemplate { .. } | Prompt::RenameLookup { .. } => Msg::Rename,
            Prompt::Filter => Msg::Search,
            Prompt::RenameBoard => Msg::RenameBoard,
            Prompt::NewMember => Msg::NewMember,
            Prompt::NewStatus => Msg::NewStatus,
            Prompt::NewType => Msg::NewType,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(Prompt),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskTab {
    Subtasks,
    Comments,
    History,
    Attachments,
}

impl TaskTab {
    pub const ALL: [TaskTab; 4] = [
        TaskTab::Subtasks,
        TaskTab::Comments,
        TaskTab::History,
        TaskTab::Attachments,
    ];

    pub fn index(self) -> usize {
        TaskTab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn label(self) -> Msg {
        match self {
            TaskTab::Subtasks => Msg::Subtasks,
            TaskTab::Comments => Msg::Comments,
            TaskTab::History => Msg::History,
            TaskTab::Attachments => Msg::Attachments,
        }
    }

    fn next(self) -> TaskTab {
        TaskTab::ALL[(self.index() + 1) % TaskTab::ALL.len()]
    }

    fn previous(self) -> TaskTab {
        TaskTab::ALL[(self.index() + TaskTab::ALL.len() - 1) % TaskTab::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cycle {
    Priority,
    Status,
    Type,
}

pub struct App {
    pub locale: Locale,
    pub user: User,
    pub view: View,
    pub input_mode: InputMode,
    pub input: String,
    pub boards: Vec<Board>,
    pub board_list: ListState,
    pub board: Option<BoardState>,
    pub role: Option<RoleContext>,
    pub tags: Vec<String>,
    pub selected_column: usize,
    pub selected_task: usize,
    pub filter: TaskFilter,
    pub sort: SortKey,
    /// Read-only overview with tasks grouped by status instead of column
    pub grouped: bool,
    pub task: Option<Task>,
    pub tab: TaskTab,
    pub tab_list: ListState,
    pub templates: Vec<TaskTemplate>,
    pub template_list: ListState,
    pub settings: Option<BoardSettings>,
    pub confirm: Option<ConfirmDialog>,
    pub status: Option<String>,
    pub download_dir: PathBuf,
}

/// Next entry of a board lookup list; wraps to "none" after the last one
fn next_lookup(entries: &[LookupEntry], current: Option<u64>) -> Option<u64> {
    match current.and_then(|id| entries.iter().position(|e| e.id == id)) {
        None => entries.first().map(|e| e.id),
        Some(i) => entries.get(i + 1).map(|e| e.id),
    }
}

fn cycle_update(board: &Board, task: &Task, kind: Cycle) -> Option<TaskUpdate> {
    let update = match kind {
        Cycle::Priority => TaskUpdate {
            priority: Some(task.priority.cycle()),
            ..TaskUpdate::default()
        },
        Cycle::Status => {
            let next = next_lookup(&board.task_statuses, task.status_id);
            if next == task.status_id {
                return None;
            }
            TaskUpdate {
                status_id: Some(next),
                ..TaskUpdate::default()
            }
        }
        Cycle::Type => {
            let next = next_lookup(&board.task_types, task.type_id);
            if next == task.type_id {
                return None;
            }
            TaskUpdate {
                type_id: Some(next),
                ..TaskUpdate::default()
            }
        }
    };
    Some(update)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Loads a task with everything the detail view shows
async fn load_task_detail(api: &ApiClient, task_id: u64) -> Result<Task> {
    let mut task = api.get_task(task_id).await?;
    task.subtasks = api.list_subtasks(task_id).await?;
    task.comments = api.list_comments(task_id).await?;
    task.attachments = api.list_attachments(task_id).await?;
    task.history = api.list_history(task_id).await?;
    Ok(task)
}

/// Last path component of a server-supplied file name
fn safe_file_name(name: &str) -> Option<&OsStr> {
    let file_name = Path::new(name.trim()).file_name()?;
    if file_name == "." || file_name == ".." {
        return None;
    }
    Some(file_name)
}

fn select_clamped(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        let i = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(i));
    }
}

impl App {
    pub fn new(user: User, locale: Locale, download_dir: PathBuf) -> App {
        App {
            locale,
            user,
            view: View::Boards,
            input_mode: InputMode::Normal,
            input: String::new(),
            boards: Vec::new(),
            board_list: ListState::default(),
            board: None,
            role: None,
            tags: Vec::new(),
            selected_column: 0,
            selected_task: 0,
            filter: TaskFilter::default(),
            sort: SortKey::default(),
            grouped: false,
            task: None,
            tab: TaskTab::Subtasks,
            tab_list: ListState::default(),
            templates: Vec::new(),
            template_list: ListState::default(),
            settings: None,
            confirm: None,
            status: None,
            download_dir,
        }
    }

    pub fn t(&self, msg: Msg) -> &'static str {
        tr(self.locale, msg)
    }

    pub fn tf(&self, msg: Msg, args: &[&str]) -> String {
        trf(self.locale, msg, args)
    }

    fn report(&mut self, context: Msg, err: AppError) {
        error!("{}: {}", tr(Locale::En, context), err);
        if err.status() == Some(403) {
            self.notify(self.t(Msg::PermissionDenied));
        } else {
            self.status = Some(format!("{}: {}", self.t(context), err));
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Permission gate; sets the status line when the action is blocked
    fn allowed(&mut self, permission: Permission) -> bool {
        let result = match &self.role {
            Some(role) => role.require(permission),
            None => Err(AppError::PermissionDenied(permission)),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("action blocked: {}", err);
                self.notify(self.t(Msg::PermissionDenied));
                false
            }
        }
    }

    fn start_prompt(&mut self, prompt: Prompt, initial: &str) {
        self.input = initial.to_string();
        self.input_mode = InputMode::Editing(prompt);
    }

    // Board list

    pub async fn refresh_boards(&mut self, api: &ApiClient) -> Result<()> {
        self.boards = api.list_boards().await?;
        select_clamped(&mut self.board_list, self.boards.len());
        Ok(())
    }

    pub fn next_board(&mut self) {
        if self.boards.is_empty() {
            return;
        }
        let i = match self.board_list.selected() {
            Some(i) if i + 1 < self.boards.len() => i + 1,
            _ => 0,
        };
        self.board_list.select(Some(i));
    }

    pub fn previous_board(&mut self) {
        if self.boards.is_empty() {
            return;
        }
        let i = match self.board_list.selected() {
            Some(0) | None => self.boards.len() - 1,
            Some(i) => i - 1,
        };
        self.board_list.select(Some(i));
    }

    pub async fn open_board(&mut self, api: &ApiClient, board_id: u64) -> Result<()> {
        let board = api.get_board(board_id).await?;
        let members = match api.list_members(board_id).await {
            Ok(members) => members,
            Err(err) => {
                warn!(board_id, "could not load members: {}", err);
                Vec::new()
            }
        };
        self.role = Some(RoleContext::new(&board, &members, self.user.clone()));
        self.tags = api.list_tags(board_id).await.unwrap_or_default();
        info!(board_id, role = ?self.role.as_ref().and_then(|r| r.role), "board opened");

        self.board = Some(BoardState::new(board));
        self.view = View::Board;
        self.selected_column = 0;
        self.selected_task = 0;
        self.filter = TaskFilter::default();
        self.grouped = false;
        Ok(())
    }

    async fn refresh_board(&mut self, api: &ApiClient) {
        let Some(board_id) = self.board.as_ref().map(|s| s.id()) else {
            return;
        };
        match api.get_board(board_id).await {
            Ok(board) => {
                self.board = Some(BoardState::new(board));
                self.clamp_selection();
            }
            Err(err) => self.report(Msg::RefreshBoardFailed, err),
        }
    }

    // Board view selection

    pub fn visible_tasks(&self, column: usize) -> Vec<&Task> {
        self.board
            .as_ref()
            .and_then(|s| s.board.columns.get(column))
            .map(|c| filter::visible_tasks(&c.tasks, &self.filter, self.sort))
            .unwrap_or_default()
    }

    pub fn selected_task_id(&self) -> Option<u64> {
        self.visible_tasks(self.selected_column)
            .get(self.selected_task)
            .map(|t| t.id)
    }

    fn column_count(&self) -> usize {
        self.board.as_ref().map_or(0, |s| s.board.columns.len())
    }

    fn clamp_selection(&mut self) {
        let columns = self.column_count();
        self.selected_column = self.selected_column.min(columns.saturating_sub(1));
        let tasks = self.visible_tasks(self.selected_column).len();
        self.selected_task = self.selected_task.min(tasks.saturating_sub(1));
    }

    fn select_task(&mut self, task_id: u64) {
        let Some(state) = &self.board else {
            return;
        };
        if let Some((column, _)) = state.board.find_task(task_id) {
            let index = self
                .visible_tasks(column)
                .iter()
                .position(|t| t.id == task_id);
            self.selected_column = column;
            if let Some(index) = index {
                self.selected_task = index;
            }
        }
        self.clamp_selection();
    }

    fn selected_column_id(&self) -> Option<u64> {
        self.board
            .as_ref()
            .and_then(|s| s.board.columns.get(self.selected_column))
            .map(|c| c.id)
    }

    // Board operations

    async fn move_selected_column(&mut self, api: &ApiClient, right: bool) {
        if !self.allowed(Permission::ManageColumns) {
            return;
        }
        let from = self.selected_column;
        let to = if right {
            from + 1
        } else if from > 0 {
            from - 1
        } else {
            return;
        };
        if to >= self.column_count() {
            return;
        }
        let result = match self.board.as_mut() {
            Some(state) => state.move_column(api, from, to).await,
            None => return,
        };
        match result {
            Ok(()) => self.selected_column = to,
            Err(err) => self.report(Msg::MoveColumnFailed, err),
        }
    }

    async fn shift_selected_task(&mut self, api: &ApiClient, direction: Direction) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        if !self.allowed(Permission::MoveTask) {
            return;
        }
        let result = match self.board.as_mut() {
            Some(state) => state.shift_task(api, task_id, direction).await,
            None => return,
        };
        match result {
            Ok(_) => self.select_task(task_id),
            Err(err) => self.report(Msg::MoveTaskFailed, err),
        }
    }

    async fn cycle_task_field(&mut self, api: &ApiClient, task_id: u64, kind: Cycle) {
        let update = match &self.board {
            Some(state) => match state.board.task(task_id) {
                Some(task) => cycle_update(&state.board, task, kind),
                None => None,
            },
            None => None,
        };
        if let Some(update) = update {
            self.apply_update(api, task_id, update).await;
        }
    }

    /// Sends a task update and keeps the detail view in sync with the board
    async fn apply_update(&mut self, api: &ApiClient, task_id: u64, update: TaskUpdate) {
        if !self.allowed(Permission::EditTask) {
            return;
        }
        let (result, fresh) = match self.board.as_mut() {
            Some(state) => {
                let result = state.update_task(api, task_id, &update).await;
                (result, state.board.task(task_id).cloned())
            }
            None => return,
        };
        if let Err(err) = result {
            self.report(Msg::UpdateFailed, err);
        }

        let detail_open = self.task.as_ref().is_some_and(|t| t.id == task_id);
        if let (true, Some(mut fresh)) = (detail_open, fresh) {
            fresh.subtasks.clear();
            fresh.comments.clear();
            fresh.attachments.clear();
            fresh.history.clear();
            match api.list_history(task_id).await {
                Ok(history) => fresh.history = history,
                Err(err) => self.report(Msg::LoadHistoryFailed, err),
            }
            if let Some(open) = self.task.as_mut() {
                open.merge(fresh);
            }
        }
    }

    fn sync_board_task(&mut self) {
        if let (Some(state), Some(task)) = (self.board.as_mut(), self.task.as_ref()) {
            state.replace_task(task);
        }
    }

    async fn open_task(&mut self, api: &ApiClient) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        match load_task_detail(api, task_id).await {
            Ok(mut task) => {
                if let Some(listed) = self.board.as_ref().and_then(|s| s.board.task(task_id)) {
                    if task.column_id == 0 {
                        task.column_id = listed.column_id;
                    }
                }
                self.task = Some(task);
                self.view = View::Task;
                self.tab = TaskTab::Subtasks;
                self.tab_list = ListState::default();
                self.clamp_tab_selection();
            }
            Err(err) => self.report(Msg::LoadTaskFailed, err),
        }
    }

    async fn open_templates(&mut self, api: &ApiClient) {
        let Some(board_id) = self.board.as_ref().map(|s| s.id()) else {
            return;
        };
        match api.list_templates(board_id).await {
            Ok(templates) => {
                self.templates = templates;
                select_clamped(&mut self.template_list, self.templates.len());
                self.view = View::Templates;
            }
            Err(err) => self.report(Msg::LoadTemplatesFailed, err),
        }
    }

    async fn open_settings(&mut self, api: &ApiClient) {
        let Some(board_id) = self.board.as_ref().map(|s| s.id()) else {
            return;
        };
        match BoardSettings::load(api, board_id).await {
            Ok(settings) => {
                self.settings = Some(settings);
                self.view = View::Settings;
            }
            Err(err) => self.report(Msg::LoadSettingsFailed, err),
        }
    }

    /// Pushes changed lookups and members back into the open board and role
    fn sync_settings(&mut self) {
        let (Some(settings), Some(state)) = (self.settings.as_ref(), self.board.as_mut()) else {
            return;
        };
        state.board.task_statuses = settings.statuses.clone();
        state.board.task_types = settings.types.clone();
        self.role = Some(RoleContext::new(
            &state.board,
            &settings.members,
            self.user.clone(),
        ));
    }

    fn settings_permission(&self) -> Permission {
        match self.settings.as_ref().map(|s| s.tab) {
            Some(SettingsTab::Members) | None => Permission::ManageMembers,
            Some(_) => Permission::ManageStatuses,
        }
    }

    // Task detail

    pub fn tab_len(&self) -> usize {
        self.task.as_ref().map_or(0, |task| match self.tab {
            TaskTab::Subtasks => task.subtasks.len(),
            TaskTab::Comments => task.comments.len(),
            TaskTab::History => task.history.len(),
            TaskTab::Attachments => task.attachments.len(),
        })
    }

    fn clamp_tab_selection(&mut self) {
        let len = self.tab_len();
        select_clamped(&mut self.tab_list, len);
    }

    fn tab_selected(&self) -> Option<usize> {
        self.tab_list.selected().filter(|i| *i < self.tab_len())
    }

    fn move_tab_selection(&mut self, down: bool) {
        let len = self.tab_len();
        if len == 0 {
            return;
        }
        let i = match (self.tab_list.selected(), down) {
            (Some(i), true) if i + 1 < len => i + 1,
            (Some(_), true) | (None, _) => 0,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        };
        self.tab_list.select(Some(i));
    }

    fn selected_subtask_id(&self) -> Option<u64> {
        let task = self.task.as_ref()?;
        if self.tab != TaskTab::Subtasks {
            return None;
        }
        self.tab_selected()
            .and_then(|i| task.subtasks.get(i))
            .map(|s| s.id)
    }

    async fn toggle_selected_subtask(&mut self, api: &ApiClient) {
        let Some(subtask_id) = self.selected_subtask_id() else {
            return;
        };
        if !self.allowed(Permission::EditTask) {
            return;
        }
        let result = match self.task.as_mut() {
            Some(task) => board_state::toggle_subtask(api, task, subtask_id).await,
            None => return,
        };
        match result {
            Ok(_) => self.sync_board_task(),
            Err(err) => self.report(Msg::UpdateSubtaskFailed, err),
        }
    }

    async fn shift_selected_subtask(&mut self, api: &ApiClient, up: bool) {
        let Some(subtask_id) = self.selected_subtask_id() else {
            return;
        };
        if !self.allowed(Permission::EditTask) {
            return;
        }
        let result = match self.task.as_mut() {
            Some(task) => board_state::shift_subtask(api, task, subtask_id, up).await,
            None => return,
        };
        match result {
            Ok(true) => {
                self.move_tab_selection(!up);
                self.sync_board_task();
            }
            Ok(false) => {}
            Err(err) => self.report(Msg::ReorderSubtasksFailed, err),
        }
    }

    /// Opens a confirmation for deleting the selected row of the current tab
    fn confirm_delete_tab_item(&mut self) {
        let Some(task) = self.task.as_ref() else {
            return;
        };
        let Some(index) = self.tab_selected() else {
            return;
        };
        let task_id = task.id;
        let (action, subject, permission) = match self.tab {
            TaskTab::Subtasks => {
                let subtask = &task.subtasks[index];
                (
                    PendingAction::DeleteSubtask {
                        task_id,
                        subtask_id: subtask.id,
                    },
                    subtask.title.clone(),
                    Some(Permission::EditTask),
                )
            }
            TaskTab::Comments => {
                let comment = &task.comments[index];
                let own = self
                    .role
                    .as_ref()
                    .is_some_and(|r| r.can_modify_comment(&comment.author));
                (
                    PendingAction::DeleteComment {
                        task_id,
                        comment_id: comment.id,
                    },
                    comment.content.chars().take(30).collect(),
                    if own {
                        None
                    } else {
                        Some(Permission::ModerateComments)
                    },
                )
            }
            TaskTab::Attachments => {
                let attachment = &task.attachments[index];
                (
                    PendingAction::DeleteAttachment {
                        task_id,
                        attachment_id: attachment.id,
                    },
                    attachment.file_name.clone(),
                    Some(Permission::ManageAttachments),
                )
            }
            TaskTab::History => return,
        };
        if let Some(permission) = permission {
            if !self.allowed(permission) {
                return;
            }
        }
        self.confirm = Some(ConfirmDialog::new(self.locale, action, &subject));
    }

    async fn download_selected_attachment(&mut self, api: &ApiClient) {
        if self.tab != TaskTab::Attachments {
            return;
        }
        let Some(index) = self.tab_selected() else {
            return;
        };
        let Some((task_id, attachment)) = self
            .task
            .as_ref()
            .map(|t| (t.id, t.attachments[index].clone()))
        else {
            return;
        };
        let Some(file_name) = safe_file_name(&attachment.file_name) else {
            warn!(attachment_id = attachment.id, "unsafe attachment name");
            self.notify(self.tf(Msg::InvalidFileName, &[&attachment.file_name]));
            return;
        };
        let target = self.download_dir.join(file_name);
        let result = async {
            let bytes = api.download_attachment(task_id, attachment.id).await?;
            tokio::fs::create_dir_all(&self.download_dir).await?;
            tokio::fs::write(&target, bytes).await?;
            Ok::<_, AppError>(())
        }
        .await;
        match result {
            Ok(()) => self.notify(self.tf(Msg::Saved, &[&target.display().to_string()])),
            Err(err) => self.report(Msg::DownloadFailed, err),
        }
    }

    // Input handling

    pub async fn handle_input(&mut self, key: KeyEvent, api: &ApiClient) -> bool {
        if let Some(dialog) = self.confirm.take() {
            match dialog.handle_key(key.code) {
                DialogOutcome::Confirmed(action) => self.perform(api, action).await,
                DialogOutcome::Cancelled => {}
                DialogOutcome::Open => self.confirm = Some(dialog),
            }
            return false;
        }

        if let InputMode::Editing(prompt) = self.input_mode.clone() {
            self.handle_prompt_key(key, prompt, api).await;
            return false;
        }

        self.status = None;
        match self.view {
            View::Boards => self.handle_boards_key(key, api).await,
            View::Board => self.handle_board_key(key, api).await,
            View::Task => {
                self.handle_task_key(key, api).await;
                false
            }
            View::Templates => {
                self.handle_templates_key(key, api).await;
                false
            }
            View::Settings => {
                self.handle_settings_key(key, api).await;
                false
            }
        }
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent, prompt: Prompt, api: &ApiClient) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(api, prompt).await,
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c)
            }
            _ => {}
        }
    }

    async fn handle_boards_key(&mut self, key: KeyEvent, api: &ApiClient) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => self.next_board(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_board(),
            KeyCode::Char('a') => self.start_prompt(Prompt::NewBoard, ""),
            KeyCode::Char('r') => {
                if let Err(err) = self.refresh_boards(api).await {
                    self.report(Msg::LoadBoardsFailed, err);
                }
            }
            KeyCode::Char('x') => {
                if let Some(board) = self.board_list.selected().and_then(|i| self.boards.get(i)) {
                    let owner = board.owner_id == Some(self.user.id);
                    let dialog = ConfirmDialog::new(
                        self.locale,
                        PendingAction::DeleteBoard { board_id: board.id },
                        &board.name,
                    );
                    if owner {
                        self.confirm = Some(dialog);
                    } else {
                        self.notify(self.t(Msg::PermissionDenied));
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(board_id) = self
                    .board_list
                    .selected()
                    .and_then(|i| self.boards.get(i))
                    .map(|b| b.id)
                {
                    if let Err(err) = self.open_board(api, board_id).await {
                        self.report(Msg::OpenBoardFailed, err);
                    }
                }
            }
            _ => {}
        }
        false
    }

    async fn handle_board_key(&mut self, key: KeyEvent, api: &ApiClient) -> bool {
        if self.grouped {
            match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('G') | KeyCode::Esc => self.grouped = false,
                _ => {}
            }
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.filter.is_active() {
                    self.filter = TaskFilter::default();
                    self.clamp_selection();
                } else {
                    self.board = None;
                    self.role = None;
                    self.view = View::Boards;
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
                self.selected_task = 0;
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.selected_column + 1 < self.column_count() {
                    self.selected_column += 1;
                    self.selected_task = 0;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_task + 1 < self.visible_tasks(self.selected_column).len() {
                    self.selected_task += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Char('H') => self.shift_selected_task(api, Direction::Left).await,
            KeyCode::Char('L') => self.shift_selected_task(api, Direction::Right).await,
            KeyCode::Char('J') => self.shift_selected_task(api, Direction::Down).await,
            KeyCode::Char('K') => self.shift_selected_task(api, Direction::Up).await,
            KeyCode::Char('<') => self.move_selected_column(api, false).await,
            KeyCode::Char('>') => self.move_selected_column(api, true).await,
            KeyCode::Enter => self.open_task(api).await,
            KeyCode::Char('a') => {
                if let Some(column_id) = self.selected_column_id() {
                    if self.allowed(Permission::CreateTask) {
                        self.start_prompt(Prompt::NewTask { column_id }, "");
                    }
                }
            }
            KeyCode::Char('c') => {
                if self.allowed(Permission::ManageColumns) {
                    self.start_prompt(Prompt::NewColumn, "");
                }
            }
            KeyCode::Char('R') => {
                let column = self
                    .board
                    .as_ref()
                    .and_then(|s| s.board.columns.get(self.selected_column))
                    .map(|c| (c.id, c.name.clone()));
                if let Some((column_id, name)) = column {
                    if self.allowed(Permission::ManageColumns) {
                        self.start_prompt(Prompt::RenameColumn { column_id }, &name);
                    }
                }
            }
            KeyCode::Char('X') => {
                let column = self
                    .board
                    .as_ref()
                    .and_then(|s| s.board.columns.get(self.selected_column))
                    .map(|c| (c.id, c.name.clone()));
                if let Some((column_id, name)) = column {
                    if self.allowed(Permission::ManageColumns) {
                        self.confirm = Some(ConfirmDialog::new(
                            self.locale,
                            PendingAction::DeleteColumn { column_id },
                            &name,
                        ));
                    }
                }
            }
            KeyCode::Char('x') => {
                let task = self.selected_task_id().and_then(|id| {
                    self.board
                        .as_ref()
                        .and_then(|s| s.board.task(id))
                        .map(|t| (t.id, t.title.clone()))
                });
                if let Some((task_id, title)) = task {
                    if self.allowed(Permission::DeleteTask) {
                        self.confirm = Some(ConfirmDialog::new(
                            self.locale,
                            PendingAction::DeleteTask { task_id },
                            &title,
                        ));
                    }
                }
            }
            KeyCode::Char('p') | KeyCode::Char('s') | KeyCode::Char('t') => {
                let kind = match key.code {
                    KeyCode::Char('p') => Cycle::Priority,
                    KeyCode::Char('s') => Cycle::Status,
                    _ => Cycle::Type,
                };
                if let Some(task_id) = self.selected_task_id() {
                    self.cycle_task_field(api, task_id, kind).await;
                    self.select_task(task_id);
                }
            }
            KeyCode::Char('/') => {
                let current = self.filter.search.clone();
                self.start_prompt(Prompt::Filter, &current);
            }
            KeyCode::Char('o') => {
                self.sort = self.sort.next();
                self.clamp_selection();
                self.notify(format!("{}: {}", self.t(Msg::Sort), self.t(self.sort.label())));
            }
            KeyCode::Char('T') => self.open_templates(api).await,
            KeyCode::Char('M') => self.open_settings(api).await,
            KeyCode::Char('G') => self.grouped = true,
            KeyCode::Char('r') => self.refresh_board(api).await,
            _ => {}
        }
        false
    }

    async fn handle_task_key(&mut self, key: KeyEvent, api: &ApiClient) {
        let Some(task_id) = self.task.as_ref().map(|t| t.id) else {
            self.view = View::Board;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.sync_board_task();
                self.task = None;
                self.view = View::Board;
                self.select_task(task_id);
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                self.tab_list = ListState::default();
                self.clamp_tab_selection();
            }
            KeyCode::BackTab => {
                self.tab = self.tab.previous();
                self.tab_list = ListState::default();
                self.clamp_tab_selection();
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_tab_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_tab_selection(false),
            KeyCode::Char('J') => self.shift_selected_subtask(api, false).await,
            KeyCode::Char('K') => self.shift_selected_subtask(api, true).await,
            KeyCode::Char(' ') => self.toggle_selected_subtask(api).await,
            KeyCode::Char('p') => self.cycle_task_field(api, task_id, Cycle::Priority).await,
            KeyCode::Char('s') => self.cycle_task_field(api, task_id, Cycle::Status).await,
            KeyCode::Char('t') => self.cycle_task_field(api, task_id, Cycle::Type).await,
            KeyCode::Char('e') => {
                let title = self.task.as_ref().map(|t| t.title.clone()).unwrap_or_default();
                if self.allowed(Permission::EditTask) {
                    self.start_prompt(Prompt::EditTitle, &title);
                }
            }
            KeyCode::Char('d') => {
                if self.allowed(Permission::EditTask) {
                    self.start_prompt(Prompt::EditDescription, "");
                }
            }
            KeyCode::Char('A') => {
                let assignee = self
                    .task
                    .as_ref()
                    .and_then(|t| t.assignee.clone())
                    .unwrap_or_default();
                if self.allowed(Permission::EditTask) {
                    self.start_prompt(Prompt::Assignee, &assignee);
                }
            }
            KeyCode::Char('D') => {
                let end = self
                    .task
                    .as_ref()
                    .and_then(|t| t.end_date)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                if self.allowed(Permission::EditTask) {
                    self.start_prompt(Prompt::EndDate, &end);
                }
            }
            KeyCode::Char('g') => {
                if self.allowed(Permission::EditTask) {
                    self.start_prompt(Prompt::Tag, "");
                }
            }
            KeyCode::Char('S') => {
                if self.allowed(Permission::ManageTemplates) {
                    let name = self.task.as_ref().map(|t| t.title.clone()).unwrap_or_default();
                    self.start_prompt(Prompt::TemplateName, &name);
                }
            }
            KeyCode::Char('a') => match self.tab {
                TaskTab::Subtasks => {
                    if self.allowed(Permission::EditTask) {
                        self.start_prompt(Prompt::NewSubtask, "");
                    }
                }
                TaskTab::Comments => {
                    if self.allowed(Permission::Comment) {
                        self.start_prompt(Prompt::NewComment, "");
                    }
                }
                TaskTab::Attachments => {
                    if self.allowed(Permission::ManageAttachments) {
                        self.start_prompt(Prompt::UploadPath, "");
                    }
                }
                TaskTab::History => {}
            },
            KeyCode::Char('E') => {
                if self.tab != TaskTab::Comments {
                    return;
                }
                let comment = self.tab_selected().and_then(|i| {
                    self.task
                        .as_ref()
                        .map(|t| t.comments[i].clone())
                });
                if let Some(comment) = comment {
                    let own = self
                        .role
                        .as_ref()
                        .is_some_and(|r| r.can_modify_comment(&comment.author));
                    if own {
                        self.start_prompt(
                            Prompt::EditComment {
                                comment_id: comment.id,
                            },
                            &comment.content,
                        );
                    } else {
                        self.notify(self.t(Msg::PermissionDenied));
                    }
                }
            }
            KeyCode::Char('x') => self.confirm_delete_tab_item(),
            KeyCode::Char('w') => self.download_selected_attachment(api).await,
            _ => {}
        }
    }

    async fn handle_templates_key(&mut self, key: KeyEvent, api: &ApiClient) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.view = View::Board,
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(i) = self.template_list.selected() {
                    if i + 1 < self.templates.len() {
                        self.template_list.select(Some(i + 1));
                    }
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(i) = self.template_list.selected() {
                    self.template_list.select(Some(i.saturating_sub(1)));
                }
            }
            KeyCode::Enter => {
                let template = self
                    .template_list
                    .selected()
                    .and_then(|i| self.templates.get(i))
                    .cloned();
                let (Some(template), Some(board_id), Some(column_id)) = (
                    template,
                    self.board.as_ref().map(|s| s.id()),
                    self.selected_column_id(),
                ) else {
                    return;
                };
                if !self.allowed(Permission::CreateTask) {
                    return;
                }
                match api
                    .create_task_from_template(board_id, column_id, &template)
                    .await
                {
                    Ok((task, failed)) => {
                        let task_id = task.id;
                        if let Some(state) = self.board.as_mut() {
                            state.insert_task(task);
                        }
                        self.view = View::Board;
                        self.select_task(task_id);
                        if let Some(err) = failed {
                            self.report(Msg::TemplateSubtaskFailed, err);
                        }
                    }
                    Err(err) => self.report(Msg::CreateFromTemplateFailed, err),
                }
            }
            KeyCode::Char('e') => {
                let template = self
                    .template_list
                    .selected()
                    .and_then(|i| self.templates.get(i))
                    .map(|t| (t.id, t.name.clone()));
                if let Some((template_id, name)) = template {
                    if self.allowed(Permission::ManageTemplates) {
                        self.start_prompt(Prompt::RenameTemplate { template_id }, &name);
                    }
                }
            }
            KeyCode::Char('x') => {
                let template = self
                    .template_list
                    .selected()
                    .and_then(|i| self.templates.get(i))
                    .map(|t| (t.id, t.name.clone()));
                if let Some((template_id, name)) = template {
                    if self.allowed(Permission::ManageTemplates) {
                        self.confirm = Some(ConfirmDialog::new(
                            self.locale,
                            PendingAction::DeleteTemplate { template_id },
                            &name,
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    async fn handle_settings_key(&mut self, key: KeyEvent, api: &ApiClient) {
        let Some(settings) = self.settings.as_mut() else {
            self.view = View::Board;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.sync_settings();
                self.settings = None;
                self.view = View::Board;
            }
            KeyCode::Tab => settings.next_tab(),
            KeyCode::Char('j') | KeyCode::Down => settings.select_next(),
            KeyCode::Char('k') | KeyCode::Up => settings.select_previous(),
            KeyCode::Char('a') => {
                let prompt = match settings.tab {
                    SettingsTab::Members => Prompt::NewMember,
                    SettingsTab::Statuses => Prompt::NewStatus,
                    SettingsTab::Types => Prompt::NewType,
                };
                if self.allowed(self.settings_permission()) {
                    self.start_prompt(prompt, "");
                }
            }
            KeyCode::Char('e') => {
                if settings.tab == SettingsTab::Members {
                    return;
                }
                if let Some((id, name)) = settings.selected_entry() {
                    if self.allowed(Permission::ManageStatuses) {
                        self.start_prompt(Prompt::RenameLookup { id }, &name);
                    }
                }
            }
            KeyCode::Char('r') => {
                if settings.tab != SettingsTab::Members {
                    return;
                }
                let Some((user_id, _)) = settings.selected_entry() else {
                    return;
                };
                if !self.allowed(Permission::ManageMembers) {
                    return;
                }
                let result = match self.settings.as_mut() {
                    Some(settings) => settings.cycle_role(api, user_id).await,
                    None => return,
                };
                match result {
                    Ok(_) => self.sync_settings(),
                    Err(err) => self.report(Msg::ChangeRoleFailed, err),
                }
            }
            KeyCode::Char('x') => {
                let tab = settings.tab;
                let Some((id, name)) = settings.selected_entry() else {
                    return;
                };
                let action = match tab {
                    SettingsTab::Members => PendingAction::RemoveMember { user_id: id },
                    SettingsTab::Statuses => PendingAction::DeleteStatus { status_id: id },
                    SettingsTab::Types => PendingAction::DeleteType { type_id: id },
                };
                if self.allowed(self.settings_permission()) {
                    self.confirm = Some(ConfirmDialog::new(self.locale, action, &name));
                }
            }
            KeyCode::Char('B') => {
                let name = self
                    .board
                    .as_ref()
                    .map(|s| s.board.name.clone())
                    .unwrap_or_default();
                if self.allowed(Permission::EditBoard) {
                    self.start_prompt(Prompt::RenameBoard, &name);
                }
            }
            _ => {}
        }
    }

    async fn settings_change(&mut self, api: &ApiClient, prompt: &Prompt, text: &str) {
        let result = match (self.settings.as_mut(), prompt) {
            (Some(settings), Prompt::RenameLookup { id }) => settings.rename(api, *id, text).await,
            (Some(settings), _) => settings.add(api, text).await,
            (None, _) => return,
        };
        match result {
            Ok(()) => self.sync_settings(),
            Err(err) => self.report(Msg::SaveSettingsFailed, err),
        }
    }

    async fn submit_prompt(&mut self, api: &ApiClient, prompt: Prompt) {
        let text = std::mem::take(&mut self.input).trim().to_string();
        self.input_mode = InputMode::Normal;
        let board_id = self.board.as_ref().map(|s| s.id());
        let task_id = self.task.as_ref().map(|t| t.id);

        match prompt {
            Prompt::Filter => {
                let parsed = match &self.board {
                    Some(state) => TaskFilter::parse(&text, &state.board),
                    None => Ok(TaskFilter::default()),
                };
                match parsed {
                    Ok(filter) => {
                        self.filter = filter;
                        self.selected_task = 0;
                        self.clamp_selection();
                    }
                    Err(UnknownName::Status(name)) => {
                        self.notify(self.tf(Msg::UnknownStatus, &[&name]))
                    }
                    Err(UnknownName::Type(name)) => self.notify(self.tf(Msg::UnknownType, &[&name])),
                }
            }
            Prompt::NewMember | Prompt::NewStatus | Prompt::NewType | Prompt::RenameLookup { .. } => {
                self.settings_change(api, &prompt, &text).await;
            }
            Prompt::RenameBoard => {
                let Some(board_id) = board_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let update = BoardUpdate {
                    name: Some(text),
                    description: None,
                };
                match api.update_board(board_id, &update).await {
                    Ok(saved) => {
                        if let Some(state) = self.board.as_mut() {
                            state.board.name = saved.name.clone();
                        }
                        if let Some(listed) = self.boards.iter_mut().find(|b| b.id == board_id) {
                            listed.name = saved.name;
                        }
                    }
                    Err(err) => self.report(Msg::RenameBoardFailed, err),
                }
            }
            Prompt::RenameTemplate { template_id } => {
                let Some(board_id) = board_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let Some(existing) = self.templates.iter().find(|t| t.id == template_id) else {
                    return;
                };
                let template = NewTemplate {
                    name: text,
                    title: existing.title.clone(),
                    description: existing.description.clone(),
                    priority: existing.priority,
                    tags: existing.tags.clone(),
                    type_id: existing.type_id,
                    subtasks: existing.subtasks.clone(),
                };
                match api.update_template(board_id, template_id, &template).await {
                    Ok(saved) => {
                        if let Some(slot) = self.templates.iter_mut().find(|t| t.id == template_id) {
                            *slot = saved;
                        }
                    }
                    Err(err) => self.report(Msg::RenameTemplateFailed, err),
                }
            }
            Prompt::NewBoard => {
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let new_board = NewBoard {
                    name: text,
                    description: None,
                };
                match api.create_board(&new_board).await {
                    Ok(board) => {
                        self.boards.push(board);
                        self.board_list.select(Some(self.boards.len() - 1));
                    }
                    Err(err) => self.report(Msg::CreateBoardFailed, err),
                }
            }
            Prompt::NewColumn => {
                let Some(board_id) = board_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let column = NewColumn {
                    name: text,
                    color: None,
                };
                match api.create_column(board_id, &column).await {
                    Ok(column) => {
                        if let Some(state) = self.board.as_mut() {
                            state.insert_column(column);
                        }
                        self.selected_column = self.column_count().saturating_sub(1);
                        self.selected_task = 0;
                    }
                    Err(err) => self.report(Msg::CreateColumnFailed, err),
                }
            }
            Prompt::RenameColumn { column_id } => {
                let Some(board_id) = board_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let update = ColumnUpdate {
                    name: Some(text),
                    color: None,
                };
                match api.update_column(board_id, column_id, &update).await {
                    Ok(saved) => {
                        if let Some(state) = self.board.as_mut() {
                            if let Some(i) = state.board.column_index(column_id) {
                                let column = &mut state.board.columns[i];
                                column.name = saved.name;
                                column.color = saved.color;
                            }
                        }
                    }
                    Err(err) => self.report(Msg::RenameColumnFailed, err),
                }
            }
            Prompt::NewTask { column_id } => {
                let Some(board_id) = board_id else { return };
                let parsed = parse_task_input(&text);
                if parsed.title.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                match api
                    .create_task(board_id, column_id, &parsed.into_new_task())
                    .await
                {
                    Ok(task) => {
                        let task_id = task.id;
                        if let Some(state) = self.board.as_mut() {
                            state.insert_task(task);
                        }
                        self.select_task(task_id);
                    }
                    Err(err) => self.report(Msg::CreateTaskFailed, err),
                }
            }
            Prompt::EditTitle => {
                let Some(task_id) = task_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let update = TaskUpdate {
                    title: Some(text),
                    ..TaskUpdate::default()
                };
                self.apply_update(api, task_id, update).await;
            }
            Prompt::EditDescription => {
                let Some(task_id) = task_id else { return };
                let description = if text.is_empty() {
                    None
                } else {
                    Some(format!("<p>{}</p>", escape_html(&text)))
                };
                let update = TaskUpdate {
                    description: Some(description),
                    ..TaskUpdate::default()
                };
                self.apply_update(api, task_id, update).await;
            }
            Prompt::Assignee => {
                let Some(task_id) = task_id else { return };
                let update = TaskUpdate {
                    assignee: Some(Some(text).filter(|t| !t.is_empty())),
                    ..TaskUpdate::default()
                };
                self.apply_update(api, task_id, update).await;
            }
            Prompt::EndDate => {
                let Some(task_id) = task_id else { return };
                let end_date = if text.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                        Ok(date) => Some(date),
                        Err(_) => {
                            self.notify(self.tf(Msg::InvalidDate, &[&text]));
                            return;
                        }
                    }
                };
                let update = TaskUpdate {
                    end_date: Some(end_date),
                    ..TaskUpdate::default()
                };
                self.apply_update(api, task_id, update).await;
            }
            Prompt::Tag => {
                let Some(mut task) = self.task.clone() else {
                    return;
                };
                let tag = text.trim_start_matches('#');
                if tag.is_empty() {
                    return;
                }
                if !task.remove_tag(tag) {
                    task.add_tag(tag);
                }
                let update = TaskUpdate {
                    tags: Some(task.tags),
                    ..TaskUpdate::default()
                };
                self.apply_update(api, task.id, update).await;
            }
            Prompt::NewSubtask => {
                let Some(task_id) = task_id else { return };
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let subtask = NewSubtask {
                    title: text,
                    ..NewSubtask::default()
                };
                match api.create_subtask(task_id, &subtask).await {
                    Ok(subtask) => {
                        if let Some(task) = self.task.as_mut() {
                            task.subtasks.push(subtask);
                        }
                        self.sync_board_task();
                        self.clamp_tab_selection();
                    }
                    Err(err) => self.report(Msg::AddSubtaskFailed, err),
                }
            }
            Prompt::NewComment => {
                let Some(task_id) = task_id else { return };
                if text.is_empty() {
                    return;
                }
                match api.create_comment(task_id, &text).await {
                    Ok(comment) => {
                        if let Some(task) = self.task.as_mut() {
                            task.comments.push(comment);
                        }
                        self.clamp_tab_selection();
                    }
                    Err(err) => self.report(Msg::AddCommentFailed, err),
                }
            }
            Prompt::EditComment { comment_id } => {
                let Some(task_id) = task_id else { return };
                if text.is_empty() {
                    return;
                }
                match api.update_comment(task_id, comment_id, &text).await {
                    Ok(saved) => {
                        if let Some(comment) = self
                            .task
                            .as_mut()
                            .and_then(|t| t.comments.iter_mut().find(|c| c.id == comment_id))
                        {
                            *comment = saved;
                        }
                    }
                    Err(err) => self.report(Msg::EditCommentFailed, err),
                }
            }
            Prompt::UploadPath => {
                let Some(task_id) = task_id else { return };
                if text.is_empty() {
                    return;
                }
                match api.upload_attachment(task_id, Path::new(&text)).await {
                    Ok(attachment) => {
                        if let Some(task) = self.task.as_mut() {
                            task.attachments.push(attachment);
                        }
                        self.clamp_tab_selection();
                    }
                    Err(err) => self.report(Msg::UploadFailed, err),
                }
            }
            Prompt::TemplateName => {
                if text.is_empty() {
                    self.notify(self.t(Msg::EmptyTitle));
                    return;
                }
                let (Some(board_id), Some(task)) = (board_id, self.task.as_ref()) else {
                    return;
                };
                let template = TaskTemplate::from_task(&text, task);
                match api.create_template(board_id, &template).await {
                    Ok(saved) => {
                        self.notify(self.tf(Msg::TemplateSaved, &[&saved.name]));
                        self.templates.push(saved);
                    }
                    Err(err) => self.report(Msg::SaveTemplateFailed, err),
                }
            }
        }
    }

    /// Runs a confirmed destructive action
    async fn perform(&mut self, api: &ApiClient, action: PendingAction) {
        info!(?action, "performing confirmed action");
        match action {
            PendingAction::DeleteBoard { board_id } => match api.delete_board(board_id).await {
                Ok(()) => {
                    self.boards.retain(|b| b.id != board_id);
                    select_clamped(&mut self.board_list, self.boards.len());
                }
                Err(err) => self.report(Msg::DeleteBoardFailed, err),
            },
            PendingAction::DeleteColumn { column_id } => {
                let result = match self.board.as_mut() {
                    Some(state) => state.delete_column(api, column_id).await,
                    None => return,
                };
                match result {
                    Ok(()) => self.clamp_selection(),
                    Err(err) => self.report(Msg::DeleteColumnFailed, err),
                }
            }
            PendingAction::DeleteTask { task_id } => {
                let result = match self.board.as_mut() {
                    Some(state) => state.delete_task(api, task_id).await,
                    None => return,
                };
                match result {
                    Ok(()) => {
                        if self.task.as_ref().is_some_and(|t| t.id == task_id) {
                            self.task = None;
                            self.view = View::Board;
                        }
                        self.clamp_selection();
                    }
                    Err(err) => self.report(Msg::DeleteTaskFailed, err),
                }
            }
            PendingAction::DeleteSubtask {
                task_id,
                subtask_id,
            } => match api.delete_subtask(task_id, subtask_id).await {
                Ok(()) => {
                    if let Some(task) = self.task.as_mut() {
                        task.subtasks.retain(|s| s.id != subtask_id);
                    }
                    self.sync_board_task();
                    self.clamp_tab_selection();
                }
                Err(err) => self.report(Msg::DeleteSubtaskFailed, err),
            },
            PendingAction::DeleteComment {
                task_id,
                comment_id,
            } => match api.delete_comment(task_id, comment_id).await {
                Ok(()) => {
                    if let Some(task) = self.task.as_mut() {
                        task.comments.retain(|c| c.id != comment_id);
                    }
                    self.clamp_tab_selection();
                }
                Err(err) => self.report(Msg::DeleteCommentFailed, err),
            },
            PendingAction::DeleteAttachment {
                task_id,
                attachment_id,
            } => match api.delete_attachment(task_id, attachment_id).await {
                Ok(()) => {
                    if let Some(task) = self.task.as_mut() {
                        task.attachments.retain(|a| a.id != attachment_id);
                    }
                    self.clamp_tab_selection();
                }
                Err(err) => self.report(Msg::DeleteAttachmentFailed, err),
            },
            PendingAction::RemoveMember { user_id } => {
                let result = match self.settings.as_mut() {
                    Some(settings) => settings.remove_member(api, user_id).await,
                    None => return,
                };
                match result {
                    Ok(()) => self.sync_settings(),
                    Err(err) => self.report(Msg::RemoveMemberFailed, err),
                }
            }
            PendingAction::DeleteStatus { status_id } => {
                let result = match self.settings.as_mut() {
                    Some(settings) => settings.delete_status(api, status_id).await,
                    None => return,
                };
                match result {
                    Ok(()) => self.sync_settings(),
                    Err(err) => self.report(Msg::DeleteStatusFailed, err),
                }
            }
            PendingAction::DeleteType { type_id } => {
                let result = match self.settings.as_mut() {
                    Some(settings) => settings.delete_type(api, type_id).await,
                    None => return,
                };
                match result {
                    Ok(()) => self.sync_settings(),
                    Err(err) => self.report(Msg::DeleteTypeFailed, err),
                }
            }
            PendingAction::DeleteTemplate { template_id } => {
                let Some(board_id) = self.board.as_ref().map(|s| s.id()) else {
                    return;
                };
                match api.delete_template(board_id, template_id).await {
                    Ok(()) => {
                        self.templates.retain(|t| t.id != template_id);
                        select_clamped(&mut self.template_list, self.templates.len());
                    }
                    Err(err) => self.report(Msg::DeleteTemplateFailed, err),
                }
            }
        }
    }
}
