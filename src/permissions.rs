//! Role resolution and permission checks for a board.
//!
//! Permissions come from a static table mapping each permission to the roles
//! that hold it. The board owner passes every check.

use crate::models::{Board, BoardMember, Role, User};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewBoard,
    EditBoard,
    DeleteBoard,
    ManageMembers,
    ManageColumns,
    ManageStatuses,
    ManageTemplates,
    CreateTask,
    EditTask,
    MoveTask,
    DeleteTask,
    Comment,
    ModerateComments,
    ManageAttachments,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::ViewBoard => "view board",
            Permission::EditBoard => "edit board",
            Permission::DeleteBoard => "delete board",
            Permission::ManageMembers => "manage members",
            Permission::ManageColumns => "manage columns",
            Permission::ManageStatuses => "manage statuses",
            Permission::ManageTemplates => "manage templates",
            Permission::CreateTask => "create task",
            Permission::EditTask => "edit task",
            Permission::MoveTask => "move task",
            Permission::DeleteTask => "delete task",
            Permission::Comment => "comment",
            Permission::ModerateComments => "moderate comments",
            Permission::ManageAttachments => "manage attachments",
        };
        f.write_str(name)
    }
}

const NOBODY: &[Role] = &[];
const ADMIN: &[Role] = &[Role::Admin];
const EDITORS: &[Role] = &[Role::Admin, Role::Member];
const EVERYONE: &[Role] = &[Role::Admin, Role::Member, Role::Viewer];

// Owner is implied everywhere and never listed.
const PERMISSION_TABLE: &[(Permission, &[Role])] = &[
    (Permission::ViewBoard, EVERYONE),
    (Permission::EditBoard, ADMIN),
    (Permission::DeleteBoard, NOBODY),
    (Permission::ManageMembers, ADMIN),
    (Permission::ManageColumns, ADMIN),
    (Permission::ManageStatuses, ADMIN),
    (Permission::ManageTemplates, EDITORS),
    (Permission::CreateTask, EDITORS),
    (Permission::EditTask, EDITORS),
    (Permission::MoveTask, EDITORS),
    (Permission::DeleteTask, EDITORS),
    (Permission::Comment, EVERYONE),
    (Permission::ModerateComments, ADMIN),
    (Permission::ManageAttachments, EDITORS),
];

pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    match role {
        None => false,
        Some(Role::Owner) => true,
        Some(role) => PERMISSION_TABLE
            .iter()
            .find(|(p, _)| *p == permission)
            .map(|(_, roles)| roles.contains(&role))
            .unwrap_or(false),
    }
}

/// Role of `user` on `board`: owner by board ownership, otherwise by membership
pub fn resolve_role(board: &Board, members: &[BoardMember], user: &User) -> Option<Role> {
    if board.owner_id == Some(user.id) {
        return Some(Role::Owner);
    }
    members
        .iter()
        .find(|m| m.user_id == user.id)
        .map(|m| m.role)
}

/// The current user's standing on the open board
#[derive(Clone, Debug, PartialEq)]
pub struct RoleContext {
    pub user: User,
    pub role: Option<Role>,
}

impl RoleContext {
    pub fn new(board: &Board, members: &[BoardMember], user: User) -> Self {
        let role = resolve_role(board, members, &user);
        Self { user, role }
    }

    pub fn can(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }

    pub fn require(&self, permission: Permission) -> crate::error::Result<()> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(crate::error::AppError::PermissionDenied(permission))
        }
    }

    /// Authors may always edit or delete their own comments
    pub fn can_modify_comment(&self, author: &str) -> bool {
        author == self.user.username || self.can(Permission::ModerateComments)
    }
}
