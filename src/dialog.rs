//! Confirmation dialogs for destructive actions

use crate::i18n::{tr, trf, Locale, Msg};
use crossterm::event::KeyCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    DeleteBoard { board_id: u64 },
    DeleteColumn { column_id: u64 },
    DeleteTask { task_id: u64 },
    DeleteSubtask { task_id: u64, subtask_id: u64 },
    DeleteComment { task_id: u64, comment_id: u64 },
    DeleteAttachment { task_id: u64, attachment_id: u64 },
    DeleteTemplate { template_id: u64 },
    DeleteStatus { status_id: u64 },
    DeleteType { type_id: u64 },
    RemoveMember { user_id: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: PendingAction,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed(PendingAction),
    Cancelled,
    Open,
}

impl ConfirmDialog {
    pub fn new(locale: Locale, action: PendingAction, subject: &str) -> Self {
        let (template, kind) = match action {
            PendingAction::DeleteBoard { .. } => (Msg::ConfirmDelete, Msg::KindBoard),
            PendingAction::DeleteColumn { .. } => (Msg::ConfirmDelete, Msg::KindColumn),
            PendingAction::DeleteTask { .. } => (Msg::ConfirmDelete, Msg::KindTask),
            PendingAction::DeleteSubtask { .. } => (Msg::ConfirmDelete, Msg::KindSubtask),
            PendingAction::DeleteComment { .. } => (Msg::ConfirmDelete, Msg::KindComment),
            PendingAction::DeleteAttachment { .. } => (Msg::ConfirmDelete, Msg::KindAttachment),
            PendingAction::DeleteTemplate { .. } => (Msg::ConfirmDelete, Msg::KindTemplate),
            PendingAction::DeleteStatus { .. } => (Msg::ConfirmDelete, Msg::KindStatus),
            PendingAction::DeleteType { .. } => (Msg::ConfirmDelete, Msg::KindType),
            PendingAction::RemoveMember { .. } => (Msg::ConfirmRemove, Msg::KindMember),
        };
        Self {
            message: trf(locale, template, &[tr(locale, kind), subject]),
            action,
        }
    }

    pub fn handle_key(&self, code: KeyCode) -> DialogOutcome {
        match code {
            KeyCode::Char('y' | 'Y' | 'j' | 'J') | KeyCode::Enter => {
                DialogOutcome::Confirmed(self.action.clone())
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => DialogOutcome::Cancelled,
            _ => DialogOutcome::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_the_subject() {
        let dialog = ConfirmDialog::new(
            Locale::En,
            PendingAction::DeleteColumn { column_id: 3 },
            "Review",
        );
        assert_eq!(dialog.message, "Delete column \"Review\"? (y/n)");
    }

    #[test]
    fn test_member_removal_wording() {
        let dialog = ConfirmDialog::new(
            Locale::En,
            PendingAction::RemoveMember { user_id: 4 },
            "kim",
        );
        assert_eq!(dialog.message, "Remove member \"kim\"? (y/n)");
    }

    #[test]
    fn test_german_wording() {
        let dialog = ConfirmDialog::new(
            Locale::De,
            PendingAction::DeleteColumn { column_id: 3 },
            "Review",
        );
        assert_eq!(dialog.message, "Spalte \"Review\" löschen? (j/n)");
        assert_eq!(
            dialog.handle_key(KeyCode::Char('j')),
            DialogOutcome::Confirmed(PendingAction::DeleteColumn { column_id: 3 })
        );
    }

    #[test]
    fn test_confirm_and_cancel_keys() {
        let action = PendingAction::DeleteTask { task_id: 8 };
        let dialog = ConfirmDialog::new(Locale::En, action.clone(), "Ship it");
        assert_eq!(
            dialog.handle_key(KeyCode::Char('y')),
            DialogOutcome::Confirmed(action.clone())
        );
        assert_eq!(
            dialog.handle_key(KeyCode::Enter),
            DialogOutcome::Confirmed(action)
        );
        assert_eq!(dialog.handle_key(KeyCode::Esc), DialogOutcome::Cancelled);
        assert_eq!(dialog.handle_key(KeyCode::Char('n')), DialogOutcome::Cancelled);
        assert_eq!(dialog.handle_key(KeyCode::Char('x')), DialogOutcome::Open);
    }
}
