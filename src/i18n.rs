//! UI message catalog

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub fn from_code(code: &str) -> Option<Locale> {
        let lang = code
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    Boards,
    NoBoards,
    NoTasks,
    TaskDetails,
    Subtasks,
    Comments,
    History,
    Attachments,
    Templates,
    NoTemplates,
    Description,
    NoDescription,
    Priority,
    Status,
    Type,
    Tags,
    NoTags,
    Dates,
    Assignee,
    Unassigned,
    Confirm,
    PermissionDenied,
    EmptyTitle,
    Quit,
    Back,
    Open,
    Add,
    Delete,
    Move,
    Edit,
    Filter,
    Sort,
    Refresh,
    Toggle,
    Submit,
    Cancel,
    Upload,
    Download,
    SaveTemplate,
    NewBoard,
    NewColumn,
    NewTask,
    NewSubtask,
    NewComment,
    NewTag,
    EditTitle,
    TemplateName,
    FilePath,
    Search,
    Settings,
    Members,
    Statuses,
    Types,
    Role,
    NewMember,
    NewStatus,
    NewType,
    RenameBoard,
    Rename,
    GroupByStatus,
    NoStatus,
    LoadBoardsFailed,
    OpenBoardFailed,
    RefreshBoardFailed,
    MoveColumnFailed,
    MoveTaskFailed,
    UpdateFailed,
    LoadHistoryFailed,
    LoadTaskFailed,
    LoadTemplatesFailed,
    LoadSettingsFailed,
    SaveSettingsFailed,
    ChangeRoleFailed,
    UpdateSubtaskFailed,
    ReorderSubtasksFailed,
    DownloadFailed,
    UploadFailed,
    CreateBoardFailed,
    RenameBoardFailed,
    CreateColumnFailed,
    RenameColumnFailed,
    CreateTaskFailed,
    CreateFromTemplateFailed,
    TemplateSubtaskFailed,
    AddSubtaskFailed,
    AddCommentFailed,
    EditCommentFailed,
    SaveTemplateFailed,
    RenameTemplateFailed,
    DeleteBoardFailed,
    DeleteColumnFailed,
    DeleteTaskFailed,
    DeleteSubtaskFailed,
    DeleteCommentFailed,
    DeleteAttachmentFailed,
    DeleteTemplateFailed,
    DeleteStatusFailed,
    DeleteTypeFailed,
    RemoveMemberFailed,
    Saved,
    InvalidFileName,
    InvalidDate,
    TemplateSaved,
    UnknownStatus,
    UnknownType,
    ConfirmDelete,
    ConfirmRemove,
    KindBoard,
    KindColumn,
    KindTask,
    KindSubtask,
    KindComment,
    KindAttachment,
    KindTemplate,
    KindStatus,
    KindType,
    KindMember,
    SortPosition,
    SortPriority,
    SortEndDate,
    SortTitle,
    Edited,
    IsDefault,
    IsCustom,
    Active,
}

pub fn tr(locale: Locale, msg: Msg) -> &'static str {
    match locale {
        Locale::En => en(msg),
        Locale::De => de(msg),
    }
}

/// Fills each `{}` in the translated template with the next argument
pub fn trf(locale: Locale, msg: Msg, args: &[&str]) -> String {
    let mut out = String::new();
    let mut args = args.iter();
    let mut parts = tr(locale, msg).split("{}").peekable();
    while let Some(part) = parts.next() {
        out.push_str(part);
        if parts.peek().is_some() {
            out.push_str(args.next().copied().unwrap_or_default());
        }
    }
    out
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::Boards => "Boards",
        Msg::NoBoards => "No boards yet",
        Msg::NoTasks => "No tasks",
        Msg::TaskDetails => "Task Details",
        Msg::Subtasks => "Subtasks",
        Msg::Comments => "Comments",
        Msg::History => "History",
        Msg::Attachments => "Attachments",
        Msg::Templates => "Templates",
        Msg::NoTemplates => "No templates",
        Msg::Description => "Description",
        Msg::NoDescription => "No description",
        Msg::Priority => "Priority",
        Msg::Status => "Status",
        Msg::Type => "Type",
        Msg::Tags => "Tags",
        Msg::NoTags => "No tags",
        Msg::Dates => "Dates",
        Msg::Assignee => "Assignee",
        Msg::Unassigned => "Unassigned",
        Msg::Confirm => "Confirm",
        Msg::PermissionDenied => "You do not have permission to do that",
        Msg::EmptyTitle => "Title cannot be empty",
        Msg::Quit => "Quit",
        Msg::Back => "Back",
        Msg::Open => "Open",
        Msg::Add => "Add",
        Msg::Delete => "Delete",
        Msg::Move => "Move",
        Msg::Edit => "Edit",
        Msg::Filter => "Filter",
        Msg::Sort => "Sort",
        Msg::Refresh => "Refresh",
        Msg::Toggle => "Toggle",
        Msg::Submit => "Submit",
        Msg::Cancel => "Cancel",
        Msg::Upload => "Upload",
        Msg::Download => "Download",
        Msg::SaveTemplate => "Save as template",
        Msg::NewBoard => "New board name",
        Msg::NewColumn => "New column name",
        Msg::NewTask => "New task (Title !priority #tag)",
        Msg::NewSubtask => "New subtask",
        Msg::NewComment => "New comment",
        Msg::NewTag => "Tag to add or remove",
        Msg::EditTitle => "Edit title",
        Msg::TemplateName => "Template name",
        Msg::FilePath => "File path",
        Msg::Search => "Search",
        Msg::Settings => "Board settings",
        Msg::Members => "Members",
        Msg::Statuses => "Statuses",
        Msg::Types => "Types",
        Msg::Role => "Role",
        Msg::NewMember => "Username to invite",
        Msg::NewStatus => "New status name",
        Msg::NewType => "New type name",
        Msg::RenameBoard => "Rename board",
        Msg::Rename => "Rename",
        Msg::GroupByStatus => "Group by status",
        Msg::NoStatus => "No status",
        Msg::LoadBoardsFailed => "Could not load boards",
        Msg::OpenBoardFailed => "Could not open board",
        Msg::RefreshBoardFailed => "Could not refresh board",
        Msg::MoveColumnFailed => "Could not move column",
        Msg::MoveTaskFailed => "Could not move task",
        Msg::UpdateFailed => "Update failed",
        Msg::LoadHistoryFailed => "Could not load history",
        Msg::LoadTaskFailed => "Could not load task",
        Msg::LoadTemplatesFailed => "Could not load templates",
        Msg::LoadSettingsFailed => "Could not load board settings",
        Msg::SaveSettingsFailed => "Could not save board settings",
        Msg::ChangeRoleFailed => "Could not change role",
        Msg::UpdateSubtaskFailed => "Could not update subtask",
        Msg::ReorderSubtasksFailed => "Could not reorder subtasks",
        Msg::DownloadFailed => "Download failed",
        Msg::UploadFailed => "Upload failed",
        Msg::CreateBoardFailed => "Could not create board",
        Msg::RenameBoardFailed => "Could not rename board",
        Msg::CreateColumnFailed => "Could not create column",
        Msg::RenameColumnFailed => "Could not rename column",
        Msg::CreateTaskFailed => "Could not create task",
        Msg::CreateFromTemplateFailed => "Could not create task from template",
        Msg::TemplateSubtaskFailed => "Task created, but a subtask failed",
        Msg::AddSubtaskFailed => "Could not add subtask",
        Msg::AddCommentFailed => "Could not add comment",
        Msg::EditCommentFailed => "Could not edit comment",
        Msg::SaveTemplateFailed => "Could not save template",
        Msg::RenameTemplateFailed => "Could not rename template",
        Msg::DeleteBoardFailed => "Could not delete board",
        Msg::DeleteColumnFailed => "Could not delete column",
        Msg::DeleteTaskFailed => "Could not delete task",
        Msg::DeleteSubtaskFailed => "Could not delete subtask",
        Msg::DeleteCommentFailed => "Could not delete comment",
        Msg::DeleteAttachmentFailed => "Could not delete attachment",
        Msg::DeleteTemplateFailed => "Could not delete template",
        Msg::DeleteStatusFailed => "Could not delete status",
        Msg::DeleteTypeFailed => "Could not delete type",
        Msg::RemoveMemberFailed => "Could not remove member",
        Msg::Saved => "Saved {}",
        Msg::InvalidFileName => "Refusing to save attachment as '{}'",
        Msg::InvalidDate => "Invalid date '{}', expected YYYY-MM-DD",
        Msg::TemplateSaved => "Template '{}' saved",
        Msg::UnknownStatus => "Unknown status '{}'",
        Msg::UnknownType => "Unknown type '{}'",
        Msg::ConfirmDelete => "Delete {} \"{}\"? (y/n)",
        Msg::ConfirmRemove => "Remove {} \"{}\"? (y/n)",
        Msg::KindBoard => "board",
        Msg::KindColumn => "column",
        Msg::KindTask => "task",
        Msg::KindSubtask => "subtask",
        Msg::KindComment => "comment",
        Msg::KindAttachment => "attachment",
        Msg::KindTemplate => "template",
        Msg::KindStatus => "status",
        Msg::KindType => "type",
        Msg::KindMember => "member",
        Msg::SortPosition => "position",
        Msg::SortPriority => "priority",
        Msg::SortEndDate => "end date",
        Msg::SortTitle => "title",
        Msg::Edited => "(edited)",
        Msg::IsDefault => "default",
        Msg::IsCustom => "custom",
        Msg::Active => "active",
    }
}

fn de(msg: Msg) -> &'static str {
    match msg {
        Msg::Boards => "Boards",
        Msg::NoBoards => "Noch keine Boards",
        Msg::NoTasks => "Keine Aufgaben",
        Msg::TaskDetails => "Aufgabendetails",
        Msg::Subtasks => "Unteraufgaben",
        Msg::Comments => "Kommentare",
        Msg::History => "Verlauf",
        Msg::Attachments => "Anhänge",
        Msg::Templates => "Vorlagen",
        Msg::NoTemplates => "Keine Vorlagen",
        Msg::Description => "Beschreibung",
        Msg::NoDescription => "Keine Beschreibung",
        Msg::Priority => "Priorität",
        Msg::Status => "Status",
        Msg::Type => "Typ",
        Msg::Tags => "Tags",
        Msg::NoTags => "Keine Tags",
        Msg::Dates => "Termine",
        Msg::Assignee => "Zuständig",
        Msg::Unassigned => "Nicht zugewiesen",
        Msg::Confirm => "Bestätigen",
        Msg::PermissionDenied => "Dafür fehlt dir die Berechtigung",
        Msg::EmptyTitle => "Titel darf nicht leer sein",
        Msg::Quit => "Beenden",
        Msg::Back => "Zurück",
        Msg::Open => "Öffnen",
        Msg::Add => "Hinzufügen",
        Msg::Delete => "Löschen",
        Msg::Move => "Verschieben",
        Msg::Edit => "Bearbeiten",
        Msg::Filter => "Filtern",
        Msg::Sort => "Sortieren",
        Msg::Refresh => "Aktualisieren",
        Msg::Toggle => "Umschalten",
        Msg::Submit => "Absenden",
        Msg::Cancel => "Abbrechen",
        Msg::Upload => "Hochladen",
        Msg::Download => "Herunterladen",
        Msg::SaveTemplate => "Als Vorlage speichern",
        Msg::NewBoard => "Name des neuen Boards",
        Msg::NewColumn => "Name der neuen Spalte",
        Msg::NewTask => "Neue Aufgabe (Titel !priorität #tag)",
        Msg::NewSubtask => "Neue Unteraufgabe",
        Msg::NewComment => "Neuer Kommentar",
        Msg::NewTag => "Tag hinzufügen oder entfernen",
        Msg::EditTitle => "Titel bearbeiten",
        Msg::TemplateName => "Name der Vorlage",
        Msg::FilePath => "Dateipfad",
        Msg::Search => "Suche",
        Msg::Settings => "Board-Einstellungen",
        Msg::Members => "Mitglieder",
        Msg::Statuses => "Status",
        Msg::Types => "Typen",
        Msg::Role => "Rolle",
        Msg::NewMember => "Benutzername einladen",
        Msg::NewStatus => "Name des neuen Status",
        Msg::NewType => "Name des neuen Typs",
        Msg::RenameBoard => "Board umbenennen",
        Msg::Rename => "Umbenennen",
        Msg::GroupByStatus => "Nach Status gruppieren",
        Msg::NoStatus => "Ohne Status",
        Msg::LoadBoardsFailed => "Boards konnten nicht geladen werden",
        Msg::OpenBoardFailed => "Board konnte nicht geöffnet werden",
        Msg::RefreshBoardFailed => "Board konnte nicht aktualisiert werden",
        Msg::MoveColumnFailed => "Spalte konnte nicht verschoben werden",
        Msg::MoveTaskFailed => "Aufgabe konnte nicht verschoben werden",
        Msg::UpdateFailed => "Änderung fehlgeschlagen",
        Msg::LoadHistoryFailed => "Verlauf konnte nicht geladen werden",
        Msg::LoadTaskFailed => "Aufgabe konnte nicht geladen werden",
        Msg::LoadTemplatesFailed => "Vorlagen konnten nicht geladen werden",
        Msg::LoadSettingsFailed => "Board-Einstellungen konnten nicht geladen werden",
        Msg::SaveSettingsFailed => "Board-Einstellungen konnten nicht gespeichert werden",
        Msg::ChangeRoleFailed => "Rolle konnte nicht geändert werden",
        Msg::UpdateSubtaskFailed => "Unteraufgabe konnte nicht geändert werden",
        Msg::ReorderSubtasksFailed => "Unteraufgaben konnten nicht umsortiert werden",
        Msg::DownloadFailed => "Download fehlgeschlagen",
        Msg::UploadFailed => "Upload fehlgeschlagen",
        Msg::CreateBoardFailed => "Board konnte nicht angelegt werden",
        Msg::RenameBoardFailed => "Board konnte nicht umbenannt werden",
        Msg::CreateColumnFailed => "Spalte konnte nicht angelegt werden",
        Msg::RenameColumnFailed => "Spalte konnte nicht umbenannt werden",
        Msg::CreateTaskFailed => "Aufgabe konnte nicht angelegt werden",
        Msg::CreateFromTemplateFailed => "Aufgabe konnte nicht aus der Vorlage angelegt werden",
        Msg::TemplateSubtaskFailed => "Aufgabe angelegt, aber eine Unteraufgabe schlug fehl",
        Msg::AddSubtaskFailed => "Unteraufgabe konnte nicht hinzugefügt werden",
        Msg::AddCommentFailed => "Kommentar konnte nicht hinzugefügt werden",
        Msg::EditCommentFailed => "Kommentar konnte nicht bearbeitet werden",
        Msg::SaveTemplateFailed => "Vorlage konnte nicht gespeichert werden",
        Msg::RenameTemplateFailed => "Vorlage konnte nicht umbenannt werden",
        Msg::DeleteBoardFailed => "Board konnte nicht gelöscht werden",
        Msg::DeleteColumnFailed => "Spalte konnte nicht gelöscht werden",
        Msg::DeleteTaskFailed => "Aufgabe konnte nicht gelöscht werden",
        Msg::DeleteSubtaskFailed => "Unteraufgabe konnte nicht gelöscht werden",
        Msg::DeleteCommentFailed => "Kommentar konnte nicht gelöscht werden",
        Msg::DeleteAttachmentFailed => "Anhang konnte nicht gelöscht werden",
        Msg::DeleteTemplateFailed => "Vorlage konnte nicht gelöscht werden",
        Msg::DeleteStatusFailed => "Status konnte nicht gelöscht werden",
        Msg::DeleteTypeFailed => "Typ konnte nicht gelöscht werden",
        Msg::RemoveMemberFailed => "Mitglied konnte nicht entfernt werden",
        Msg::Saved => "Gespeichert: {}",
        Msg::InvalidFileName => "Anhang wird nicht als '{}' gespeichert",
        Msg::InvalidDate => "Ungültiges Datum '{}', erwartet JJJJ-MM-TT",
        Msg::TemplateSaved => "Vorlage '{}' gespeichert",
        Msg::UnknownStatus => "Unbekannter Status '{}'",
        Msg::UnknownType => "Unbekannter Typ '{}'",
        Msg::ConfirmDelete => "{} \"{}\" löschen? (j/n)",
        Msg::ConfirmRemove => "{} \"{}\" entfernen? (j/n)",
        Msg::KindBoard => "Board",
        Msg::KindColumn => "Spalte",
        Msg::KindTask => "Aufgabe",
        Msg::KindSubtask => "Unteraufgabe",
        Msg::KindComment => "Kommentar",
        Msg::KindAttachment => "Anhang",
        Msg::KindTemplate => "Vorlage",
        Msg::KindStatus => "Status",
        Msg::KindType => "Typ",
        Msg::KindMember => "Mitglied",
        Msg::SortPosition => "Position",
        Msg::SortPriority => "Priorität",
        Msg::SortEndDate => "Enddatum",
        Msg::SortTitle => "Titel",
        Msg::Edited => "(bearbeitet)",
        Msg::IsDefault => "Standard",
        Msg::IsCustom => "eigen",
        Msg::Active => "aktiv",
    }
}
