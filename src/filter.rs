use crate::i18n::Msg;
use crate::models::{Board, BoardStatus, Priority, Task};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Position,
    Priority,
    EndDate,
    Title,
}

impl SortKey {
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Position => SortKey::Priority,
            SortKey::Priority => SortKey::EndDate,
            SortKey::EndDate => SortKey::Title,
            SortKey::Title => SortKey::Position,
        }
    }

    pub fn label(self) -> Msg {
        match self {
            SortKey::Position => Msg::SortPosition,
            SortKey::Priority => Msg::SortPriority,
            SortKey::EndDate => Msg::SortEndDate,
            SortKey::Title => Msg::SortTitle,
        }
    }
}

/// A `status:` or `type:` token naming nothing on the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnknownName {
    Status(String),
    Type(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub priority: Option<Priority>,
    pub tag: Option<String>,
    pub status_id: Option<u64>,
    pub type_id: Option<u64>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        *self != TaskFilter::default()
    }

    /// Parses a filter line: free text plus `!priority`, `#tag`,
    /// `status:<name>` and `type:<name>` tokens resolved against the board
    pub fn parse(input: &str, board: &Board) -> Result<TaskFilter, UnknownName> {
        let mut filter = TaskFilter::default();
        let mut words = Vec::new();
        for token in input.split_whitespace() {
            if let Some(p) = token.strip_prefix('!').and_then(Priority::parse) {
                filter.priority = Some(p);
            } else if let Some(tag) = token.strip_prefix('#').filter(|t| !t.is_empty()) {
                filter.tag = Some(tag.to_string());
            } else if let Some(name) = token.strip_prefix("status:") {
                let status = board
                    .task_statuses
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| UnknownName::Status(name.to_string()))?;
                filter.status_id = Some(status.id);
            } else if let Some(name) = token.strip_prefix("type:") {
                let task_type = board
                    .task_types
                    .iter()
                    .find(|t| t.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| UnknownName::Type(name.to_string()))?;
                filter.type_id = Some(task_type.id);
            } else {
                words.push(token);
            }
        }
        filter.search = words.join(" ");
        Ok(filter)
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !task.has_tag(tag) {
                return false;
            }
        }
        if self.status_id.is_some() && task.status_id != self.status_id {
            return false;
        }
        if self.type_id.is_some() && task.type_id != self.type_id {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || task.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Position => a.position.cmp(&b.position),
        // high first
        SortKey::Priority => b
            .priority
            .cmp(&a.priority)
            .then(a.position.cmp(&b.position)),
        // undated last
        SortKey::EndDate => match (a.end_date, b.end_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then(a.position.cmp(&b.position)),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Tasks passing `filter`, ordered by `key`
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter, key: SortKey) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    visible.sort_by(|a, b| compare(a, b, key));
    visible
}

/// Tasks of the whole board grouped by status in status order; tasks without
/// a known status come last under `None`
pub fn group_by_status<'a>(board: &'a Board) -> Vec<(Option<&'a BoardStatus>, Vec<&'a Task>)> {
    let mut groups: Vec<(Option<&BoardStatus>, Vec<&Task>)> = board
        .task_statuses
        .iter()
        .map(|s| (Some(s), Vec::new()))
        .collect();
    let mut unassigned = Vec::new();
    for task in board.columns.iter().flat_map(|c| c.tasks.iter()) {
        let group = task.status_id.and_then(|id| {
            groups
                .iter()
                .position(|(status, _)| status.is_some_and(|s| s.id == id))
        });
        match group {
            Some(index) => groups[index].1.push(task),
            None => unassigned.push(task),
        }
    }
    groups.push((None, unassigned));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::board_json;
    use chrono::NaiveDate;

    fn board() -> Board {
        let mut board: Board = serde_json::from_value(board_json()).unwrap();
        board.normalize();
        let todo = &mut board.columns[0].tasks;
        todo[0].priority = Priority::Low;
        todo[0].tags = vec!["infra".to_string()];
        todo[0].end_date = NaiveDate::from_ymd_opt(2026, 11, 20);
        todo[1].priority = Priority::High;
        todo[1].description = Some("<p>API reference</p>".to_string());
        todo[1].status_id = Some(2);
        todo[2].end_date = NaiveDate::from_ymd_opt(2026, 11, 1);
        todo[2].type_id = Some(1);
        board
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_position_order() {
        let board = board();
        let tasks = visible_tasks(&board.columns[0].tasks, &TaskFilter::default(), SortKey::Position);
        assert_eq!(ids(&tasks), vec![100, 101, 102]);
        assert!(!TaskFilter::default().is_active());
    }

    #[test]
    fn test_search_covers_title_description_and_tags() {
        let board = board();
        let column = &board.columns[0].tasks;
        let by = |s: &str| {
            let filter = TaskFilter {
                search: s.to_string(),
                ..TaskFilter::default()
            };
            ids(&visible_tasks(column, &filter, SortKey::Position))
        };
        assert_eq!(by("FLAKY"), vec![102]);
        assert_eq!(by("api reference"), vec![101]);
        assert_eq!(by("infra"), vec![100]);
        assert!(by("nothing matches").is_empty());
    }

    #[test]
    fn test_sort_by_priority_puts_high_first() {
        let board = board();
        let tasks = visible_tasks(&board.columns[0].tasks, &TaskFilter::default(), SortKey::Priority);
        assert_eq!(ids(&tasks), vec![101, 100, 102]);
    }

    #[test]
    fn test_sort_by_end_date_puts_undated_last() {
        let board = board();
        let tasks = visible_tasks(&board.columns[0].tasks, &TaskFilter::default(), SortKey::EndDate);
        assert_eq!(ids(&tasks), vec![102, 100, 101]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let board = board();
        let tasks = visible_tasks(&board.columns[0].tasks, &TaskFilter::default(), SortKey::Title);
        assert_eq!(ids(&tasks), vec![102, 100, 101]);
    }

    #[test]
    fn test_parse_filter_tokens() {
        let board = board();
        let filter = TaskFilter::parse("docs !high #Infra status:blocked type:bug", &board).unwrap();
        assert_eq!(filter.search, "docs");
        assert_eq!(filter.priority, Some(Priority::High));
        assert_eq!(filter.tag.as_deref(), Some("Infra"));
        assert_eq!(filter.status_id, Some(2));
        assert_eq!(filter.type_id, Some(1));
        assert!(filter.is_active());
    }

    #[test]
    fn test_unknown_status_or_type_is_rejected() {
        let board = board();
        assert_eq!(
            TaskFilter::parse("docs status:archived", &board),
            Err(UnknownName::Status("archived".to_string()))
        );
        assert_eq!(
            TaskFilter::parse("type:epic", &board),
            Err(UnknownName::Type("epic".to_string()))
        );
    }

    #[test]
    fn test_combined_filters_must_all_match() {
        let board = board();
        let filter = TaskFilter::parse("!high status:blocked", &board).unwrap();
        let tasks = visible_tasks(&board.columns[0].tasks, &filter, SortKey::Position);
        assert_eq!(ids(&tasks), vec![101]);
        let filter = TaskFilter::parse("!low status:blocked", &board).unwrap();
        assert!(visible_tasks(&board.columns[0].tasks, &filter, SortKey::Position).is_empty());
    }

    #[test]
    fn test_group_by_status_keeps_status_order_and_unassigned_last() {
        let board = board();
        let groups = group_by_status(&board);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0.map(|s| s.name.as_str()), Some("Open"));
        assert!(groups[0].1.is_empty());
        assert_eq!(ids(&groups[1].1), vec![101]);
        assert!(groups[2].0.is_none());
        assert_eq!(ids(&groups[2].1), vec![100, 102, 110]);
    }

    #[test]
    fn test_sort_key_cycles() {
        let mut key = SortKey::default();
        for _ in 0..4 {
            key = key.next();
        }
        assert_eq!(key, SortKey::Position);
    }
}
