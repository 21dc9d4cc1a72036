use crate::models::{NewTask, Priority};
use regex::Regex;

#[derive(Debug, PartialEq)]
pub struct ParsedTask {
    pub title: String,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl ParsedTask {
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            priority: self.priority.unwrap_or_default(),
            tags: self.tags,
            ..NewTask::default()
        }
    }
}

/// Parses quick-add input such as `Fix login !high #auth`.
///
/// Only the first valid priority counts; unknown `!` tokens are dropped.
pub fn parse_task_input(input: &str) -> ParsedTask {
    let priority_re = Regex::new(r"!(\w+)\s*").unwrap();
    let tag_re = Regex::new(r"(?:^|\s)#([\w-]+)").unwrap();

    let mut priority = None;
    let mut tags: Vec<String> = Vec::new();

    // Priority
    for caps in priority_re.captures_iter(input) {
        if let Some(priority_match) = caps.get(1) {
            if let Some(p) = Priority::parse(priority_match.as_str()) {
                if priority.is_none() {
                    priority = Some(p);
                }
            }
        }
    }

    // Tags
    for caps in tag_re.captures_iter(input) {
        if let Some(tag_match) = caps.get(1) {
            let tag = tag_match.as_str();
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.to_string());
            }
        }
    }

    let title = priority_re.replace_all(input, " ").to_string();
    let title = tag_re.replace_all(&title, " ").to_string();

    let title = Regex::new(r"\s+")
        .unwrap()
        .replace_all(&title, " ")
        .trim()
        .to_string();

    ParsedTask {
        title,
        priority,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_priority_in_middle() {
        let input = "Update !high software documentation";
        let expected = ParsedTask {
            title: "Update software documentation".to_string(),
            priority: Some(Priority::High),
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_numeric_priority_and_extra_spaces() {
        let input = "Fix bugs !2    in the code";
        let expected = ParsedTask {
            title: "Fix bugs in the code".to_string(),
            priority: Some(Priority::Medium),
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_multiple_spaces_between_words() {
        let input = "Write   tests !low for the   parser";
        let expected = ParsedTask {
            title: "Write tests for the parser".to_string(),
            priority: Some(Priority::Low),
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_priority_at_start_no_space() {
        let input = "!medium Prepare presentation slides";
        let expected = ParsedTask {
            title: "Prepare presentation slides".to_string(),
            priority: Some(Priority::Medium),
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_multiple_priorities_keeps_first() {
        let input = "  !low  !high Organize    team building !medium event ";
        let expected = ParsedTask {
            title: "Organize team building event".to_string(),
            priority: Some(Priority::Low),
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_invalid_priority_strips_it() {
        let input = "Check logs !urgent    immediately";
        let expected = ParsedTask {
            title: "Check logs immediately".to_string(),
            priority: None,
            tags: vec![],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_tags_and_priority() {
        let input = "Fix login !high #auth #backend";
        let expected = ParsedTask {
            title: "Fix login".to_string(),
            priority: Some(Priority::High),
            tags: vec!["auth".to_string(), "backend".to_string()],
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_duplicate_tags_are_collapsed() {
        let result = parse_task_input("#ui Polish #UI header #needs-design");
        assert_eq!(result.title, "Polish header");
        assert_eq!(result.tags, vec!["ui", "needs-design"]);
    }

    #[test]
    fn test_hash_inside_word_is_not_a_tag() {
        let result = parse_task_input("Support C# bindings");
        assert_eq!(result.title, "Support C# bindings");
        assert!(result.tags.is_empty());
    }

    #[test]
    fn test_into_new_task_defaults_priority() {
        let task = parse_task_input("Plain task").into_new_task();
        assert_eq!(task.title, "Plain task");
        assert_eq!(task.priority, Priority::None);
    }
}
