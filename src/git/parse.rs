//! Parsers for the plain-text listings printed by `git branch` and `git remote`.

use serde::{Deserialize, Serialize};

/// Prefix git prints in front of the checked-out branch.
pub const CURRENT_BRANCH_MARKER: char = '*';

/// Prefix for a branch checked out in another linked worktree.
pub const WORKTREE_BRANCH_MARKER: char = '+';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
}

impl Branch {
    /// Parse one line of `git branch` output. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        // Markers are always followed by a space, so `+topic` stays a name
        let marked = |marker: char| {
            line.strip_prefix(marker)
                .and_then(|rest| rest.strip_prefix(' '))
                .map(str::trim_start)
        };

        if let Some(name) = marked(CURRENT_BRANCH_MARKER) {
            return Some(Self {
                name: name.to_string(),
                is_current: true,
            });
        }

        Some(Self {
            name: marked(WORKTREE_BRANCH_MARKER).unwrap_or(line).to_string(),
            is_current: false,
        })
    }
}

pub fn parse_branches(output: &str) -> Vec<Branch> {
    output.lines().filter_map(Branch::parse_line).collect()
}

pub fn parse_current_branch(output: &str) -> Option<String> {
    output
        .lines()
        .filter_map(Branch::parse_line)
        .find(|branch| branch.is_current)
        .map(|branch| branch.name)
}

pub fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branches_marks_current() {
        let branches = parse_branches("  master\n* feature\n");
        assert_eq!(
            branches,
            vec![
                Branch {
                    name: "master".to_string(),
                    is_current: false
                },
                Branch {
                    name: "feature".to_string(),
                    is_current: true
                },
            ]
        );
    }

    #[test]
    fn test_parse_branches_empty_output() {
        assert!(parse_branches("").is_empty());
        assert!(parse_branches("\n\n").is_empty());
    }

    #[test]
    fn test_parse_branches_crlf() {
        let names: Vec<_> = parse_branches("* main\r\n  dev\r\n")
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["main", "dev"]);
    }

    #[test]
    fn test_parse_detached_head() {
        let branches = parse_branches("* (HEAD detached at 1a2b3c4)\n  master\n");
        assert_eq!(branches[0].name, "(HEAD detached at 1a2b3c4)");
        assert!(branches[0].is_current);
    }

    #[test]
    fn test_parse_branches_strips_worktree_marker() {
        let branches = parse_branches("+ feature\n* master\n");
        assert_eq!(
            branches,
            vec![
                Branch {
                    name: "feature".to_string(),
                    is_current: false
                },
                Branch {
                    name: "master".to_string(),
                    is_current: true
                },
            ]
        );
        assert_eq!(parse_current_branch("+ feature\n* master\n"), Some("master".to_string()));
    }

    #[test]
    fn test_parse_marker_needs_trailing_space() {
        let branches = parse_branches("  +topic\n");
        assert_eq!(branches[0].name, "+topic");
        assert!(!branches[0].is_current);
    }

    #[test]
    fn test_parse_current_branch() {
        assert_eq!(
            parse_current_branch("  master\n* feature\n  other\n"),
            Some("feature".to_string())
        );
    }

    #[test]
    fn test_parse_current_branch_without_marker() {
        assert_eq!(parse_current_branch("  master\n  feature\n"), None);
        assert_eq!(parse_current_branch(""), None);
    }

    #[test]
    fn test_parse_remotes() {
        assert_eq!(parse_remotes("origin\nupstream\n"), ["origin", "upstream"]);
        assert!(parse_remotes("").is_empty());
    }
}
