//! Ticket identifiers from `plans/`, the current git branch, and `AGENTS.md`.

use super::{TICKET_RE, inferred, read_text};
use crate::git;
use crate::placeholder::PlaceholderMap;
use crate::source::{MANDATORY_FILE, PLANS_DIR};
use std::fs;
use std::path::Path;

pub(super) fn ticket_ids(target: &Path) -> PlaceholderMap {
    let mut values = PlaceholderMap::new();

    if let Some(epic) = epic_from_plans(target) {
        values.insert("EPIC_ID", epic, inferred(PLANS_DIR));
    }

    if let Some(ticket) = ticket_from_branch(target) {
        values.insert("TRACKER_ID", ticket.clone(), inferred("git branch"));
        values.insert_default("EPIC_ID", ticket, inferred("git branch"));
    } else if let Some(text) = read_text(target, MANDATORY_FILE)
        && let Some(caps) = TICKET_RE.captures(&text)
    {
        values.insert("TRACKER_ID", caps[1].to_string(), inferred(MANDATORY_FILE));
    }

    values
}

/// First `plans/<TICKET>.md` in name order.
fn epic_from_plans(target: &Path) -> Option<String> {
    let entries = match fs::read_dir(target.join(PLANS_DIR)) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(error = %e, "no plans directory to scan");
            return None;
        }
    };

    let mut stems: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    stems.sort();

    stems.into_iter().find(|stem| is_ticket(stem))
}

fn ticket_from_branch(target: &Path) -> Option<String> {
    match git::current_branch(target) {
        Ok(Some(branch)) => TICKET_RE.captures(&branch).map(|caps| caps[1].to_string()),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "could not read current branch");
            None
        }
    }
}

fn is_ticket(candidate: &str) -> bool {
    TICKET_RE
        .find(candidate)
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_repo_on_branch, write_files};
    use tempfile::TempDir;

    #[test]
    fn test_is_ticket() {
        assert!(is_ticket("ABC-123"));
        assert!(is_ticket("A1-9"));
        assert!(!is_ticket("abc-123"));
        assert!(!is_ticket("ABC-123-notes"));
        assert!(!is_ticket("X-1"));
        assert!(!is_ticket("README"));
    }

    #[test]
    fn test_epic_from_first_sorted_plan() {
        let temp_dir = TempDir::new().unwrap();
        write_files(
            temp_dir.path(),
            &[
                ("plans/notes.md", "scratch"),
                ("plans/PAY-20.md", "later"),
                ("plans/PAY-3.md", "epic"),
                ("plans/OPS-9.txt", "not markdown"),
            ],
        );

        // Name order: "PAY-20" < "PAY-3".
        assert_eq!(epic_from_plans(temp_dir.path()).as_deref(), Some("PAY-20"));
    }

    #[test]
    fn test_no_plans_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(epic_from_plans(temp_dir.path()), None);
    }

    #[test]
    fn test_branch_ticket_sets_tracker_and_epic() {
        let repo = create_test_repo_on_branch("feature/ENG-42-login");

        let values = ticket_ids(repo.path());
        assert_eq!(values.resolve("TRACKER_ID"), Some("ENG-42"));
        assert_eq!(values.resolve("EPIC_ID"), Some("ENG-42"));
    }

    #[test]
    fn test_plans_epic_beats_branch_epic() {
        let repo = create_test_repo_on_branch("ENG-42-login");
        write_files(repo.path(), &[("plans/ENG-1.md", "epic")]);

        let values = ticket_ids(repo.path());
        assert_eq!(values.resolve("EPIC_ID"), Some("ENG-1"));
        assert_eq!(values.resolve("TRACKER_ID"), Some("ENG-42"));
    }

    #[test]
    fn test_agents_ticket_when_branch_has_none() {
        let repo = create_test_repo_on_branch("main");
        write_files(repo.path(), &[("AGENTS.md", "Commit as \"OPS-7: fix\".\n")]);

        let values = ticket_ids(repo.path());
        assert_eq!(values.resolve("TRACKER_ID"), Some("OPS-7"));
        assert_eq!(values.resolve("EPIC_ID"), None);
    }

    #[test]
    fn test_outside_git_repository() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ticket_ids(temp_dir.path()).is_empty());
    }
}
