//! Data sources the estimator reads from: the team roster and the
//! historical project list.
//!
//! The estimator only sees the two traits below. [`InMemorySource`] serves
//! owned vectors; [`JsonFolderSource`] reads a folder of exported JSON files.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{SourceError, SourceResult};
use crate::history::HistoricalProject;
use crate::team::TeamMember;

/// Supplies the current team roster.
pub trait RosterProvider {
    fn team_members(&self) -> Vec<TeamMember>;
}

/// Supplies completed and in-flight projects for similarity lookup.
pub trait ProjectHistory {
    fn all_projects(&self) -> Vec<HistoricalProject>;
}

/// Keys that mark a JSON object as a project record.
const PROJECT_KEYS: &[&str] = &["project_name", "project_id", "project_type", "deadline", "client"];

/// Keys that mark a JSON object as a task record. Tasks are not used for
/// estimation; objects matching these are skipped before the member check.
const TASK_KEYS: &[&str] = &["task_name", "task_id", "status", "assignee", "priority"];

/// Keys that mark a JSON object as a team member record.
const MEMBER_KEYS: &[&str] = &["name", "email", "role", "skills", "hourly_rate"];

/// Roster and history held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub members: Vec<TeamMember>,
    pub projects: Vec<HistoricalProject>,
}

impl InMemorySource {
    pub fn new(members: Vec<TeamMember>, projects: Vec<HistoricalProject>) -> Self {
        Self { members, projects }
    }
}

impl RosterProvider for InMemorySource {
    fn team_members(&self) -> Vec<TeamMember> {
        self.members.clone()
    }
}

impl ProjectHistory for InMemorySource {
    fn all_projects(&self) -> Vec<HistoricalProject> {
        self.projects.clone()
    }
}

// ---------------------------------------------------------------------------
// JSON folder
// ---------------------------------------------------------------------------

/// Roster and history loaded once from the `*.json` files of a folder.
///
/// A file is classified by name first, in this order: `project` (or a
/// top-level `project` key) makes every object in it a project; `task` (or a
/// top-level `task` key) marks it a task file, which is skipped; `team` or
/// `member` makes roster entries; `skill`, `estimate` and `performance`
/// files are skipped. Other files are classified object by object from
/// their keys. Files that cannot be read or parsed are logged and skipped.
#[derive(Debug, Clone, Default)]
pub struct JsonFolderSource {
    inner: InMemorySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Projects,
    Members,
    Ignored,
    ByContent,
}

/// File-name fragments for files that hold neither roster nor history.
const IGNORED_FILE_KINDS: &[&str] = &["skill", "estimate", "performance"];

impl JsonFolderSource {
    pub fn load(dir: &Path) -> SourceResult<Self> {
        if !dir.is_dir() {
            return Err(SourceError::NotFound {
                path: dir.display().to_string(),
            });
        }
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut files: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // Directory order is platform dependent.
        files.sort();

        let mut source = Self::default();
        for path in &files {
            let value = match read_json(path) {
                Ok(value) => value,
                Err(message) => {
                    tracing::warn!(path = %path.display(), error = %message, "skipping unreadable source file");
                    continue;
                }
            };
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            source.absorb(&file_name, value);
        }

        tracing::info!(
            dir = %dir.display(),
            files = files.len(),
            members = source.inner.members.len(),
            projects = source.inner.projects.len(),
            "loaded data source folder"
        );
        Ok(source)
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.inner.members
    }

    pub fn projects(&self) -> &[HistoricalProject] {
        &self.inner.projects
    }

    fn absorb(&mut self, file_name: &str, value: Value) {
        let has_top_level = |key: &str| value.as_object().is_some_and(|o| o.contains_key(key));
        let category = if file_name.contains("project") || has_top_level("project") {
            Category::Projects
        } else if file_name.contains("task") || has_top_level("task") {
            Category::Ignored
        } else if file_name.contains("team") || file_name.contains("member") {
            Category::Members
        } else if IGNORED_FILE_KINDS.iter().any(|kind| file_name.contains(kind)) {
            Category::Ignored
        } else {
            Category::ByContent
        };
        if category == Category::Ignored {
            tracing::debug!(file = file_name, "skipping file without roster or history data");
            return;
        }

        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        for item in items {
            let category = match category {
                Category::ByContent => match classify(&item) {
                    Some(c) => c,
                    None => continue,
                },
                fixed => fixed,
            };
            match category {
                Category::Projects => push_record(&mut self.inner.projects, item, file_name),
                Category::Members => push_record(&mut self.inner.members, item, file_name),
                Category::Ignored | Category::ByContent => {}
            }
        }
    }
}

impl RosterProvider for JsonFolderSource {
    fn team_members(&self) -> Vec<TeamMember> {
        self.inner.team_members()
    }
}

impl ProjectHistory for JsonFolderSource {
    fn all_projects(&self) -> Vec<HistoricalProject> {
        self.inner.all_projects()
    }
}

fn read_json(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

/// Category of a single object from its keys, or `None` for anything that
/// is neither a project nor a team member.
fn classify(item: &Value) -> Option<Category> {
    let object = item.as_object()?;
    let has_any = |keys: &[&str]| keys.iter().any(|k| object.contains_key(*k));
    if has_any(PROJECT_KEYS) {
        Some(Category::Projects)
    } else if has_any(TASK_KEYS) {
        None
    } else if has_any(MEMBER_KEYS) {
        Some(Category::Members)
    } else {
        None
    }
}

fn push_record<T: DeserializeOwned>(records: &mut Vec<T>, item: Value, file_name: &str) {
    match serde_json::from_value(item) {
        Ok(record) => records.push(record),
        Err(e) => tracing::warn!(file = file_name, error = %e, "skipping malformed record"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn missing_folder_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = JsonFolderSource::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[test]
    fn categorizes_by_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        write(
            dir.path(),
            "projects.json",
            r#"[{"project_name": "Shop", "technologies": ["react"], "actual_hours": 150}]"#,
        );
        write(
            dir.path(),
            "team.json",
            r#"[{"name": "Ada", "skills": ["react"], "hourly_rate": 80}]"#,
        );

        let source = JsonFolderSource::load(dir.path()).unwrap();
        assert_eq!(source.projects().len(), 1);
        assert_eq!(source.projects()[0].display_name(), "Shop");
        assert_eq!(source.members().len(), 1);
        assert_eq!(source.team_members()[0].name, "Ada");
    }

    #[test]
    fn categorizes_by_content_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        write(
            dir.path(),
            "export.json",
            r#"[
                {"project_name": "Blog", "description": "personal blog"},
                {"task_name": "Write copy", "assignee": "Bo"},
                {"name": "Bo", "email": "bo@example.com", "skills": "design"},
                {"unrelated": true}
            ]"#,
        );

        let source = JsonFolderSource::load(dir.path()).unwrap();
        assert_eq!(source.projects().len(), 1);
        assert_eq!(source.members().len(), 1);
        assert_eq!(source.members()[0].skills, vec!["design"]);
    }

    #[test]
    fn task_and_skill_files_are_not_history_or_roster() {
        let dir = tempfile::TempDir::new().unwrap();
        write(
            dir.path(),
            "tasks.json",
            r#"[
                {"task_name": "Landing page", "project_name": "Acme Site", "status": "done"},
                {"task_name": "Checkout", "project_name": "Acme Site", "status": "open"}
            ]"#,
        );
        write(
            dir.path(),
            "team_tasks.json",
            r#"[{"task_name": "Review", "name": "QA pass"}]"#,
        );
        write(
            dir.path(),
            "skills.json",
            r#"[{"name": "React", "category": "frontend"}]"#,
        );
        write(
            dir.path(),
            "estimates.json",
            r#"[{"project_name": "Old quote", "estimated_hours": 40}]"#,
        );
        write(
            dir.path(),
            "export.json",
            r#"{"task": {"name": "Deploy"}, "name": "Deploy"}"#,
        );

        let source = JsonFolderSource::load(dir.path()).unwrap();
        assert!(source.projects().is_empty());
        assert!(source.members().is_empty());
    }

    #[test]
    fn project_name_wins_over_task_name() {
        let dir = tempfile::TempDir::new().unwrap();
        write(
            dir.path(),
            "project_tasks.json",
            r#"[{"project_name": "Acme Site", "description": "shop"}]"#,
        );

        let source = JsonFolderSource::load(dir.path()).unwrap();
        assert_eq!(source.projects().len(), 1);
    }

    #[test]
    fn bad_files_are_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        write(dir.path(), "broken.json", "{ nope");
        write(dir.path(), "notes.txt", "not json at all");
        write(dir.path(), "members.json", r#"{"name": "Cy", "skills": ["go"]}"#);

        let source = JsonFolderSource::load(dir.path()).unwrap();
        assert_eq!(source.members().len(), 1);
        assert!(source.projects().is_empty());
    }

    #[test]
    fn in_memory_source_clones_out() {
        let source = InMemorySource::new(vec![TeamMember::new("Ada", &["react"], 80.0)], vec![]);
        assert_eq!(source.team_members().len(), 1);
        assert!(source.all_projects().is_empty());
    }
}
