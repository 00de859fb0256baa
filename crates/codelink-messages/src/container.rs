use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A compiler-invocation descriptor: one argument vector per logical build
/// target, keyed by an opaque identifier.
///
/// Identity is the `project_part_id` alone — two parts with the same id but
/// different arguments compare equal, and ordering is lexicographic on the
/// id. The sender owns the lifecycle; receivers reconstruct parts fresh
/// from each message.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProjectPart {
    pub project_part_id: String,
    pub arguments: Vec<String>,
}

impl ProjectPart {
    pub fn new(project_part_id: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            project_part_id: project_part_id.into(),
            arguments,
        }
    }
}

impl PartialEq for ProjectPart {
    fn eq(&self, other: &Self) -> bool {
        self.project_part_id == other.project_part_id
    }
}

impl Eq for ProjectPart {}

impl PartialOrd for ProjectPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectPart {
    fn cmp(&self, other: &Self) -> Ordering {
        self.project_part_id.cmp(&other.project_part_id)
    }
}

impl Hash for ProjectPart {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.project_part_id.hash(state);
    }
}

impl fmt::Debug for ProjectPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .arguments
            .iter()
            .map(|arg| format!("\"{arg}\""))
            .collect();
        write!(
            f,
            "ProjectPart({}, [{}])",
            self.project_part_id,
            quoted.join(" ")
        )
    }
}

/// A translation unit or unsaved file as seen by the frontend editor.
///
/// `unsaved_content` is `Some` when the editor buffer differs from the file
/// on disk; `document_revision` lets the backend discard results computed
/// against a stale buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContainer {
    pub file_path: String,
    pub project_part_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsaved_content: Option<String>,
    pub document_revision: u32,
}

impl FileContainer {
    pub fn new(
        file_path: impl Into<String>,
        project_part_id: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            project_part_id: project_part_id.into(),
            unsaved_content: None,
            document_revision: 0,
        }
    }

    /// Attach an unsaved editor buffer at the given revision.
    pub fn with_unsaved_content(mut self, content: impl Into<String>, revision: u32) -> Self {
        self.unsaved_content = Some(content.into());
        self.document_revision = revision;
        self
    }

    /// True when the container carries editor-buffer content.
    pub fn has_unsaved_content(&self) -> bool {
        self.unsaved_content.is_some()
    }
}
