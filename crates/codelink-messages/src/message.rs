use serde::{Deserialize, Serialize};

use crate::container::{FileContainer, ProjectPart};

/// Wire discriminant for each message kind.
///
/// Tag values are part of the wire protocol and must never be reordered;
/// new kinds append at the end on both sides of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageTag {
    Alive = 0,
    RegisterTranslationUnits = 1,
    UpdateTranslationUnits = 2,
    UnregisterTranslationUnits = 3,
    RegisterProjectParts = 4,
    UnregisterProjectParts = 5,
    RegisterUnsavedFiles = 6,
    UnregisterUnsavedFiles = 7,
    CompleteCode = 8,
    RequestDiagnostics = 9,
    RequestHighlighting = 10,
    UpdateVisibleTranslationUnits = 11,
    End = 12,
}

impl MessageTag {
    /// Map a raw tag byte to a known kind, or `None` for tags this build
    /// does not know about (e.g. a newer protocol version).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Alive),
            1 => Some(Self::RegisterTranslationUnits),
            2 => Some(Self::UpdateTranslationUnits),
            3 => Some(Self::UnregisterTranslationUnits),
            4 => Some(Self::RegisterProjectParts),
            5 => Some(Self::UnregisterProjectParts),
            6 => Some(Self::RegisterUnsavedFiles),
            7 => Some(Self::UnregisterUnsavedFiles),
            8 => Some(Self::CompleteCode),
            9 => Some(Self::RequestDiagnostics),
            10 => Some(Self::RequestHighlighting),
            11 => Some(Self::UpdateVisibleTranslationUnits),
            12 => Some(Self::End),
            _ => None,
        }
    }

    /// The raw wire value of this tag.
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Announce translation units the backend should start tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterTranslationUnits {
    pub file_containers: Vec<FileContainer>,
}

/// Refresh the content/revision of already registered translation units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTranslationUnits {
    pub file_containers: Vec<FileContainer>,
}

/// Stop tracking the given translation units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnregisterTranslationUnits {
    pub file_containers: Vec<FileContainer>,
}

/// Announce project parts (compiler invocations) to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterProjectParts {
    pub project_parts: Vec<ProjectPart>,
}

/// Drop project parts by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnregisterProjectParts {
    pub project_part_ids: Vec<String>,
}

/// Supply unsaved editor buffers for files the backend analyzes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUnsavedFiles {
    pub file_containers: Vec<FileContainer>,
}

/// Revert to on-disk content for the given files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnregisterUnsavedFiles {
    pub file_containers: Vec<FileContainer>,
}

/// Request code completion at a cursor position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteCode {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
    pub project_part_id: String,
}

/// Request diagnostics for one translation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDiagnostics {
    pub file: FileContainer,
}

/// Request semantic highlighting for one translation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestHighlighting {
    pub file: FileContainer,
}

/// Tell the backend which editors are visible so it can prioritize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateVisibleTranslationUnits {
    pub current_editor_file_path: String,
    pub visible_editor_file_paths: Vec<String>,
}

/// The closed catalog of messages exchanged between frontend and backend.
///
/// One variant per kind; each owns exactly the fields that kind needs.
/// Extending the catalog is a code change on both ends of the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedMessage {
    /// Liveness probe; carries no payload.
    Alive,
    RegisterTranslationUnits(RegisterTranslationUnits),
    UpdateTranslationUnits(UpdateTranslationUnits),
    UnregisterTranslationUnits(UnregisterTranslationUnits),
    RegisterProjectParts(RegisterProjectParts),
    UnregisterProjectParts(UnregisterProjectParts),
    RegisterUnsavedFiles(RegisterUnsavedFiles),
    UnregisterUnsavedFiles(UnregisterUnsavedFiles),
    CompleteCode(CompleteCode),
    RequestDiagnostics(RequestDiagnostics),
    RequestHighlighting(RequestHighlighting),
    UpdateVisibleTranslationUnits(UpdateVisibleTranslationUnits),
    /// Orderly shutdown of the channel; carries no payload.
    End,
}

impl TaggedMessage {
    /// The wire tag of this message.
    pub fn tag(&self) -> MessageTag {
        match self {
            Self::Alive => MessageTag::Alive,
            Self::RegisterTranslationUnits(_) => MessageTag::RegisterTranslationUnits,
            Self::UpdateTranslationUnits(_) => MessageTag::UpdateTranslationUnits,
            Self::UnregisterTranslationUnits(_) => MessageTag::UnregisterTranslationUnits,
            Self::RegisterProjectParts(_) => MessageTag::RegisterProjectParts,
            Self::UnregisterProjectParts(_) => MessageTag::UnregisterProjectParts,
            Self::RegisterUnsavedFiles(_) => MessageTag::RegisterUnsavedFiles,
            Self::UnregisterUnsavedFiles(_) => MessageTag::UnregisterUnsavedFiles,
            Self::CompleteCode(_) => MessageTag::CompleteCode,
            Self::RequestDiagnostics(_) => MessageTag::RequestDiagnostics,
            Self::RequestHighlighting(_) => MessageTag::RequestHighlighting,
            Self::UpdateVisibleTranslationUnits(_) => MessageTag::UpdateVisibleTranslationUnits,
            Self::End => MessageTag::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_tags_roundtrip() {
        for raw in 0u8..=12 {
            let tag = MessageTag::from_raw(raw).unwrap();
            assert_eq!(tag.as_raw(), raw);
        }
    }

    #[test]
    fn unknown_raw_tags_map_to_none() {
        assert_eq!(MessageTag::from_raw(13), None);
        assert_eq!(MessageTag::from_raw(0xFF), None);
    }

    #[test]
    fn message_reports_its_tag() {
        assert_eq!(TaggedMessage::Alive.tag(), MessageTag::Alive);
        assert_eq!(TaggedMessage::End.tag(), MessageTag::End);

        let msg = TaggedMessage::CompleteCode(CompleteCode {
            file_path: "/src/a.cpp".into(),
            line: 10,
            column: 4,
            project_part_id: "p".into(),
        });
        assert_eq!(msg.tag(), MessageTag::CompleteCode);
    }
}
