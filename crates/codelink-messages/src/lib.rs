//! Message catalog and payload codec for the codelink protocol.
//!
//! The catalog is a closed set of message kinds shared by the IDE frontend
//! and the code-model backend. Every kind has a fixed tag byte; payloads
//! are JSON-encoded behind the tag so the discriminant is readable before
//! any field is decoded.
//!
//! This crate is pure data and encoding — no I/O. Framing lives in
//! `codelink-frame`.

pub mod codec;
pub mod container;
pub mod error;
pub mod message;

pub use codec::{decode_message, encode_message, DecodedMessage};
pub use container::{FileContainer, ProjectPart};
pub use error::{CodecError, Result};
pub use message::{
    CompleteCode, MessageTag, RegisterProjectParts, RegisterTranslationUnits,
    RegisterUnsavedFiles, RequestDiagnostics, RequestHighlighting, TaggedMessage,
    UnregisterProjectParts, UnregisterTranslationUnits, UnregisterUnsavedFiles,
    UpdateTranslationUnits, UpdateVisibleTranslationUnits,
};
