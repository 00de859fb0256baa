use codelink_messages::{
    CompleteCode, DecodedMessage, RegisterProjectParts, RegisterTranslationUnits,
    RegisterUnsavedFiles, RequestDiagnostics, RequestHighlighting, TaggedMessage,
    UnregisterProjectParts, UnregisterTranslationUnits, UnregisterUnsavedFiles,
    UpdateTranslationUnits, UpdateVisibleTranslationUnits,
};

/// The capability set an embedding application supplies to receive
/// messages: one method per catalog kind.
///
/// Handlers run on whatever thread drives dispatch and must not assume
/// reentrancy into the dispatcher.
pub trait MessageHandler {
    fn alive(&mut self);
    fn register_translation_units(&mut self, message: RegisterTranslationUnits);
    fn update_translation_units(&mut self, message: UpdateTranslationUnits);
    fn unregister_translation_units(&mut self, message: UnregisterTranslationUnits);
    fn register_project_parts(&mut self, message: RegisterProjectParts);
    fn unregister_project_parts(&mut self, message: UnregisterProjectParts);
    fn register_unsaved_files(&mut self, message: RegisterUnsavedFiles);
    fn unregister_unsaved_files(&mut self, message: UnregisterUnsavedFiles);
    fn complete_code(&mut self, message: CompleteCode);
    fn request_diagnostics(&mut self, message: RequestDiagnostics);
    fn request_highlighting(&mut self, message: RequestHighlighting);
    fn update_visible_translation_units(&mut self, message: UpdateVisibleTranslationUnits);
    fn end(&mut self);
}

/// What [`dispatch`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The message matched a catalog kind and its handler ran.
    Dispatched,
    /// The tag is outside this build's catalog; the message was dropped.
    Unhandled { tag: u8 },
}

/// Route one decoded message to the matching handler method.
///
/// Tags outside the catalog (a newer protocol version talking to this
/// build) are warned and dropped rather than failing, so additive
/// protocol evolution degrades gracefully. Dispatch is synchronous and
/// performs no I/O of its own.
pub fn dispatch<H: MessageHandler>(handler: &mut H, decoded: DecodedMessage) -> DispatchOutcome {
    let message = match decoded {
        DecodedMessage::Known(message) => message,
        DecodedMessage::Unknown { tag } => {
            tracing::warn!(tag, "dropping message with unknown tag");
            return DispatchOutcome::Unhandled { tag };
        }
    };

    match message {
        TaggedMessage::Alive => handler.alive(),
        TaggedMessage::RegisterTranslationUnits(body) => handler.register_translation_units(body),
        TaggedMessage::UpdateTranslationUnits(body) => handler.update_translation_units(body),
        TaggedMessage::UnregisterTranslationUnits(body) => {
            handler.unregister_translation_units(body)
        }
        TaggedMessage::RegisterProjectParts(body) => handler.register_project_parts(body),
        TaggedMessage::UnregisterProjectParts(body) => handler.unregister_project_parts(body),
        TaggedMessage::RegisterUnsavedFiles(body) => handler.register_unsaved_files(body),
        TaggedMessage::UnregisterUnsavedFiles(body) => handler.unregister_unsaved_files(body),
        TaggedMessage::CompleteCode(body) => handler.complete_code(body),
        TaggedMessage::RequestDiagnostics(body) => handler.request_diagnostics(body),
        TaggedMessage::RequestHighlighting(body) => handler.request_highlighting(body),
        TaggedMessage::UpdateVisibleTranslationUnits(body) => {
            handler.update_visible_translation_units(body)
        }
        TaggedMessage::End => handler.end(),
    }

    DispatchOutcome::Dispatched
}
