use bytes::{BufMut, BytesMut};

use crate::error::{CodecError, Result};
use crate::message::{MessageTag, TaggedMessage};

/// Outcome of decoding one message payload.
///
/// Tags outside the catalog decode to [`DecodedMessage::Unknown`] instead
/// of failing, so an older endpoint tolerates message kinds added by a
/// newer protocol version. A malformed body under a known tag is still a
/// hard [`CodecError`] — the frame boundary was trusted, the content is
/// not recoverable.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    Known(TaggedMessage),
    Unknown { tag: u8 },
}

/// Encode one message as `tag byte + JSON body` into `dst`.
///
/// Bodyless kinds (`Alive`, `End`) encode as the tag byte alone.
pub fn encode_message(message: &TaggedMessage, dst: &mut BytesMut) -> Result<()> {
    dst.put_u8(message.tag().as_raw());
    match message {
        TaggedMessage::Alive | TaggedMessage::End => {}
        TaggedMessage::RegisterTranslationUnits(body) => put_body(body, dst)?,
        TaggedMessage::UpdateTranslationUnits(body) => put_body(body, dst)?,
        TaggedMessage::UnregisterTranslationUnits(body) => put_body(body, dst)?,
        TaggedMessage::RegisterProjectParts(body) => put_body(body, dst)?,
        TaggedMessage::UnregisterProjectParts(body) => put_body(body, dst)?,
        TaggedMessage::RegisterUnsavedFiles(body) => put_body(body, dst)?,
        TaggedMessage::UnregisterUnsavedFiles(body) => put_body(body, dst)?,
        TaggedMessage::CompleteCode(body) => put_body(body, dst)?,
        TaggedMessage::RequestDiagnostics(body) => put_body(body, dst)?,
        TaggedMessage::RequestHighlighting(body) => put_body(body, dst)?,
        TaggedMessage::UpdateVisibleTranslationUnits(body) => put_body(body, dst)?,
    }
    Ok(())
}

fn put_body<T: serde::Serialize>(body: &T, dst: &mut BytesMut) -> Result<()> {
    let encoded = serde_json::to_vec(body)?;
    dst.put_slice(&encoded);
    Ok(())
}

/// Decode one message payload (tag byte + body).
pub fn decode_message(payload: &[u8]) -> Result<DecodedMessage> {
    let (&raw, body) = payload.split_first().ok_or(CodecError::EmptyPayload)?;

    let Some(tag) = MessageTag::from_raw(raw) else {
        return Ok(DecodedMessage::Unknown { tag: raw });
    };

    let message = match tag {
        MessageTag::Alive | MessageTag::End => {
            if !body.is_empty() {
                return Err(CodecError::UnexpectedBody {
                    tag: raw,
                    len: body.len(),
                });
            }
            match tag {
                MessageTag::Alive => TaggedMessage::Alive,
                _ => TaggedMessage::End,
            }
        }
        MessageTag::RegisterTranslationUnits => {
            TaggedMessage::RegisterTranslationUnits(take_body(raw, body)?)
        }
        MessageTag::UpdateTranslationUnits => {
            TaggedMessage::UpdateTranslationUnits(take_body(raw, body)?)
        }
        MessageTag::UnregisterTranslationUnits => {
            TaggedMessage::UnregisterTranslationUnits(take_body(raw, body)?)
        }
        MessageTag::RegisterProjectParts => {
            TaggedMessage::RegisterProjectParts(take_body(raw, body)?)
        }
        MessageTag::UnregisterProjectParts => {
            TaggedMessage::UnregisterProjectParts(take_body(raw, body)?)
        }
        MessageTag::RegisterUnsavedFiles => {
            TaggedMessage::RegisterUnsavedFiles(take_body(raw, body)?)
        }
        MessageTag::UnregisterUnsavedFiles => {
            TaggedMessage::UnregisterUnsavedFiles(take_body(raw, body)?)
        }
        MessageTag::CompleteCode => TaggedMessage::CompleteCode(take_body(raw, body)?),
        MessageTag::RequestDiagnostics => TaggedMessage::RequestDiagnostics(take_body(raw, body)?),
        MessageTag::RequestHighlighting => {
            TaggedMessage::RequestHighlighting(take_body(raw, body)?)
        }
        MessageTag::UpdateVisibleTranslationUnits => {
            TaggedMessage::UpdateVisibleTranslationUnits(take_body(raw, body)?)
        }
    };

    Ok(DecodedMessage::Known(message))
}

fn take_body<T: serde::de::DeserializeOwned>(tag: u8, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| CodecError::MalformedBody { tag, source })
}
