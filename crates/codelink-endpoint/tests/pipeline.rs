//! End-to-end pipeline: FrameWriter → byte stream → FrameReader →
//! dispatch, over a Unix socket pair, the way an IDE frontend and a
//! code-model backend would actually run it.

#![cfg(unix)]

use std::io::Read;
use std::os::unix::net::UnixStream;

use codelink_endpoint::{dispatch, ClientFanout, DispatchOutcome, MessageHandler, MessageSink};
use codelink_frame::{FrameReader, FrameWriter};
use codelink_messages::{
    CompleteCode, FileContainer, MessageTag, ProjectPart, RegisterProjectParts,
    RegisterTranslationUnits, RegisterUnsavedFiles, RequestDiagnostics, RequestHighlighting,
    TaggedMessage, UnregisterProjectParts, UnregisterTranslationUnits, UnregisterUnsavedFiles,
    UpdateTranslationUnits, UpdateVisibleTranslationUnits,
};

#[derive(Default)]
struct TagLog {
    tags: Vec<MessageTag>,
    last_completion: Option<CompleteCode>,
    ended: bool,
}

impl MessageHandler for TagLog {
    fn alive(&mut self) {
        self.tags.push(MessageTag::Alive);
    }
    fn register_translation_units(&mut self, _message: RegisterTranslationUnits) {
        self.tags.push(MessageTag::RegisterTranslationUnits);
    }
    fn update_translation_units(&mut self, _message: UpdateTranslationUnits) {
        self.tags.push(MessageTag::UpdateTranslationUnits);
    }
    fn unregister_translation_units(&mut self, _message: UnregisterTranslationUnits) {
        self.tags.push(MessageTag::UnregisterTranslationUnits);
    }
    fn register_project_parts(&mut self, _message: RegisterProjectParts) {
        self.tags.push(MessageTag::RegisterProjectParts);
    }
    fn unregister_project_parts(&mut self, _message: UnregisterProjectParts) {
        self.tags.push(MessageTag::UnregisterProjectParts);
    }
    fn register_unsaved_files(&mut self, _message: RegisterUnsavedFiles) {
        self.tags.push(MessageTag::RegisterUnsavedFiles);
    }
    fn unregister_unsaved_files(&mut self, _message: UnregisterUnsavedFiles) {
        self.tags.push(MessageTag::UnregisterUnsavedFiles);
    }
    fn complete_code(&mut self, message: CompleteCode) {
        self.tags.push(MessageTag::CompleteCode);
        self.last_completion = Some(message);
    }
    fn request_diagnostics(&mut self, _message: RequestDiagnostics) {
        self.tags.push(MessageTag::RequestDiagnostics);
    }
    fn request_highlighting(&mut self, _message: RequestHighlighting) {
        self.tags.push(MessageTag::RequestHighlighting);
    }
    fn update_visible_translation_units(&mut self, _message: UpdateVisibleTranslationUnits) {
        self.tags.push(MessageTag::UpdateVisibleTranslationUnits);
    }
    fn end(&mut self) {
        self.tags.push(MessageTag::End);
        self.ended = true;
    }
}

fn editor_session() -> Vec<TaggedMessage> {
    let main = FileContainer::new("/project/src/main.cpp", "app").with_unsaved_content(
        "int main() { return 0; }",
        1,
    );
    vec![
        TaggedMessage::RegisterProjectParts(RegisterProjectParts {
            project_parts: vec![ProjectPart::new(
                "app",
                vec!["-std=c++17".into(), "-I/project/include".into()],
            )],
        }),
        TaggedMessage::RegisterTranslationUnits(RegisterTranslationUnits {
            file_containers: vec![main.clone()],
        }),
        TaggedMessage::RegisterUnsavedFiles(RegisterUnsavedFiles {
            file_containers: vec![main.clone()],
        }),
        TaggedMessage::CompleteCode(CompleteCode {
            file_path: main.file_path.clone(),
            line: 1,
            column: 14,
            project_part_id: "app".into(),
        }),
        TaggedMessage::RequestDiagnostics(RequestDiagnostics { file: main }),
        TaggedMessage::End,
    ]
}

fn pump(stream: &mut UnixStream, reader: &mut FrameReader, handler: &mut TagLog) {
    let mut chunk = [0u8; 256];
    while !handler.ended {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "stream closed before End message");
        reader.feed(&chunk[..n]);
        for received in reader.read_all().unwrap() {
            assert_eq!(received.gap, None);
            assert_eq!(
                dispatch(handler, received.message),
                DispatchOutcome::Dispatched
            );
        }
    }
}

#[test]
fn session_flows_from_writer_to_handler() {
    let (frontend, mut backend) = UnixStream::pair().unwrap();
    let session = editor_session();
    let expected: Vec<MessageTag> = session.iter().map(TaggedMessage::tag).collect();

    let writer_thread = std::thread::spawn(move || {
        let mut writer = FrameWriter::new(frontend);
        for message in &session {
            writer.write(message).unwrap();
        }
    });

    let mut reader = FrameReader::new();
    let mut handler = TagLog::default();
    pump(&mut backend, &mut reader, &mut handler);
    writer_thread.join().unwrap();

    assert_eq!(handler.tags, expected);
    let completion = handler.last_completion.unwrap();
    assert_eq!(completion.line, 1);
    assert_eq!(completion.column, 14);
    assert_eq!(completion.project_part_id, "app");
}

#[test]
fn fanout_mirrors_backend_output_to_observers() {
    // A backend broadcasting through a fanout to two frontends: both
    // connections must see the identical, independently-sequenced stream.
    let (left_a, mut right_a) = UnixStream::pair().unwrap();
    let (left_b, mut right_b) = UnixStream::pair().unwrap();

    let fanout = ClientFanout::new();
    fanout.add_sink(Box::new(FrameWriter::new(left_a)));
    fanout.add_sink(Box::new(FrameWriter::new(left_b)));

    fanout.broadcast(&TaggedMessage::Alive);
    fanout.broadcast(&TaggedMessage::End);
    drop(fanout);

    for stream in [&mut right_a, &mut right_b] {
        let mut wire = Vec::new();
        stream.read_to_end(&mut wire).unwrap();

        let mut reader = FrameReader::new();
        reader.feed(&wire);
        let mut handler = TagLog::default();
        for received in reader.read_all().unwrap() {
            assert_eq!(received.gap, None);
            dispatch(&mut handler, received.message);
        }
        assert_eq!(handler.tags, vec![MessageTag::Alive, MessageTag::End]);
    }
}

#[test]
fn backend_restart_is_forgiven_after_counter_reset() {
    let (frontend, mut backend) = UnixStream::pair().unwrap();
    let mut reader = FrameReader::new();
    let mut handler = TagLog::default();

    {
        let mut writer = FrameWriter::new(frontend.try_clone().unwrap());
        writer.write(&TaggedMessage::Alive).unwrap();
        writer.write(&TaggedMessage::End).unwrap();
    }
    pump(&mut backend, &mut reader, &mut handler);

    // The remote process restarts: a fresh writer sequences from 0 again.
    reader.reset_sequence_counter();
    handler.ended = false;
    {
        let mut writer = FrameWriter::new(frontend);
        writer.write(&TaggedMessage::Alive).unwrap();
        writer.write(&TaggedMessage::End).unwrap();
    }
    pump(&mut backend, &mut reader, &mut handler);

    assert_eq!(
        handler.tags,
        vec![
            MessageTag::Alive,
            MessageTag::End,
            MessageTag::Alive,
            MessageTag::End
        ]
    );
}

#[test]
fn fanout_send_trait_drives_frame_writers() {
    let (left, mut right) = UnixStream::pair().unwrap();
    let mut fanout = ClientFanout::new();
    fanout.add_sink(Box::new(FrameWriter::new(left)));

    MessageSink::send(&mut fanout, &TaggedMessage::Alive).unwrap();
    drop(fanout);

    let mut wire = Vec::new();
    right.read_to_end(&mut wire).unwrap();
    assert!(!wire.is_empty());
}
