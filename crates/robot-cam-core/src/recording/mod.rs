mod command;
pub(crate) mod recorder;

pub use {
    command::Command,
    recorder::{Recorder, RecordingSummary, Transition, recording_file_name},
};
