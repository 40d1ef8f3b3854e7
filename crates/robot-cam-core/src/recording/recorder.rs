//! Recording state machine.
//!
//! A [`Recorder`] is either idle or owns exactly one open output file. The
//! file handle lives inside `Option<ActiveRecording>`, so "at most one open
//! recording" holds by construction.

use crate::{Command, CoreError, CoreResult};

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    panic::Location,
    path::{Path, PathBuf},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// File name for a recording started at `unix_secs`.
pub fn recording_file_name(unix_secs: u64) -> String {
    format!("recording_{unix_secs}.h264")
}

/// Outcome of applying a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Idle to Recording: a new file was opened.
    Started {
        /// Session ID for log correlation.
        session_id: Uuid,
        /// Path of the new recording file.
        path: PathBuf,
    },
    /// Recording to Idle: the file was flushed and closed.
    Stopped(RecordingSummary),
    /// The command matched the current state.
    Unchanged,
}

/// Totals for a finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSummary {
    /// Session ID for log correlation.
    pub session_id: Uuid,
    /// Path of the closed recording file.
    pub path: PathBuf,
    /// Bytes appended to the file.
    pub bytes_written: u64,
    /// Number of bitstream chunks appended.
    pub chunks: u64,
    /// Time between open and close.
    pub duration: Duration,
}

struct ActiveRecording {
    session_id: Uuid,
    path: PathBuf,
    writer: BufWriter<File>,
    started_at: Instant,
    bytes_written: u64,
    chunks: u64,
}

impl ActiveRecording {
    #[track_caller]
    fn finish(mut self) -> CoreResult<RecordingSummary> {
        let result = self
            .writer
            .flush()
            .and_then(|()| self.writer.get_ref().sync_all());

        let summary = RecordingSummary {
            session_id: self.session_id,
            path: self.path.clone(),
            bytes_written: self.bytes_written,
            chunks: self.chunks,
            duration: self.started_at.elapsed(),
        };

        result.map_err(|source| CoreError::RecordingClose {
            path: summary.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(summary)
    }
}

impl Drop for ActiveRecording {
    fn drop(&mut self) {
        // Best effort: the file handle itself is released regardless.
        if let Err(e) = self.writer.flush() {
            warn!(path = ?self.path, error = %e, "Failed to flush recording on drop");
        }
    }
}

/// Owns the recording state and the output file of the current session.
pub struct Recorder {
    output_dir: PathBuf,
    active: Option<ActiveRecording>,
}

impl Recorder {
    /// Create an idle recorder writing into `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            active: None,
        }
    }

    /// Whether a recording file is currently open.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Path of the open recording, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    /// Apply a start or stop command.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RecordingOpen`] if a new file cannot be created
    /// (the recorder stays idle), or [`CoreError::RecordingClose`] if the
    /// final flush fails (the recorder is idle afterwards either way).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: Command) -> CoreResult<Transition> {
        match command {
            Command::Start => self.start_at(unix_now()),
            Command::Stop => self.stop(),
        }
    }

    #[track_caller]
    pub(crate) fn start_at(&mut self, unix_secs: u64) -> CoreResult<Transition> {
        if let Some(active) = &self.active {
            debug!(session_id = %active.session_id, "Start ignored, already recording");
            return Ok(Transition::Unchanged);
        }

        let path = self.output_dir.join(recording_file_name(unix_secs));

        let open_error = |source: std::io::Error| CoreError::RecordingOpen {
            path: path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        fs::create_dir_all(&self.output_dir).map_err(open_error)?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(open_error)?;

        let session_id = Uuid::new_v4();

        self.active = Some(ActiveRecording {
            session_id,
            path: path.clone(),
            writer: BufWriter::new(file),
            started_at: Instant::now(),
            bytes_written: 0,
            chunks: 0,
        });

        info!(session_id = %session_id, path = ?path, "Recording started");

        Ok(Transition::Started { session_id, path })
    }

    #[track_caller]
    fn stop(&mut self) -> CoreResult<Transition> {
        let Some(active) = self.active.take() else {
            debug!("Stop ignored, not recording");
            return Ok(Transition::Unchanged);
        };

        let summary = active.finish()?;

        info!(
            session_id = %summary.session_id,
            path = ?summary.path,
            bytes_written = summary.bytes_written,
            chunks = summary.chunks,
            duration_ms = summary.duration.as_millis(),
            "Recording stopped"
        );

        Ok(Transition::Stopped(summary))
    }

    /// Append one bitstream chunk to the open recording.
    ///
    /// Does nothing while idle.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RecordingWrite`] if the write fails. The session
    /// is aborted first: the file is closed and the recorder is idle.
    #[track_caller]
    pub fn write_chunk(&mut self, chunk: &[u8]) -> CoreResult<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        if let Err(source) = active.writer.write_all(chunk) {
            let path = active.path.clone();
            let session_id = active.session_id;
            self.active = None;

            warn!(session_id = %session_id, path = ?path, "Recording aborted after write failure");

            return Err(CoreError::RecordingWrite {
                path,
                source,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        active.bytes_written += chunk.len() as u64;
        active.chunks += 1;

        Ok(())
    }

    /// Redirect the open recording to `file`, e.g. a device that rejects writes.
    #[cfg(test)]
    pub(crate) fn redirect_active_output(&mut self, file: File) {
        if let Some(active) = self.active.as_mut() {
            active.writer = BufWriter::new(file);
        }
    }

    /// Close any open recording. Used on shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RecordingClose`] if the final flush fails.
    #[track_caller]
    pub fn close(&mut self) -> CoreResult<Option<RecordingSummary>> {
        match self.stop()? {
            Transition::Stopped(summary) => Ok(Some(summary)),
            Transition::Started { .. } | Transition::Unchanged => Ok(None),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
