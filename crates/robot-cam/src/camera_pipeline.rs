//! Camera bitstream source.
//!
//! The encoder runs as a child process writing a raw H.264 elementary stream
//! to stdout. Each retrieval is one read from that pipe; while nothing reads,
//! the pipe fills and the encoder blocks, like a bounded blocking queue.

use crate::{AppError, AppResult, config::CameraConfig};

use std::{panic::Location, process::Stdio, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    io::AsyncReadExt,
    process::{Child, ChildStdout, Command},
};
use tracing::{debug, info, instrument, warn};

/// Pull-style source of encoded video chunks.
pub(crate) trait BitstreamSource {
    /// Wait for the next chunk. Never returns an empty chunk.
    async fn next_chunk(&mut self) -> AppResult<Vec<u8>>;

    /// Check that the source is still producing, without reading from it.
    /// Called on idle iterations.
    fn check_alive(&mut self) -> AppResult<()>;
}

/// Running encoder process and its output pipe.
///
/// The child is killed when the pipeline is dropped.
pub struct CameraPipeline {
    child: Child,
    stdout: ChildStdout,
    buf: Vec<u8>,
}

impl CameraPipeline {
    /// Start the encoder and wait for its first chunk.
    ///
    /// The first chunk is discarded: it predates any recording.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HardwareUnavailable`] if the encoder cannot be
    /// spawned, exits, or produces nothing within
    /// [`CameraConfig::startup_timeout`].
    #[instrument(skip(config), fields(program = %config.program, device = %config.device))]
    pub async fn start(config: &CameraConfig) -> AppResult<Self> {
        let mut pipeline = Self::spawn(config)?;
        pipeline.await_first_chunk(config.startup_timeout()).await?;
        Ok(pipeline)
    }

    /// Start the encoder process described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HardwareUnavailable`] if the process cannot be
    /// spawned or its stdout cannot be captured.
    #[track_caller]
    #[instrument(skip(config), fields(program = %config.program, device = %config.device))]
    pub fn spawn(config: &CameraConfig) -> AppResult<Self> {
        let args = config.encoder_args();

        let mut child = Command::new(&config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::HardwareUnavailable {
                reason: format!("Failed to start {}: {}", config.program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AppError::HardwareUnavailable {
                reason: "Encoder stdout not captured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            pid = ?child.id(),
            width = config.width,
            height = config.height,
            fps = config.fps,
            profile = %config.profile,
            "Encoder process spawned"
        );
        debug!(args = ?args, "Encoder arguments");

        Ok(Self {
            child,
            stdout,
            buf: vec![0; config.chunk_size],
        })
    }

    async fn await_first_chunk(&mut self, timeout: Duration) -> AppResult<()> {
        match tokio::time::timeout(timeout, self.next_chunk()).await {
            Ok(Ok(chunk)) => {
                info!(first_chunk_len = chunk.len(), "Camera pipeline producing");
                Ok(())
            }
            Ok(Err(e)) => Err(AppError::HardwareUnavailable {
                reason: format!("Camera did not initialize: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(AppError::HardwareUnavailable {
                reason: format!("Camera produced no output within {:?}", timeout),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl BitstreamSource for CameraPipeline {
    async fn next_chunk(&mut self) -> AppResult<Vec<u8>> {
        let read = self.stdout.read(&mut self.buf).await;

        match read {
            Ok(0) => {
                let status = self.child.try_wait().ok().flatten();
                warn!(status = ?status, "Encoder closed its output");
                Err(AppError::CameraStreamEnded {
                    reason: match status {
                        Some(status) => format!("encoder exited with {}", status),
                        None => "encoder closed stdout".to_string(),
                    },
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Ok(len) => Ok(self.buf[..len].to_vec()),
            Err(e) => Err(AppError::CameraStreamEnded {
                reason: format!("Failed to read encoder output: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn check_alive(&mut self) -> AppResult<()> {
        match self.child.try_wait() {
            Ok(None) => Ok(()),
            Ok(Some(status)) => {
                warn!(status = %status, "Encoder exited while idle");
                Err(AppError::CameraStreamEnded {
                    reason: format!("encoder exited with {}", status),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(AppError::CameraStreamEnded {
                reason: format!("Failed to query encoder status: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
