use crate::{AppResult, BitstreamSource, ControlChannel, HotkeyHandler};

use std::time::Duration;

use robot_cam_core::{Command, Recorder, StatusCode};
use tracing::{debug, error, info, instrument};

/// Main control loop state.
///
/// Owns every resource the loop touches: the recorder (and through it the
/// open recording file), the control socket, the camera source and the
/// hotkey handler. Runs on a single thread; nothing is shared.
pub struct App<S> {
    pub(crate) recorder: Recorder,
    pub(crate) control: ControlChannel,
    pub(crate) camera: S,
    pub(crate) hotkeys: HotkeyHandler,
    pub(crate) poll_timeout: Duration,
}

impl<S: BitstreamSource> App<S> {
    /// Run until `shutdown` resolves or a fatal error occurs.
    ///
    /// `shutdown` is raced against every iteration, so an interrupt also
    /// cancels a pending socket wait or camera read. Any open recording is
    /// closed and the socket released before returning.
    #[instrument(skip_all)]
    pub(crate) async fn run<F>(mut self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        info!("Robot-Cam control loop starting");

        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                biased;

                signal = &mut shutdown => {
                    if signal.is_ok() {
                        info!("Interrupt received, shutting down");
                    }
                    break signal;
                }

                tick = self.tick() => {
                    if let Err(e) = tick {
                        error!(error = ?e, "Control loop stopped");
                        break Err(e);
                    }
                }
            }
        };

        if let Err(e) = self.recorder.close() {
            error!(error = ?e, "Failed to close recording on shutdown");
        }

        drop(self.control);
        info!("Control socket closed");

        result
    }

    /// One loop iteration: hotkeys, then the control socket, then one camera
    /// chunk if recording (or an encoder liveness check if idle).
    ///
    /// # Errors
    ///
    /// Only a camera failure is returned; recording and packet errors are
    /// logged and the iteration continues.
    pub(crate) async fn tick(&mut self) -> AppResult<()> {
        for command in self.hotkeys.poll() {
            self.apply(command);
        }

        if let Some(packet) = self.control.poll(self.poll_timeout).await {
            match StatusCode::try_from(packet.status) {
                Ok(code) => {
                    debug!(status = ?code, tx_cnt = packet.tx_count, "Status drives recording");
                    self.apply(code.command());
                }
                Err(raw) => debug!(status = raw, "Status has no recording action"),
            }
        }

        if self.recorder.is_recording() {
            let chunk = self.camera.next_chunk().await?;

            if let Err(e) = self.recorder.write_chunk(&chunk) {
                error!(error = ?e, "Recording aborted");
            }
        } else {
            self.camera.check_alive()?;
        }

        Ok(())
    }

    fn apply(&mut self, command: Command) {
        if let Err(e) = self.recorder.apply(command) {
            error!(command = ?command, error = ?e, "Failed to apply recording command");
        }
    }
}
