use crate::config::{
    default_camera_program, default_chunk_size, default_device, default_fps, default_height,
    default_input_format, default_profile, default_startup_timeout_ms, default_width,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Camera encoder configuration.
///
/// The encoder runs as a child process that writes a raw H.264 elementary
/// stream to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Encoder executable (looked up on `PATH`).
    #[serde(default = "default_camera_program")]
    pub program: String,

    /// Capture input format passed to the encoder (e.g. `v4l2`, `avfoundation`, `dshow`).
    #[serde(default = "default_input_format")]
    pub input_format: String,

    /// Capture device.
    #[serde(default = "default_device")]
    pub device: String,

    /// Frame width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Frame height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Frames per second.
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// H.264 profile.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Maximum bytes per bitstream chunk.
    ///
    /// While recording, each loop iteration reads at most one chunk after the
    /// control socket wait, so sustained throughput is bounded by
    /// `chunk_size` per `poll_timeout_ms` (and by the OS pipe capacity).
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// How long startup waits for the encoder's first output.
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,
}

impl CameraConfig {
    /// Startup wait for the first encoded chunk.
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    /// Encoder arguments producing `width`x`height` @ `fps` H.264 on stdout.
    pub fn encoder_args(&self) -> Vec<String> {
        let fps = self.fps.to_string();
        let video_size = format!("{}x{}", self.width, self.height);
        [
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            self.input_format.as_str(),
            "-framerate",
            fps.as_str(),
            "-video_size",
            video_size.as_str(),
            "-i",
            self.device.as_str(),
            "-an",
            "-c:v",
            "libx264",
            "-profile:v",
            self.profile.as_str(),
            "-preset",
            "ultrafast",
            "-tune",
            "zerolatency",
            "-g",
            fps.as_str(),
            "-f",
            "h264",
            "-",
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            program: default_camera_program(),
            input_format: default_input_format(),
            device: default_device(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            profile: default_profile(),
            chunk_size: default_chunk_size(),
            startup_timeout_ms: default_startup_timeout_ms(),
        }
    }
}
