mod camera_config;
#[allow(clippy::module_inception)]
mod config;
mod control_config;
mod hotkey_config;
mod recording_config;

pub(crate) use {
    camera_config::CameraConfig, config::Config, control_config::ControlConfig,
    hotkey_config::HotkeyConfig, recording_config::RecordingConfig,
};

use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

pub(crate) const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub(crate) const DEFAULT_PORT: u16 = 45001;
pub(crate) const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;

pub(crate) const DEFAULT_CAMERA_PROGRAM: &str = "ffmpeg";
pub(crate) const DEFAULT_INPUT_FORMAT: &str = "v4l2";
pub(crate) const DEFAULT_DEVICE: &str = "/dev/video0";
pub(crate) const DEFAULT_WIDTH: u32 = 1920;
pub(crate) const DEFAULT_HEIGHT: u32 = 1080;
pub(crate) const DEFAULT_FPS: u32 = 30;
pub(crate) const DEFAULT_PROFILE: &str = "main";
pub(crate) const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
pub(crate) const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 10_000;

pub(crate) const DEFAULT_OUTPUT_DIR: &str = ".";

pub(crate) const DEFAULT_START_HOTKEY: &str = "ctrl+KeyN";
pub(crate) const DEFAULT_STOP_HOTKEY: &str = "ctrl+KeyS";

pub(crate) fn default_bind_address() -> IpAddr {
    DEFAULT_BIND_ADDRESS
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_poll_timeout_ms() -> u64 {
    DEFAULT_POLL_TIMEOUT_MS
}

pub(crate) fn default_camera_program() -> String {
    DEFAULT_CAMERA_PROGRAM.to_string()
}

pub(crate) fn default_input_format() -> String {
    DEFAULT_INPUT_FORMAT.to_string()
}

pub(crate) fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}

pub(crate) fn default_width() -> u32 {
    DEFAULT_WIDTH
}

pub(crate) fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

pub(crate) fn default_fps() -> u32 {
    DEFAULT_FPS
}

pub(crate) fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

pub(crate) fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

pub(crate) fn default_startup_timeout_ms() -> u64 {
    DEFAULT_STARTUP_TIMEOUT_MS
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

pub(crate) fn default_start_hotkey() -> String {
    DEFAULT_START_HOTKEY.to_string()
}

pub(crate) fn default_stop_hotkey() -> String {
    DEFAULT_STOP_HOTKEY.to_string()
}
