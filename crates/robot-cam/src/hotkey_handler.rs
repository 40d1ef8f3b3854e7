//! Global hotkeys for manual start/stop.
//!
//! Hotkeys are level-triggered: every loop iteration issues the command of
//! each key that is held (or was pressed since the previous poll). Repeats
//! are absorbed by the recorder, which ignores a command matching its state.

use crate::{AppError, AppResult, config::HotkeyConfig};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use robot_cam_core::Command;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, Default)]
struct KeyLevel {
    held: bool,
    pressed_since_poll: bool,
}

impl KeyLevel {
    fn observe(&mut self, state: HotKeyState) {
        match state {
            HotKeyState::Pressed => {
                self.held = true;
                self.pressed_since_poll = true;
            }
            HotKeyState::Released => self.held = false,
        }
    }

    fn take_active(&mut self) -> bool {
        let active = self.held || self.pressed_since_poll;
        self.pressed_since_poll = false;
        active
    }
}

/// Polls the global hotkey channel and reports manual commands.
pub struct HotkeyHandler {
    start_id: u32,
    stop_id: u32,
    start: KeyLevel,
    stop: KeyLevel,
}

impl HotkeyHandler {
    /// Register the configured start and stop hotkeys.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkeys to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkeys(config: &HotkeyConfig) -> AppResult<(GlobalHotKeyManager, Self)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let start = Self::register_one(&manager, &config.start)?;
        let stop = Self::register_one(&manager, &config.stop)?;

        info!(start = %config.start, stop = %config.stop, "Global hotkeys registered");

        Ok((manager, Self::new(start.id(), stop.id())))
    }

    #[track_caller]
    fn register_one(manager: &GlobalHotKeyManager, binding: &str) -> AppResult<HotKey> {
        let hotkey = HotKey::from_str(binding).map_err(|e| AppError::HotkeyRegistrationFailed {
            reason: format!("Invalid hotkey {:?}: {}", binding, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", binding, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(hotkey)
    }

    /// Create a handler for previously registered hotkey IDs.
    ///
    /// This struct is `Send` and can live on any thread, it only reads the
    /// global [`GlobalHotKeyEvent`] channel.
    pub fn new(start_id: u32, stop_id: u32) -> Self {
        Self {
            start_id,
            stop_id,
            start: KeyLevel::default(),
            stop: KeyLevel::default(),
        }
    }

    /// Drain pending hotkey events and return the commands to issue this
    /// iteration, start before stop.
    pub fn poll(&mut self) -> impl Iterator<Item = Command> + use<> {
        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            self.observe(event);
        }
        self.active_commands()
    }

    /// Record a single hotkey event.
    pub fn observe(&mut self, event: GlobalHotKeyEvent) {
        if event.id == self.start_id {
            self.start.observe(event.state);
        } else if event.id == self.stop_id {
            self.stop.observe(event.state);
        } else {
            return;
        }
        debug!(id = event.id, state = ?event.state, "Hotkey event");
    }

    pub(crate) fn active_commands(&mut self) -> impl Iterator<Item = Command> + use<> {
        [
            self.start.take_active().then_some(Command::Start),
            self.stop.take_active().then_some(Command::Stop),
        ]
        .into_iter()
        .flatten()
    }
}
