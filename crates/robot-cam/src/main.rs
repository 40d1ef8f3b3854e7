//! Robot-Cam: H.264 recording on a robotic camera rig, controlled by global
//! hotkeys and robot status packets over UDP.

mod app;
mod camera_pipeline;
mod config;
mod control_channel;
mod error;
mod hotkey_handler;
mod shell_command;

pub(crate) use {
    app::App,
    camera_pipeline::{BitstreamSource, CameraPipeline},
    control_channel::ControlChannel,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    shell_command::ShellCommand,
};

use crate::config::Config;

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use global_hotkey::GlobalHotKeyManager;
use robot_cam_core::Recorder;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Usage: `robot-cam [CONFIG_PATH]`. Without a path, the platform config
/// directory is used.
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("robot_cam=debug,robot_cam_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_arg = std::env::args_os().nth(1).map(PathBuf::from);

    let event_loop = EventLoopBuilder::<ShellCommand>::with_user_event().build();
    let shell_proxy = event_loop.create_proxy();

    // Persists across event loop iterations; dropping it unregisters the hotkeys.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(ShellCommand::Exit { code }) => {
                *control_flow = ControlFlow::ExitWithCode(code);
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let loaded = match &config_arg {
                    Some(path) => Config::load_from(path),
                    None => Config::load(),
                };
                let config = match loaded {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                // Register hotkeys on the main thread: tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkeys) = match HotkeyHandler::register_hotkeys(&config.hotkeys) {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkeys: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let shell_proxy = shell_proxy.clone();

                // The control loop runs on its own thread with a current-thread
                // runtime. The hotkey manager stays on the main thread.
                std::thread::spawn(move || {
                    let code = match run_control_loop(config, hotkeys) {
                        Ok(()) => 0,
                        Err(e) => {
                            error!(error = ?e, "Robot-Cam exiting after fatal error");
                            1
                        }
                    };
                    request_exit(&shell_proxy, code);
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}

fn run_control_loop(config: Config, hotkeys: HotkeyHandler) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let control = ControlChannel::bind(config.control.socket_addr()).await?;
        let camera = CameraPipeline::start(&config.camera).await?;

        info!(
            listening = ?control.local_addr(),
            start = %config.hotkeys.start,
            stop = %config.hotkeys.stop,
            output_dir = ?config.recording.output_dir,
            "Press the start hotkey to record, the stop hotkey to stop, Ctrl+C to exit"
        );

        let app = App {
            recorder: Recorder::new(config.recording.output_dir.clone()),
            control,
            camera,
            hotkeys,
            poll_timeout: config.control.poll_timeout(),
        };

        app.run(async {
            tokio::signal::ctrl_c()
                .await
                .map_err(|source| AppError::SignalError {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })
        })
        .await
    })
}

fn request_exit(proxy: &EventLoopProxy<ShellCommand>, code: i32) {
    if proxy.send_event(ShellCommand::Exit { code }).is_err() {
        // Event loop already gone; nothing left to unwind.
        std::process::exit(code);
    }
}
