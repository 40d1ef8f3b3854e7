/// Commands sent from the control loop thread to the main UI thread.
///
/// The main thread owns the hotkey manager and the `tao` event loop, so
/// process exit is requested through this enum.
#[derive(Debug, Clone, Copy)]
pub enum ShellCommand {
    /// Exit the event loop with the given process status.
    Exit {
        /// Process exit code.
        code: i32,
    },
}
