/// Request to change the recording state.
///
/// Issued by hotkeys or derived from a [`crate::StatusCode`]. A command that
/// matches the current state is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open a new recording if idle.
    Start,
    /// Close the current recording if one is open.
    Stop,
}
