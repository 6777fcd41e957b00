/// A runtime request from the user, independent of how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move on to the next section
    Advance,
    /// Go back to the previous section
    Retreat,
    Pause,
    Resume,
    TogglePause,
    /// End the session
    Terminate,
}
