/// Outcome of a reminder firing after re-validating current state.
///
/// The external trigger is an instruction, not a fact; a fired schedule that
/// finds nothing left to do reports a benign skip reason instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemindOutcome {
    /// A reminder message was posted, mentioning this many users.
    Sent { mentioned: usize },
    /// Nothing to do; the reason is reported to the scheduler caller.
    Skipped(&'static str),
}
