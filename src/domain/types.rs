//! Core domain types.

/// Terminal state of the per-binary update state machine.
///
/// Every way a binary can leave the pipeline is a value here; nothing that
/// happens to one binary escalates out of the loop that processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Both toolchain steps exited successfully.
    Updated,
    /// The user declined the confirmation prompt. Not an error.
    SkippedByUser,
    /// Not a recognized Go build artifact. Silently skipped.
    NotAGoBinary,
    /// Built from source outside the configured workspace. Silently skipped.
    Ineligible,
    /// Metadata present but undecodable; narrated at debug level only.
    Undecodable(String),
    /// I/O, confirmation, or rebuild failure; carries the diagnostic text.
    Failed(String),
}

impl Outcome {
    /// Outcomes that batch mode does not report on stdout.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Outcome::NotAGoBinary | Outcome::Ineligible | Outcome::Undecodable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_outcomes() {
        assert!(Outcome::NotAGoBinary.is_silent());
        assert!(Outcome::Ineligible.is_silent());
        assert!(Outcome::Undecodable("bad magic".into()).is_silent());
        assert!(!Outcome::Updated.is_silent());
        assert!(!Outcome::Failed("boom".into()).is_silent());
        assert!(!Outcome::SkippedByUser.is_silent());
    }
}
