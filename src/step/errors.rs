//! Step generation and navigation errors

/// Errors raised while generating steps or jumping through recorded history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// A step was requested from an algorithm that already produced its
    /// final step.
    AlgorithmExhausted { algorithm: &'static str },
    /// A call frame was popped from an empty call stack.
    CallStackUnderflow { function: &'static str },
    /// A popped call frame did not contain a variable that must be restored.
    MissingSavedVariable {
        function: &'static str,
        name: &'static str,
    },
    /// A code-step jump target is outside the recorded history.
    StepOutOfRange { position: usize, known: usize },
    /// A jump referenced a full step that has not been recorded yet.
    UnknownFullStep { full: usize, known: usize },
    /// A jump referenced a sub step its group does not contain yet.
    SubStepOutOfRange {
        full: usize,
        sub: usize,
        known: usize,
    },
    /// A full-step jump targeted a group that is still being generated.
    OpenFullStep { full: usize },
}

impl std::fmt::Display for StepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepError::AlgorithmExhausted { algorithm } => {
                write!(f, "{} has already finished", algorithm)
            }
            StepError::CallStackUnderflow { function } => {
                write!(f, "call stack underflow returning from '{}'", function)
            }
            StepError::MissingSavedVariable { function, name } => {
                write!(
                    f,
                    "frame for '{}' has no saved variable '{}'",
                    function, name
                )
            }
            StepError::StepOutOfRange { position, known } => {
                write!(
                    f,
                    "step {} is out of range ({} steps known)",
                    position, known
                )
            }
            StepError::UnknownFullStep { full, known } => {
                write!(
                    f,
                    "full step {} has not been generated ({} known)",
                    full, known
                )
            }
            StepError::SubStepOutOfRange { full, sub, known } => {
                write!(
                    f,
                    "sub step {}.{} is out of range ({} members known)",
                    full, sub, known
                )
            }
            StepError::OpenFullStep { full } => {
                write!(f, "full step {} is still being generated", full)
            }
        }
    }
}

impl std::error::Error for StepError {}
