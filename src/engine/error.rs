use thiserror::Error;

/// Recoverable conditions reported by the quiz engine.
///
/// Neither variant mutates round state; callers decide whether to surface
/// them or ignore them like a disabled button would.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Unknown difficulty tier: {0}")]
    InvalidTier(String),

    #[error("Round is not accepting input")]
    NotAcceptingInput,
}
