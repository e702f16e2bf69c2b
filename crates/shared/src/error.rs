use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid action {0}: expected a value in 0..=4")]
    InvalidAction(i64),
    #[error("step called after the episode terminated; call reset first")]
    StepAfterTerminal,
    #[error("invalid arena config: {0}")]
    InvalidConfig(String),
}

/// Returned when a scripted policy name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}' (valid: stationary, simple, random, hunter)")]
pub struct UnknownPolicyError(pub String);
