use thiserror::Error;

/// Errors reported while setting up or running a solver.
///
/// Broken game-rule preconditions (a payoff requested for a non-terminal
/// history, a deal with duplicated cards) are not represented here: they panic.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("distribution must have {expected} entries, got {actual}")]
    DistributionLength {
        expected: usize,
        actual: usize,
    },

    #[error("distribution has a negative entry at index {index}: {value}")]
    NegativeProbability {
        index: usize,
        value: f64,
    },

    #[error("distribution sums to {sum}, expected 1")]
    NotNormalized {
        sum: f64,
    },

    #[error("unsupported number of players: {players} (expected {min}..={max})")]
    PlayerCount {
        players: usize,
        min: usize,
        max: usize,
    },

    #[error("failed to write the training log: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
