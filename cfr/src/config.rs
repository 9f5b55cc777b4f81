use std::path::PathBuf;

use clap::{
    Args,
    ValueEnum,
    ValueHint,
};

use crate::{
    error::{
        Result,
        SolverError,
    },
    games::rps::RpsAction,
};

const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

pub fn validate_iterations(iterations: usize) -> Result<usize> {
    if iterations == 0 {
        return Err(SolverError::ZeroIterations);
    }
    Ok(iterations)
}

/// Checks that `dist` is a probability distribution over `expected_len` actions.
pub fn validate_distribution(dist: &[f64], expected_len: usize) -> Result<()> {
    if dist.len() != expected_len {
        return Err(SolverError::DistributionLength {
            expected: expected_len,
            actual: dist.len(),
        });
    }
    if let Some((index, value)) = dist.iter().enumerate().find(|(_, p)| !(**p >= 0.0)) {
        return Err(SolverError::NegativeProbability {
            index,
            value: *value,
        });
    }
    let sum: f64 = dist.iter().sum();
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(SolverError::NotNormalized {
            sum,
        });
    }
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct RegretMatchingArgs {
    #[clap(long, short, value_parser, default_value_t = 10_000)]
    pub iterations: usize,

    /// Fixed opponent distribution over rock, paper and scissors.
    #[clap(long, short, value_parser, value_delimiter = ',', default_values_t = [0.8, 0.1, 0.1])]
    pub opponent: Vec<f64>,

    #[clap(long, short, value_parser, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegretMatchingConfig {
    pub iterations: usize,
    pub opponent_strategy: [f64; RpsAction::COUNT],
    pub seed: u64,
}

impl RegretMatchingConfig {
    pub fn new(iterations: usize, opponent_strategy: &[f64], seed: u64) -> Result<Self> {
        let iterations = validate_iterations(iterations)?;
        validate_distribution(opponent_strategy, RpsAction::COUNT)?;
        let mut opponent = [0.0; RpsAction::COUNT];
        opponent.copy_from_slice(opponent_strategy);
        Ok(RegretMatchingConfig {
            iterations,
            opponent_strategy: opponent,
            seed,
        })
    }
}

impl TryFrom<&RegretMatchingArgs> for RegretMatchingConfig {
    type Error = SolverError;

    fn try_from(args: &RegretMatchingArgs) -> Result<Self> {
        RegretMatchingConfig::new(args.iterations, &args.opponent, args.seed)
    }
}

/// How the private cards are dealt at the root of every CFR iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DealMode {
    /// Walk every distinct deal, weighted by its probability.
    Enumerate,
    /// Draw a single deal per iteration.
    Sample,
}

#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    #[clap(long, short, value_parser, default_value_t = 1000)]
    pub iterations: usize,

    #[clap(long, short, value_parser, default_value_t = 2)]
    pub players: usize,

    #[clap(long, short, value_enum, default_value_t = DealMode::Enumerate)]
    pub deal: DealMode,

    #[clap(long, short, value_parser, default_value_t = 42)]
    pub seed: u64,

    /// Average-strategy entries below this value are dropped from the report.
    #[clap(long, short, value_parser, default_value_t = 0.01)]
    pub threshold: f64,

    #[clap(long, short, value_parser, value_hint(ValueHint::FilePath))]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CfrConfig {
    pub iterations: usize,
    pub deal_mode: DealMode,
    pub seed: u64,
    pub log_path: Option<PathBuf>,
}

impl CfrConfig {
    pub fn new(iterations: usize, deal_mode: DealMode, seed: u64) -> Result<Self> {
        Ok(CfrConfig {
            iterations: validate_iterations(iterations)?,
            deal_mode,
            seed,
            log_path: None,
        })
    }

    pub fn with_log_path(mut self, log_path: PathBuf) -> Self {
        self.log_path = Some(log_path);
        self
    }
}

impl TryFrom<&TrainingArgs> for CfrConfig {
    type Error = SolverError;

    fn try_from(args: &TrainingArgs) -> Result<Self> {
        let config = CfrConfig::new(args.iterations, args.deal, args.seed)?;
        Ok(match &args.log_path {
            Some(path) => config.with_log_path(path.clone()),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(validate_iterations(0), Err(SolverError::ZeroIterations)));
        assert_eq!(5, validate_iterations(5).unwrap());
        assert!(matches!(
            CfrConfig::new(0, DealMode::Sample, 1),
            Err(SolverError::ZeroIterations)
        ));
    }

    #[test]
    fn test_distribution_validation() {
        assert!(validate_distribution(&[0.8, 0.1, 0.1], 3).is_ok());
        assert!(validate_distribution(&[1.0, 0.0, 0.0], 3).is_ok());
        assert!(matches!(
            validate_distribution(&[0.5, 0.5], 3),
            Err(SolverError::DistributionLength {
                expected: 3,
                actual: 2
            })
        ));
        assert!(matches!(
            validate_distribution(&[1.2, -0.1, -0.1], 3),
            Err(SolverError::NegativeProbability {
                index: 1,
                ..
            })
        ));
        assert!(matches!(
            validate_distribution(&[0.5, 0.5, 0.5], 3),
            Err(SolverError::NotNormalized {
                ..
            })
        ));
        assert!(validate_distribution(&[f64::NAN, 0.5, 0.5], 3).is_err());
    }

    #[test]
    fn test_regret_matching_config() {
        let config = RegretMatchingConfig::new(100, &[0.2, 0.3, 0.5], 7).unwrap();
        assert_eq!([0.2, 0.3, 0.5], config.opponent_strategy);
        assert_eq!(100, config.iterations);
        assert!(RegretMatchingConfig::new(0, &[0.2, 0.3, 0.5], 7).is_err());
        assert!(RegretMatchingConfig::new(10, &[0.2, 0.3], 7).is_err());
    }
}
