use log::{
    debug,
    info,
};
use rand::SeedableRng;
use rand_distr::{
    Distribution,
    WeightedIndex,
};
use wyhash::WyRng;

use crate::{
    config::RegretMatchingConfig,
    error::{
        Result,
        SolverError,
    },
    games::rps::{
        calc_payoff,
        regret_vector,
        RpsAction,
    },
    node::Node,
};

/// Learns a response to a fixed opponent in the one-shot game by regret matching.
pub struct Trainer {
    node: Node<RpsAction>,
    opponent_dist: WeightedIndex<f64>,
    iterations: usize,
    rng: WyRng,
}

impl Trainer {
    pub fn new(config: &RegretMatchingConfig) -> Result<Self> {
        let opponent_dist =
            WeightedIndex::new(config.opponent_strategy).map_err(|_| SolverError::NotNormalized {
                sum: config.opponent_strategy.iter().sum(),
            })?;
        Ok(Trainer {
            node: Node::new(RpsAction::VALUES.to_vec()),
            opponent_dist,
            iterations: config.iterations,
            rng: WyRng::seed_from_u64(config.seed),
        })
    }

    pub fn node(&self) -> &Node<RpsAction> {
        &self.node
    }

    pub fn train_one_iteration(&mut self) {
        let strategy = self.node.current_strategy();
        self.node.record_reach(&strategy, 1.0);

        let player_action = self.sample_action(&strategy);
        let opponent_action = RpsAction::VALUES[self.opponent_dist.sample(&mut self.rng)];

        let payoff = calc_payoff(player_action, opponent_action);
        let regrets = regret_vector(payoff, opponent_action).map(f64::from);
        self.node.add_regrets(&regrets, 1.0);
        self.node.apply_pending_regrets();
    }

    /// Runs every configured iteration and returns the average strategy.
    pub fn train(&mut self) -> Vec<f64> {
        for i in 0..self.iterations {
            self.train_one_iteration();
            if i % 1000 == 0 {
                debug!("iteration {:8}: {}", i, self.node);
            }
        }
        info!("Training has finished: {}", self.node);
        self.average_strategy()
    }

    /// Strategy sum divided by the number of recorded iterations.
    pub fn average_strategy(&self) -> Vec<f64> {
        self.node.to_average_strategy()
    }

    fn sample_action(&mut self, strategy: &[f64]) -> RpsAction {
        // Regret matching always yields a distribution with a positive entry.
        match WeightedIndex::new(strategy) {
            Ok(dist) => RpsAction::VALUES[dist.sample(&mut self.rng)],
            Err(e) => panic!("Invalid weights: e: {} probs: {:?}", e, strategy),
        }
    }
}

pub fn format_strategy(strategy: &[f64]) -> String {
    let entries: Vec<String> = strategy.iter().map(|p| format!("{:.6}", p)).collect();
    format!("[{}]", entries.join(" "))
}
