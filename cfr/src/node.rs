use std::fmt::Display;

use more_asserts::debug_assert_ge;

/// Normalizes non-negative weights into a probability distribution.
/// Falls back to the uniform distribution when the weights don't sum to a positive value.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let normalizing_sum: f64 = weights.iter().sum();
    if normalizing_sum <= 0.0 {
        return vec![1.0 / weights.len() as f64; weights.len()];
    }
    weights.iter().map(|w| w / normalizing_sum).collect()
}

/// Regret-minimization state of a single information set.
///
/// `regret_sum` and `strategy_sum` always have one entry per action.
/// Regrets added during an iteration are kept in `pending_regret` until
/// [`Node::apply_pending_regrets`] is called, so that the current strategy stays
/// fixed while the iteration is in progress.
#[derive(Clone, Debug)]
pub struct Node<A> {
    regret_sum: Vec<f64>,
    pending_regret: Vec<f64>,
    strategy_sum: Vec<f64>,

    actions: Vec<A>,
}

impl<A> Node<A> {
    pub fn new(actions: Vec<A>) -> Self {
        let actions_len = actions.len();
        Self {
            regret_sum: vec![0.0; actions_len],
            pending_regret: vec![0.0; actions_len],
            strategy_sum: vec![0.0; actions_len],

            actions,
        }
    }

    #[inline]
    pub fn get_actions(&self) -> &[A] {
        &self.actions
    }

    pub fn regret_sum(&self) -> &[f64] {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &[f64] {
        &self.strategy_sum
    }

    /// Regret matching: plays each action in proportion to its positive cumulative regret.
    pub fn current_strategy(&self) -> Vec<f64> {
        let positive_regrets: Vec<f64> = self.regret_sum.iter().map(|r| r.max(0.0)).collect();
        let strategy = normalize(&positive_regrets);
        for s in &strategy {
            debug_assert_ge!(*s, 0.0);
        }
        strategy
    }

    pub fn record_reach(&mut self, strategy: &[f64], reach_probability: f64) {
        debug_assert_eq!(strategy.len(), self.strategy_sum.len());
        for (sum, s) in self.strategy_sum.iter_mut().zip(strategy) {
            *sum += reach_probability * s;
        }
    }

    pub fn add_regret(&mut self, action_index: usize, regret: f64, opponent_prob: f64) {
        self.pending_regret[action_index] += opponent_prob * regret;
    }

    pub fn add_regrets(&mut self, regrets: &[f64], opponent_prob: f64) {
        debug_assert_eq!(regrets.len(), self.pending_regret.len());
        for (i, regret) in regrets.iter().enumerate() {
            self.add_regret(i, *regret, opponent_prob);
        }
    }

    /// Folds the regrets collected since the last call into the cumulative regrets.
    pub fn apply_pending_regrets(&mut self) {
        for (sum, pending) in self.regret_sum.iter_mut().zip(self.pending_regret.iter_mut()) {
            *sum += *pending;
            *pending = 0.0;
        }
    }

    pub fn to_average_strategy(&self) -> Vec<f64> {
        normalize(&self.strategy_sum)
    }

    /// Average strategy with every probability below `threshold` dropped, then renormalized.
    pub fn to_average_strategy_with_threshold(&self, threshold: f64) -> Vec<f64> {
        let thresholded: Vec<f64> = self
            .to_average_strategy()
            .into_iter()
            .map(|p| if p < threshold { 0.0 } else { p })
            .collect();
        normalize(&thresholded)
    }
}

impl<A> Display for Node<A>
where
    A: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let avg_strategy = self.to_average_strategy();

        write!(f, "Avg Strategy[")?;
        for (i, act) in self.actions.iter().enumerate() {
            write!(f, "{}: {:.03}, ", act, avg_strategy[i])?;
        }
        write!(f, "]")?;

        write!(f, " Regret[")?;
        for (i, regret) in self.regret_sum.iter().enumerate() {
            write!(f, "{}: {:.03}, ", self.actions[i], regret)?;
        }
        write!(f, "]")?;

        Ok(())
    }
}
