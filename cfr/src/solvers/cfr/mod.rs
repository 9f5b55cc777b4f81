use std::{
    collections::HashMap,
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::PathBuf,
    time::{
        Duration,
        Instant,
    },
};

use log::{
    debug,
    info,
};
use more_asserts::assert_gt;
use rand::SeedableRng;
use wyhash::WyRng;

use crate::{
    config::{
        CfrConfig,
        DealMode,
    },
    error::Result,
    eval::{
        compute_nash_conv,
        Strategy,
    },
    games::Game,
    node::Node,
};

/// Vanilla counterfactual regret minimization for games of any number of players.
pub struct Trainer<G>
where
    G: Game,
{
    game: G,
    nodes: HashMap<G::InfoSet, Node<G::Action>>,

    iterations: usize,
    deal_mode: DealMode,
    log_path: Option<PathBuf>,
    rng: WyRng,
}

impl<G> Trainer<G>
where
    G: Game,
{
    pub fn new(game: G, config: &CfrConfig) -> Self {
        Trainer {
            game,
            nodes: HashMap::new(),
            iterations: config.iterations,
            deal_mode: config.deal_mode,
            log_path: config.log_path.clone(),
            rng: WyRng::seed_from_u64(config.seed),
        }
    }

    pub fn game_ref(&self) -> &G {
        &self.game
    }

    pub fn get_node(&self, info_set: &G::InfoSet) -> Option<&Node<G::Action>> {
        self.nodes.get(info_set)
    }

    pub fn info_set_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walks the subtree under `state` and returns the expected utility of every player.
    ///
    /// `reach[p]` is the probability that player `p`'s own actions lead to `state`, and
    /// `chance_reach` the probability of the deal. Regrets are weighted by the reach of
    /// everything but the acting player, and the strategy sum by the acting player's own reach.
    pub fn cfr(&mut self, state: &G::State, reach: &[f64], chance_reach: f64) -> Vec<f64> {
        if self.game.is_terminal(state) {
            return self.game.get_payouts(state);
        }

        let player = self.game.get_node_player_id(state);
        let info_set = self.game.to_info_set(state);
        let node = self
            .nodes
            .entry(info_set.clone())
            .or_insert_with(|| Node::new(self.game.list_legal_actions(state)));

        let actions = node.get_actions().to_vec();
        assert_gt!(actions.len(), 0);
        let strategy = node.current_strategy();
        node.record_reach(&strategy, reach[player]);
        debug!("CFR state: {:?}, strategy: {:?}", state, strategy);

        let mut node_util = vec![0.0; self.game.num_players()];
        let mut player_action_utils = Vec::with_capacity(actions.len());
        for (i, act) in actions.iter().enumerate() {
            let action_prob = strategy[i];
            let next_state = self.game.with_action(state, *act);
            let mut next_reach = reach.to_vec();
            next_reach[player] *= action_prob;

            let action_util = self.cfr(&next_state, &next_reach, chance_reach);
            player_action_utils.push(action_util[player]);
            for (util, player_util) in node_util.iter_mut().zip(action_util) {
                *util += action_prob * player_util;
            }
        }

        let opponent_prob = chance_reach
            * reach.iter().enumerate().filter(|(p, _)| *p != player).map(|(_, r)| r).product::<f64>();
        if let Some(node) = self.nodes.get_mut(&info_set) {
            for (i, action_util) in player_action_utils.iter().enumerate() {
                let regret = action_util - node_util[player];
                node.add_regret(i, regret, opponent_prob);
            }
        }

        node_util
    }

    /// Runs a single CFR iteration and returns the expected utility of every player.
    pub fn train_one_epoch(&mut self) -> Vec<f64> {
        let num_players = self.game.num_players();
        let reach = vec![1.0; num_players];
        let util = match self.deal_mode {
            DealMode::Enumerate => {
                let deals = self.game.list_deals().to_vec();
                let mut util = vec![0.0; num_players];
                for (deal, prob) in deals {
                    let root = self.game.new_root(&deal);
                    let deal_util = self.cfr(&root, &reach, prob);
                    for (u, d) in util.iter_mut().zip(deal_util) {
                        *u += prob * d;
                    }
                }
                util
            }
            DealMode::Sample => {
                let deal = self.game.sample_deal(&mut self.rng);
                let root = self.game.new_root(&deal);
                self.cfr(&root, &reach, 1.0)
            }
        };

        for node in self.nodes.values_mut() {
            node.apply_pending_regrets();
        }
        util
    }

    /// Runs every configured iteration and returns the average game value of every player.
    pub fn train(&mut self) -> Result<Vec<f64>> {
        let mut log_writer = match &self.log_path {
            Some(path) => {
                let mut w = BufWriter::new(File::create(path)?);
                writeln!(w, "epoch,elapsed_seconds,nash_conv")?;
                Some(w)
            }
            None => None,
        };

        let num_players = self.game.num_players();
        let mut util = vec![0.0; num_players];
        let start_t = Instant::now();
        let mut timer = Instant::now();
        for i in 0..self.iterations {
            for (u, epoch_util) in util.iter_mut().zip(self.train_one_epoch()) {
                *u += epoch_util;
            }
            if timer.elapsed() > Duration::from_secs(5) {
                let nash_conv = compute_nash_conv(&self.game, &*self);
                info!("epoch {:10}: NashConv: {}", i, nash_conv);
                info!("Average game value: {:?}", average(&util, i + 1));
                if let Some(w) = &mut log_writer {
                    writeln!(w, "{},{},{:.12}", i, start_t.elapsed().as_secs(), nash_conv)?;
                    w.flush()?;
                }
                timer = Instant::now();
            }
        }
        info!("Training has finished");

        let nash_conv = compute_nash_conv(&self.game, &*self);
        if let Some(w) = &mut log_writer {
            writeln!(w, "{},{},{:.12}", self.iterations, start_t.elapsed().as_secs(), nash_conv)?;
            w.flush()?;
        }
        let game_value = average(&util, self.iterations);
        info!("# of infoset: {}", self.nodes.len());
        info!("Average game value: {:?}", game_value);
        info!("NashConv: {}", nash_conv);
        Ok(game_value)
    }

    pub fn average_strategy(&self, info_set: &G::InfoSet) -> Option<Vec<f64>> {
        self.nodes.get(info_set).map(|node| node.to_average_strategy())
    }

    pub fn average_strategy_with_threshold(
        &self,
        info_set: &G::InfoSet,
        threshold: f64,
    ) -> Option<Vec<f64>> {
        self.nodes.get(info_set).map(|node| node.to_average_strategy_with_threshold(threshold))
    }

    /// Every visited info set with its thresholded average strategy, in info set order.
    pub fn strategy_report(&self, threshold: f64) -> Vec<(G::InfoSet, Vec<(G::Action, f64)>)> {
        let mut info_sets: Vec<&G::InfoSet> = self.nodes.keys().collect();
        info_sets.sort();
        info_sets
            .into_iter()
            .map(|info_set| {
                let node = &self.nodes[info_set];
                let strategy = node.to_average_strategy_with_threshold(threshold);
                let entries = node.get_actions().iter().copied().zip(strategy).collect();
                (info_set.clone(), entries)
            })
            .collect()
    }

    pub fn print_strategy(&self, threshold: f64) {
        info!("Nodes [");
        for (info_set, entries) in self.strategy_report(threshold) {
            let mut s = format!("    {} Avg Strategy[", info_set);
            for (act, prob) in entries {
                s += &format!("{}: {:.03}, ", act, prob);
            }
            s += "]";
            info!("{}", s);
        }
        info!("]");
    }
}

fn average(sums: &[f64], count: usize) -> Vec<f64> {
    sums.iter().map(|s| s / count as f64).collect()
}

impl<G: Game> Strategy<G> for Trainer<G> {
    fn get_strategy(&self, info_set: &G::InfoSet) -> Option<Vec<f64>> {
        self.average_strategy(info_set)
    }
}
