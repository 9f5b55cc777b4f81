use std::collections::HashMap;

use itertools::Itertools;
use log::debug;
use more_asserts::debug_assert_ge;

use crate::games::Game;

pub trait Strategy<G: Game> {
    fn get_strategy(&self, info_set: &G::InfoSet) -> Option<Vec<f64>>;

    /// Unknown info sets are played uniformly at random.
    fn safe_get_strategy(&self, actions_len: usize, info_set: &G::InfoSet) -> Vec<f64> {
        match self.get_strategy(info_set) {
            Some(s) => s,
            None => vec![1.0 / actions_len as f64; actions_len],
        }
    }
}

impl<G: Game> Strategy<G> for HashMap<G::InfoSet, Vec<f64>> {
    fn get_strategy(&self, info_set: &G::InfoSet) -> Option<Vec<f64>> {
        self.get(info_set).cloned()
    }
}

fn max_index(values: &[f64]) -> usize {
    values.iter().enumerate().max_by(|(_i, a), (_j, b)| a.total_cmp(b)).map(|(i, _)| i).unwrap_or(0)
}

/// States of a single info set with the probability that the others (and the deal) lead to each.
pub struct ReachProbabilities<G: Game> {
    reach_probabilities: HashMap<G::State, f64>,
}

impl<G: Game> ReachProbabilities<G> {
    fn insert(&mut self, state: G::State, reach_probability: f64) {
        let prob = self.reach_probabilities.entry(state).or_insert(0.0);
        *prob += reach_probability;
    }
}

impl<G: Game> Default for ReachProbabilities<G> {
    fn default() -> Self {
        Self {
            reach_probabilities: HashMap::new(),
        }
    }
}

pub fn calc_reach_probabilities<G: Game, St: Strategy<G>>(
    game: &G,
    br_player: usize,
    strategy: &St,
    state: &G::State,
    reach_probability: f64,
    reach_probabilities: &mut HashMap<G::InfoSet, ReachProbabilities<G>>,
) {
    if game.is_terminal(state) {
        return;
    }

    let info_set = game.to_info_set(state);
    let actions = game.list_legal_actions(state);
    if game.get_node_player_id(state) == br_player {
        // the player plays the best response.
        reach_probabilities.entry(info_set).or_default().insert(state.clone(), reach_probability);

        for act in actions {
            let next_state = game.with_action(state, act);
            calc_reach_probabilities(
                game,
                br_player,
                strategy,
                &next_state,
                reach_probability, // br_player always chooses the best action.
                reach_probabilities,
            );
        }
    } else {
        let strategy_ary = strategy.safe_get_strategy(actions.len(), &info_set);
        for (i, act) in actions.iter().enumerate() {
            let next_state = game.with_action(state, *act);
            calc_reach_probabilities(
                game,
                br_player,
                strategy,
                &next_state,
                reach_probability * strategy_ary[i],
                reach_probabilities,
            );
        }
    }
}

/// Expected utility of `br_player` at `state` if:
/// - `br_player` plays a best response (the player knows the others' strategies)
/// - the other players play `strategy`
pub fn calc_best_response_value<G: Game, St: Strategy<G>>(
    game: &G,
    action_utilities: &mut HashMap<G::InfoSet, Vec<f64>>,
    reach_probabilities: &HashMap<G::InfoSet, ReachProbabilities<G>>,
    br_player: usize,
    strategy: &St,
    state: &G::State,
) -> f64 {
    if game.is_terminal(state) {
        return game.get_payouts(state)[br_player];
    }

    let actions = game.list_legal_actions(state);
    let info_set = game.to_info_set(state);
    if game.get_node_player_id(state) == br_player {
        // Pick the best action for the current INFO SET (not `state`)
        if !action_utilities.contains_key(&info_set) {
            let mut act_utils = vec![0.0; actions.len()];
            if let Some(rp) = reach_probabilities.get(&info_set) {
                for (act_i, act) in actions.iter().enumerate() {
                    for (sib_state, state_reach_prob) in rp.reach_probabilities.iter() {
                        let next_state = game.with_action(sib_state, *act);
                        let util = calc_best_response_value(
                            game,
                            action_utilities,
                            reach_probabilities,
                            br_player,
                            strategy,
                            &next_state,
                        );
                        act_utils[act_i] += state_reach_prob * util;
                    }
                }
            }
            action_utilities.insert(info_set.clone(), act_utils);
        }

        let best_action_index = action_utilities.get(&info_set).map(|u| max_index(u)).unwrap_or(0);
        let next_state = game.with_action(state, actions[best_action_index]);
        return calc_best_response_value(
            game,
            action_utilities,
            reach_probabilities,
            br_player,
            strategy,
            &next_state,
        );
    }

    let strategy_ary = strategy.safe_get_strategy(actions.len(), &info_set);
    let mut node_util = 0.0;
    for (i, act) in actions.iter().enumerate() {
        let next_state = game.with_action(state, *act);
        let util = calc_best_response_value(
            game,
            action_utilities,
            reach_probabilities,
            br_player,
            strategy,
            &next_state,
        );
        node_util += strategy_ary[i] * util;
    }
    node_util
}

/// Expected utility of every player at `state` when all of them follow `strategy`.
pub fn calc_expected_values<G: Game, St: Strategy<G>>(
    game: &G,
    strategy: &St,
    state: &G::State,
) -> Vec<f64> {
    if game.is_terminal(state) {
        return game.get_payouts(state);
    }
    let actions = game.list_legal_actions(state);
    let info_set = game.to_info_set(state);
    let strategy_ary = strategy.safe_get_strategy(actions.len(), &info_set);
    let mut ev = vec![0.0; game.num_players()];
    for (i, act) in actions.iter().enumerate() {
        let act_values = calc_expected_values(game, strategy, &game.with_action(state, *act));
        for (v, act_value) in ev.iter_mut().zip(act_values) {
            *v += strategy_ary[i] * act_value;
        }
    }
    ev
}

/// Expected utility of every player before the deal.
pub fn calc_game_values<G: Game, St: Strategy<G>>(game: &G, strategy: &St) -> Vec<f64> {
    let mut values = vec![0.0; game.num_players()];
    for (deal, prob) in game.list_deals() {
        let root = game.new_root(deal);
        for (v, deal_value) in values.iter_mut().zip(calc_expected_values(game, strategy, &root)) {
            *v += prob * deal_value;
        }
    }
    values
}

/// Best utility `br_player` can get before the deal when everybody else plays `strategy`.
pub fn calc_best_response_game_value<G: Game, St: Strategy<G>>(
    game: &G,
    br_player: usize,
    strategy: &St,
) -> f64 {
    let mut reach_probabilities: HashMap<G::InfoSet, ReachProbabilities<G>> = HashMap::new();
    for (deal, prob) in game.list_deals() {
        let root = game.new_root(deal);
        calc_reach_probabilities(game, br_player, strategy, &root, *prob, &mut reach_probabilities);
    }

    let mut action_utilities: HashMap<G::InfoSet, Vec<f64>> = HashMap::new();
    let mut value = 0.0;
    for (deal, prob) in game.list_deals() {
        let root = game.new_root(deal);
        value += prob
            * calc_best_response_value(
                game,
                &mut action_utilities,
                &reach_probabilities,
                br_player,
                strategy,
                &root,
            );
    }

    if log::log_enabled!(log::Level::Debug) {
        debug!("Best responses for player {}", br_player);
        for info_set in action_utilities.keys().sorted() {
            debug!("    {}: {:?}", info_set, action_utilities[info_set]);
        }
    }
    value
}

/// Sum over players of what each one could gain by deviating to a best response.
/// It is zero exactly at a Nash equilibrium; with two players it is twice the exploitability.
pub fn compute_nash_conv<G: Game, St: Strategy<G>>(game: &G, strategy: &St) -> f64 {
    let values = calc_game_values(game, strategy);
    let mut nash_conv = 0.0;
    for (player, value) in values.iter().enumerate() {
        let br_value = calc_best_response_game_value(game, player, strategy);
        debug!("player {}: util(br): {}, util: {}", player, br_value, value);
        nash_conv += br_value - value;
    }
    debug_assert_ge!(nash_conv, -1e-9, "NashConv must not be negative.");
    nash_conv
}
