//! Kuhn poker generalized to N players.
//!
//! Every player antes 1 and is dealt one private card from a deck of `N + 1` ranks.
//! Players act in turn: before anybody bets they may check or bet 1, and once a bet
//! is on the table everybody else may either call or fold.

pub mod card;
pub mod history;
pub mod rules;

use std::fmt::Display;

use log::debug;
use rand::Rng;

use self::{
    card::{
        count_permutations,
        deck,
        list_deals,
        sample_deal,
        Rank,
    },
    history::{
        History,
        KuhnAction,
    },
};
use super::Game;
use crate::error::{
    Result,
    SolverError,
};

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KuhnInfoSet {
    pub history: History,
    pub player_id: usize,
    pub card: Rank,
}

impl Display for KuhnInfoSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}({}): [{:5}]", self.player_id, self.card, self.history.to_string())
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KuhnState {
    pub cards: Vec<Rank>,
    pub history: History,
}

impl From<&KuhnState> for KuhnInfoSet {
    fn from(state: &KuhnState) -> Self {
        let player_id = state.history.acting_player(state.cards.len());
        KuhnInfoSet {
            history: state.history.clone(),
            player_id,
            card: state.cards[player_id],
        }
    }
}

pub struct Kuhn {
    num_players: usize,
    deck: Vec<Rank>,
    deals: Vec<(Vec<Rank>, f64)>,
}

impl Kuhn {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = Rank::COUNT - 1;

    pub fn new(num_players: usize) -> Result<Self> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&num_players) {
            return Err(SolverError::PlayerCount {
                players: num_players,
                min: Self::MIN_PLAYERS,
                max: Self::MAX_PLAYERS,
            });
        }
        let deck = deck(num_players);
        let prob = 1.0 / count_permutations(deck.len(), num_players) as f64;
        let deals: Vec<(Vec<Rank>, f64)> =
            list_deals(&deck, num_players).into_iter().map(|cards| (cards, prob)).collect();
        debug!("{}-player Kuhn poker: deck {:?}, {} deals", num_players, deck, deals.len());

        Ok(Self {
            num_players,
            deck,
            deals,
        })
    }

    pub fn deck(&self) -> &[Rank] {
        &self.deck
    }
}

impl Game for Kuhn {
    type State = KuhnState;
    type InfoSet = KuhnInfoSet;
    type Action = KuhnAction;
    type Deal = Vec<Rank>;

    #[inline]
    fn num_players(&self) -> usize {
        self.num_players
    }

    fn list_deals(&self) -> &[(Self::Deal, f64)] {
        &self.deals
    }

    fn sample_deal<R: Rng>(&self, rng: &mut R) -> Self::Deal {
        sample_deal(rng, &self.deck, self.num_players)
    }

    fn new_root(&self, deal: &Self::Deal) -> Self::State {
        debug_assert_eq!(self.num_players, deal.len());
        KuhnState {
            cards: deal.clone(),
            history: History::new(),
        }
    }

    #[inline]
    fn to_info_set(&self, state: &Self::State) -> Self::InfoSet {
        state.into()
    }

    #[inline]
    fn is_terminal(&self, state: &Self::State) -> bool {
        rules::is_terminal(&state.history, self.num_players)
    }

    fn get_payouts(&self, state: &Self::State) -> Vec<f64> {
        rules::payoff(&state.cards, &state.history, self.num_players)
            .into_iter()
            .map(f64::from)
            .collect()
    }

    #[inline]
    fn get_node_player_id(&self, state: &Self::State) -> usize {
        state.history.acting_player(self.num_players)
    }

    fn with_action(&self, state: &Self::State, action: KuhnAction) -> Self::State {
        KuhnState {
            cards: state.cards.clone(),
            history: state.history.with_action(action),
        }
    }

    fn list_legal_actions(&self, _state: &Self::State) -> Vec<KuhnAction> {
        KuhnAction::VALUES.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_count() {
        assert!(matches!(
            Kuhn::new(1),
            Err(SolverError::PlayerCount {
                players: 1,
                ..
            })
        ));
        assert!(Kuhn::new(5).is_err());
        for n in 2..=4 {
            assert_eq!(n, Kuhn::new(n).unwrap().num_players());
        }
    }

    #[test]
    fn test_deal_probabilities() {
        let game = Kuhn::new(3).unwrap();
        let total: f64 = game.list_deals().iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_info_set() {
        let game = Kuhn::new(3).unwrap();
        let deal = vec![Rank::Jack, Rank::King, Rank::Ten];
        let root = game.new_root(&deal);
        let state = game.with_action(&root, KuhnAction::Pass);

        assert_eq!(1, game.get_node_player_id(&state));
        let info_set = game.to_info_set(&state);
        assert_eq!(1, info_set.player_id);
        assert_eq!(Rank::King, info_set.card);
        assert_eq!("p", info_set.history.to_string());

        // Opponents' cards are hidden.
        let other = game.new_root(&vec![Rank::Queen, Rank::King, Rank::Jack]);
        let other = game.with_action(&other, KuhnAction::Pass);
        assert_eq!(info_set, game.to_info_set(&other));
    }

    #[test]
    fn test_payouts() {
        let game = Kuhn::new(2).unwrap();
        let root = game.new_root(&vec![Rank::King, Rank::Jack]);
        let state = game.with_action(&root, KuhnAction::Bet);
        assert!(!game.is_terminal(&state));
        let state = game.with_action(&state, KuhnAction::Bet);
        assert!(game.is_terminal(&state));
        assert_eq!(vec![2.0, -2.0], game.get_payouts(&state));
    }
}
