use rand::Rng;

pub mod kuhn;
pub mod rps;

/// A sequential game whose only chance move is the deal of private information at the root.
pub trait Game {
    type State: Clone + std::fmt::Debug + std::hash::Hash + Eq;
    type InfoSet: std::fmt::Display + std::hash::Hash + Ord + Clone;
    type Action: std::fmt::Display + std::fmt::Debug + Copy + Eq;
    type Deal: Clone + std::fmt::Debug;

    fn num_players(&self) -> usize;

    /// Every possible deal together with its probability.
    fn list_deals(&self) -> &[(Self::Deal, f64)];

    fn sample_deal<R: Rng>(&self, rng: &mut R) -> Self::Deal;

    fn new_root(&self, deal: &Self::Deal) -> Self::State;

    fn to_info_set(&self, state: &Self::State) -> Self::InfoSet;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Net result of every player. Must only be called on terminal states.
    fn get_payouts(&self, state: &Self::State) -> Vec<f64>;

    fn get_node_player_id(&self, state: &Self::State) -> usize;

    fn with_action(&self, state: &Self::State, action: Self::Action) -> Self::State;

    fn list_legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;
}
