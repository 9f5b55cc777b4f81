pub mod cfr;
pub mod regret_matching;
