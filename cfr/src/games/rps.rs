use std::fmt::Display;

/// Actions of the one-shot cyclic game. Each action beats the one before it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RpsAction {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl RpsAction {
    pub const COUNT: usize = 3;
    pub const VALUES: [RpsAction; Self::COUNT] =
        [RpsAction::Rock, RpsAction::Paper, RpsAction::Scissors];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for RpsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Payoff of playing `a` against `b`: 1 for a win, 0 for a draw, -1 for a loss.
pub fn calc_payoff(a: RpsAction, b: RpsAction) -> i32 {
    match (a.index() + RpsAction::COUNT - b.index()) % RpsAction::COUNT {
        0 => 0,
        1 => 1,
        _ => -1,
    }
}

/// How much better every action would have done against `opponent_action`
/// compared to the realized payoff.
pub fn regret_vector(realized_payoff: i32, opponent_action: RpsAction) -> [i32; RpsAction::COUNT] {
    RpsAction::VALUES.map(|action| calc_payoff(action, opponent_action) - realized_payoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoffs() {
        assert_eq!(1, calc_payoff(RpsAction::Paper, RpsAction::Rock));
        assert_eq!(1, calc_payoff(RpsAction::Scissors, RpsAction::Paper));
        assert_eq!(1, calc_payoff(RpsAction::Rock, RpsAction::Scissors));
        assert_eq!(-1, calc_payoff(RpsAction::Rock, RpsAction::Paper));
    }

    #[test]
    fn test_draws() {
        for a in RpsAction::VALUES {
            assert_eq!(0, calc_payoff(a, a));
        }
    }

    #[test]
    fn test_zero_sum() {
        for a in RpsAction::VALUES {
            for b in RpsAction::VALUES {
                assert_eq!(calc_payoff(a, b), -calc_payoff(b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_regret_vector() {
        // Lost with Scissors against Rock.
        let realized = calc_payoff(RpsAction::Scissors, RpsAction::Rock);
        assert_eq!([1, 2, 0], regret_vector(realized, RpsAction::Rock));

        // No regret for the played action.
        for a in RpsAction::VALUES {
            for b in RpsAction::VALUES {
                assert_eq!(0, regret_vector(calc_payoff(a, b), b)[a.index()]);
            }
        }
    }
}
