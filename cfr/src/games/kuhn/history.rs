use std::{
    fmt::Display,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum KuhnAction {
    /// Check, or fold when facing a bet.
    Pass,
    /// Bet, or call when facing a bet.
    Bet,
}

impl KuhnAction {
    pub const COUNT: usize = 2;
    pub const VALUES: [KuhnAction; Self::COUNT] = [KuhnAction::Pass, KuhnAction::Bet];

    fn to_char(self) -> char {
        match self {
            KuhnAction::Pass => 'p',
            KuhnAction::Bet => 'b',
        }
    }
}

impl Display for KuhnAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Public betting sequence. The `i`-th action was taken by player `i % num_players`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct History {
    actions: Vec<KuhnAction>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Longest possible history: everybody checks up to the last player, who bets,
    /// and the others respond.
    pub fn max_len(num_players: usize) -> usize {
        2 * num_players - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[KuhnAction] {
        &self.actions
    }

    pub fn with_action(&self, action: KuhnAction) -> History {
        let mut next = self.clone();
        next.actions.push(action);
        next
    }

    #[inline]
    pub fn acting_player(&self, num_players: usize) -> usize {
        self.actions.len() % num_players
    }

    /// Position of the bet that opened the pot, if any.
    pub fn first_bet(&self) -> Option<usize> {
        self.actions.iter().position(|a| *a == KuhnAction::Bet)
    }

    /// Actions taken by `player`, in order.
    pub fn player_actions(
        &self,
        player: usize,
        num_players: usize,
    ) -> impl Iterator<Item = KuhnAction> + '_ {
        self.actions.iter().skip(player).step_by(num_players).copied()
    }

    /// Whether `player` has put a bet into the pot, either by betting or calling.
    pub fn has_committed(&self, player: usize, num_players: usize) -> bool {
        self.player_actions(player, num_players).any(|a| a == KuhnAction::Bet)
    }
}

impl From<Vec<KuhnAction>> for History {
    fn from(actions: Vec<KuhnAction>) -> Self {
        History {
            actions,
        }
    }
}

impl FromStr for History {
    type Err = char;

    /// Parses the compact notation, e.g. `"pbp"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|ch| match ch {
                'p' => Ok(KuhnAction::Pass),
                'b' => Ok(KuhnAction::Bet),
                other => Err(other),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(History::from)
    }
}

impl Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for act in &self.actions {
            write!(f, "{}", act.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> History {
        s.parse().unwrap()
    }

    #[test]
    fn test_acting_player() {
        assert_eq!(0, History::new().acting_player(3));
        assert_eq!(1, h("p").acting_player(3));
        assert_eq!(2, h("pb").acting_player(3));
        assert_eq!(0, h("pbp").acting_player(3));
        assert_eq!(1, h("pbp").acting_player(2));
    }

    #[test]
    fn test_player_actions() {
        let history = h("pbpb");
        assert_eq!(vec![KuhnAction::Pass, KuhnAction::Bet], history.player_actions(0, 3).collect::<Vec<_>>());
        assert_eq!(vec![KuhnAction::Bet], history.player_actions(1, 3).collect::<Vec<_>>());
        assert_eq!(vec![KuhnAction::Pass], history.player_actions(2, 3).collect::<Vec<_>>());
        assert!(history.has_committed(0, 3));
        assert!(history.has_committed(1, 3));
        assert!(!history.has_committed(2, 3));
        assert_eq!(Some(1), history.first_bet());
        assert_eq!(None, h("ppp").first_bet());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("pbp", h("pbp").to_string());
        assert_eq!("", History::new().to_string());
        assert_eq!(Err('x'), "pxb".parse::<History>());
        assert_eq!(h("pb"), h("p").with_action(KuhnAction::Bet));
    }
}
