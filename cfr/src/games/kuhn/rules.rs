use itertools::Itertools;
use more_asserts::assert_ge;

use super::{
    card::Rank,
    history::{
        History,
        KuhnAction,
    },
};

/// Nobody opened the pot and every player has checked once.
pub fn all_checked(history: &History, num_players: usize) -> bool {
    history.len() == num_players && history.actions().iter().all(|a| *a == KuhnAction::Pass)
}

/// Every other player has responded once to the opening bet.
pub fn betting_closed(history: &History, num_players: usize) -> bool {
    match history.first_bet() {
        Some(bet) => history.len() - bet == num_players,
        None => false,
    }
}

/// The bettor is the only player left: every response to the opening bet was a fold.
pub fn all_but_one_folded(history: &History, num_players: usize) -> bool {
    betting_closed(history, num_players)
        && (0..num_players).filter(|p| history.has_committed(*p, num_players)).count() == 1
}

pub fn is_terminal(history: &History, num_players: usize) -> bool {
    all_checked(history, num_players)
        || betting_closed(history, num_players)
        || all_but_one_folded(history, num_players)
}

fn highest_card_player(cards: &[Rank], players: impl Iterator<Item = usize>) -> Option<usize> {
    players.max_by_key(|p| cards[*p])
}

/// Net result of each player at a terminal `history`.
///
/// Everyone antes 1 and a bet or call costs 1 more. Cards are distinct, so the
/// showdown always has a single winner.
///
/// # Panics
///
/// If `history` is not terminal, or `cards` holds duplicates or doesn't have one card per player.
pub fn payoff(cards: &[Rank], history: &History, num_players: usize) -> Vec<i32> {
    assert_ge!(num_players, 2);
    assert_eq!(num_players, cards.len(), "one card per player is required: {:?}", cards);
    assert!(cards.iter().all_unique(), "cards must be distinct: {:?}", cards);
    assert!(
        is_terminal(history, num_players),
        "payoff is only defined at terminal histories: {}",
        history
    );

    let num_opponents = num_players as i32 - 1;
    let mut payouts = vec![-1; num_players];

    if all_checked(history, num_players) {
        if let Some(winner) = highest_card_player(cards, 0..num_players) {
            payouts[winner] = num_opponents;
        }
        return payouts;
    }

    if all_but_one_folded(history, num_players) {
        if let Some(bettor) = history.first_bet() {
            payouts[bettor % num_players] = num_opponents;
        }
        return payouts;
    }

    let committed: Vec<usize> =
        (0..num_players).filter(|p| history.has_committed(*p, num_players)).collect();
    for p in &committed {
        payouts[*p] = -2;
    }
    if let Some(winner) = highest_card_player(cards, committed.iter().copied()) {
        payouts[winner] = (committed.len() as i32 - 1) + num_opponents;
    }
    payouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::card::{
        deck,
        list_deals,
    };

    fn h(s: &str) -> History {
        s.parse().unwrap()
    }

    fn cards(s: &str) -> Vec<Rank> {
        s.chars().map(|ch| Rank::from_char(ch).unwrap()).collect()
    }

    fn terminal_histories(history: History, num_players: usize, out: &mut Vec<History>) {
        if is_terminal(&history, num_players) {
            out.push(history);
            return;
        }
        assert!(history.len() < History::max_len(num_players));
        for act in KuhnAction::VALUES {
            terminal_histories(history.with_action(act), num_players, out);
        }
    }

    #[test]
    fn test_is_terminal() {
        for n in 2..=4 {
            assert!(!is_terminal(&History::new(), n));
            assert!(is_terminal(&h(&"p".repeat(n)), n));
            assert!(!is_terminal(&h(&"p".repeat(n - 1)), n));
        }
        assert!(!is_terminal(&h("b"), 2));
        assert!(is_terminal(&h("bp"), 2));
        assert!(is_terminal(&h("bb"), 2));
        assert!(!is_terminal(&h("pb"), 2));
        assert!(is_terminal(&h("pbp"), 2));
        assert!(is_terminal(&h("pbb"), 2));

        assert!(!is_terminal(&h("bp"), 3));
        assert!(is_terminal(&h("bpp"), 3));
        assert!(is_terminal(&h("bbb"), 3));
        assert!(!is_terminal(&h("ppbp"), 3));
        assert!(is_terminal(&h("ppbpb"), 3));
    }

    #[test]
    fn test_terminal_history_count() {
        // Two-player Kuhn poker has 5 terminal betting sequences.
        let mut out = vec![];
        terminal_histories(History::new(), 2, &mut out);
        assert_eq!(5, out.len());

        let mut out = vec![];
        terminal_histories(History::new(), 3, &mut out);
        // all-check + bettor in {0, 1, 2} with 4 possible responses each
        assert_eq!(1 + 3 * 4, out.len());
    }

    #[test]
    fn test_showdown_after_checks() {
        assert_eq!(vec![-1, 2, -1], payoff(&cards("9QJ"), &h("ppp"), 3));
        assert_eq!(vec![1, -1], payoff(&cards("KQ"), &h("pp"), 2));
    }

    #[test]
    fn test_fold_out() {
        assert_eq!(vec![2, -1, -1], payoff(&cards("JQK"), &h("bpp"), 3));
        assert_eq!(vec![1, -1], payoff(&cards("JK"), &h("bp"), 2));
        // player 1 opens after a check and both others fold
        assert_eq!(vec![-1, 2, -1], payoff(&cards("KTQ"), &h("pbpp"), 3));
        assert_eq!(vec![-1, 1], payoff(&cards("KJ"), &h("pbp"), 2));
    }

    #[test]
    fn test_showdown_after_bets() {
        assert_eq!(vec![3, -2, -1], payoff(&cards("KQJ"), &h("bbp"), 3));
        assert_eq!(vec![-2, 3, -1], payoff(&cards("QKJ"), &h("bbp"), 3));
        // the highest card folded, so it doesn't win
        assert_eq!(vec![-2, 3, -1], payoff(&cards("TJK"), &h("bbp"), 3));
        assert_eq!(vec![-2, -2, 4], payoff(&cards("9TK"), &h("bbb"), 3));
        assert_eq!(vec![-2, 2], payoff(&cards("JQ"), &h("pbb"), 2));
        assert_eq!(vec![2, -2], payoff(&cards("KQ"), &h("bb"), 2));
    }

    #[test]
    fn test_zero_sum() {
        for n in 2..=4 {
            let mut histories = vec![];
            terminal_histories(History::new(), n, &mut histories);
            for deal in list_deals(&deck(n), n) {
                for history in &histories {
                    let payouts = payoff(&deal, history, n);
                    assert_eq!(0, payouts.iter().sum::<i32>(), "{:?} {}", deal, history);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "terminal")]
    fn test_payoff_on_non_terminal_history() {
        payoff(&cards("JQK"), &h("bp"), 3);
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_payoff_with_duplicate_cards() {
        payoff(&cards("JJK"), &h("ppp"), 3);
    }
}
