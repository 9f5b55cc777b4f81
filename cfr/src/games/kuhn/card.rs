use std::fmt::Display;

use itertools::Itertools;
use rand::{
    seq::SliceRandom,
    Rng,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const COUNT: usize = 5;
    pub const VALUES: [Rank; Self::COUNT] = [Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King];

    pub fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            _ => None,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = match self {
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        write!(f, "{}", r)
    }
}

/// The `num_players + 1` highest ranks, lowest first.
pub fn deck(num_players: usize) -> Vec<Rank> {
    debug_assert!(num_players < Rank::COUNT);
    Rank::VALUES[Rank::COUNT - num_players - 1..].to_vec()
}

/// Every distinct way of handing one card of `deck` to each of `num_players` players.
pub fn list_deals(deck: &[Rank], num_players: usize) -> Vec<Vec<Rank>> {
    deck.iter().copied().permutations(num_players).collect()
}

pub fn sample_deal<R: Rng>(rng: &mut R, deck: &[Rank], num_players: usize) -> Vec<Rank> {
    let mut cards = deck.to_vec();
    cards.shuffle(rng);
    cards.truncate(num_players);
    cards
}

pub fn count_permutations(n: usize, r: usize) -> usize {
    (n - r + 1..=n).product()
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use wyhash::WyRng;

    use super::*;

    #[test]
    fn test_deck() {
        assert_eq!(vec![Rank::Jack, Rank::Queen, Rank::King], deck(2));
        assert_eq!(vec![Rank::Ten, Rank::Jack, Rank::Queen, Rank::King], deck(3));
        assert_eq!(Rank::VALUES.to_vec(), deck(4));
    }

    #[test]
    fn test_list_deals() {
        for n in 2..=4 {
            let deck = deck(n);
            let deals = list_deals(&deck, n);
            assert_eq!(count_permutations(deck.len(), n), deals.len());
            assert!(deals.iter().all_unique());
            for deal in &deals {
                assert_eq!(n, deal.len());
                assert!(deal.iter().all_unique());
            }
        }
        assert_eq!(6, list_deals(&deck(2), 2).len());
        assert_eq!(24, list_deals(&deck(3), 3).len());
    }

    #[test]
    fn test_sample_deal() {
        let mut rng = WyRng::seed_from_u64(42);
        let deck = deck(3);
        for _ in 0..100 {
            let deal = sample_deal(&mut rng, &deck, 3);
            assert_eq!(3, deal.len());
            assert!(deal.iter().all_unique());
            assert!(deal.iter().all(|c| deck.contains(c)));
        }
    }

    #[test]
    fn test_rank_chars() {
        for rank in Rank::VALUES {
            let ch = rank.to_string().chars().next().unwrap();
            assert_eq!(Some(rank), Rank::from_char(ch));
        }
        assert_eq!(None, Rank::from_char('A'));
    }
}
