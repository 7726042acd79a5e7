use rand::Rng;
use rand::seq::SliceRandom;

/// Source of every random choice the question generators make.
pub trait Randomizer {
    fn shuffle<T>(&mut self, items: &mut [T]);
    fn coin(&mut self) -> bool;
}

pub struct RngRandomizer<R: Rng>(pub R);

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

/// Leaves order untouched and answers every coin flip with `coin`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrder {
    pub coin: bool,
}

impl FixedOrder {
    pub fn heads() -> Self {
        Self { coin: true }
    }

    pub fn tails() -> Self {
        Self { coin: false }
    }
}

impl Randomizer for FixedOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}

    fn coin(&mut self) -> bool {
        self.coin
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn seeded_rng_shuffles_reproducibly() {
        let mut a = RngRandomizer(SmallRng::seed_from_u64(7));
        let mut b = RngRandomizer(SmallRng::seed_from_u64(7));
        let mut xs: Vec<u32> = (0..20).collect();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);
        let mut sorted = xs.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn fixed_order_is_identity() {
        let mut fixed = FixedOrder::tails();
        let mut xs = vec![3, 1, 2];
        fixed.shuffle(&mut xs);
        assert_eq!(xs, vec![3, 1, 2]);
        assert!(!fixed.coin());
        assert!(FixedOrder::heads().coin());
    }
}
