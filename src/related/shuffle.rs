/// Source of the ordering used by the random-fill tier.
///
/// `RandomShuffle` for production (optionally seeded); `KeepOrder` when a test
/// needs the fill to be reproducible.
pub trait Shuffle {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

#[derive(Debug, Clone)]
pub struct RandomShuffle(fastrand::Rng);

impl RandomShuffle {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for RandomShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffle for RandomShuffle {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        self.0.shuffle(items);
    }
}

/// Leaves the candidates in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl Shuffle for KeepOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
