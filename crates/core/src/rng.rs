//! RNG module - where the next piece comes from
//!
//! Three sources share one [`PieceQueue`] type:
//!
//! - **Uniform**: every draw picks one of the seven kinds independently (the
//!   classic behavior, and the default)
//! - **Seven-bag**: each bag holds one of every kind, shuffled, drawn empty
//!   before the next bag is made
//! - **Scripted**: a fixed list replayed in a loop, for deterministic runs
//!
//! Randomness comes from a small seeded LCG so identical seeds replay
//! identical games.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, m = 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are the well-mixed ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Which randomizer a game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    SevenBag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "sevenbag" | "7bag" | "bag" => Some(Randomizer::SevenBag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::SevenBag => "seven-bag",
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Uniform,
    SevenBag {
        bag: [PieceKind; 7],
        bag_index: usize,
    },
    Scripted {
        pieces: Vec<PieceKind>,
        index: usize,
    },
}

/// Next-piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    source: Source,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        match randomizer {
            Randomizer::Uniform => Self::uniform(seed),
            Randomizer::SevenBag => Self::seven_bag(seed),
        }
    }

    pub fn uniform(seed: u32) -> Self {
        Self {
            source: Source::Uniform,
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seven_bag(seed: u32) -> Self {
        let mut queue = Self {
            source: Source::SevenBag {
                bag: PieceKind::ALL,
                bag_index: 0,
            },
            rng: SimpleRng::new(seed),
            seed,
        };
        queue.refill_bag();
        queue
    }

    /// Replay `pieces` in order, wrapping around. Returns `None` for an empty list.
    pub fn scripted(pieces: Vec<PieceKind>) -> Option<Self> {
        if pieces.is_empty() {
            return None;
        }
        Some(Self {
            source: Source::Scripted { pieces, index: 0 },
            rng: SimpleRng::new(1),
            seed: 0,
        })
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        if let Source::SevenBag { bag, bag_index } = &mut self.source {
            *bag = PieceKind::ALL;
            self.rng.shuffle(bag);
            *bag_index = 0;
        }
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        if matches!(self.source, Source::SevenBag { bag_index: 7, .. }) {
            self.refill_bag();
        }

        match &mut self.source {
            Source::Uniform => PieceKind::ALL[self.rng.next_range(7) as usize],
            Source::SevenBag { bag, bag_index } => {
                let piece = bag[*bag_index];
                *bag_index += 1;
                piece
            }
            Source::Scripted { pieces, index } => {
                let piece = pieces[*index];
                *index = (*index + 1) % pieces.len();
                piece
            }
        }
    }

    /// Seed this queue was created with (0 for scripted queues)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// A fresh queue that will replay the same sequence from the start
    pub fn restarted(&self) -> Self {
        match &self.source {
            Source::Uniform => Self::uniform(self.seed),
            Source::SevenBag { .. } => Self::seven_bag(self.seed),
            Source::Scripted { pieces, .. } => Self {
                source: Source::Scripted {
                    pieces: pieces.clone(),
                    index: 0,
                },
                rng: SimpleRng::new(1),
                seed: 0,
            },
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::uniform(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_eventually_draws_every_kind() {
        let mut queue = PieceQueue::uniform(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[queue.draw().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_seven_bag_draws_all_seven() {
        let mut queue = PieceQueue::seven_bag(1);

        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| queue.draw()).collect();
            drawn.sort_by_key(|k| k.index());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_scripted_wraps() {
        let mut queue = PieceQueue::scripted(vec![PieceKind::O, PieceKind::T]).unwrap();
        let drawn: Vec<PieceKind> = (0..5).map(|_| queue.draw()).collect();
        assert_eq!(
            drawn,
            vec![
                PieceKind::O,
                PieceKind::T,
                PieceKind::O,
                PieceKind::T,
                PieceKind::O
            ]
        );
        assert!(PieceQueue::scripted(Vec::new()).is_none());
    }

    #[test]
    fn test_restarted_replays_sequence() {
        for mut queue in [PieceQueue::uniform(42), PieceQueue::seven_bag(42)] {
            let first: Vec<PieceKind> = (0..10).map(|_| queue.draw()).collect();
            let mut again = queue.restarted();
            let second: Vec<PieceKind> = (0..10).map(|_| again.draw()).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_randomizer_parse() {
        assert_eq!(Randomizer::from_str("uniform"), Some(Randomizer::Uniform));
        assert_eq!(Randomizer::from_str("seven-bag"), Some(Randomizer::SevenBag));
        assert_eq!(Randomizer::from_str("7bag"), Some(Randomizer::SevenBag));
        assert_eq!(Randomizer::from_str("nope"), None);
    }
}
