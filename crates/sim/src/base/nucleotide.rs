use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Allele state at a simulated site.
///
/// Sites follow the Jukes-Cantor model: the ancestral state is drawn
/// uniformly from the four bases and every mutation moves to one of the
/// three other bases with equal probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Self::A, Self::C, Self::G, Self::T];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Draw a root state uniformly from the four bases.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..4)]
    }

    /// One JC69 substitution.
    pub fn mutate<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        // offsets 1..=3 never land on the current base
        let offset = rng.random_range(1..4);
        Self::ALL[(self.index() + offset) % 4]
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        };
        write!(f, "{c}")
    }
}
