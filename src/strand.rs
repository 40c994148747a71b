use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// One unit of the four-letter strand alphabet.
///
/// The derived ordering (`A < C < G < T`) is the enumeration order used by
/// [`Strand::all_of_length`] and by the survey reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// All bases in enumeration order.
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// The fixed pairing partner: A↔T, C↔G.
    pub fn complement(self) -> Base {
        match self {
            Base::A => Base::T,
            Base::T => Base::A,
            Base::C => Base::G,
            Base::G => Base::C,
        }
    }

    /// Purines are A and G.
    pub fn is_purine(self) -> bool {
        matches!(self, Base::A | Base::G)
    }

    /// Pyrimidines are C and T.
    pub fn is_pyrimidine(self) -> bool {
        matches!(self, Base::C | Base::T)
    }

    pub fn from_char(ch: char) -> Option<Base> {
        match ch {
            'A' => Some(Base::A),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A character outside the strand alphabet, reported before any translation
/// or execution takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid base {found:?} at position {position} (alphabet is A, C, G, T)")]
pub struct InvalidBase {
    pub found: char,
    pub position: usize,
}

/// An ordered, finite sequence of bases.
///
/// Strands are immutable values: every engine operation that changes a strand
/// produces new `Strand`s. The empty strand is valid (it translates to no
/// enzymes and binds no enzyme).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Strand(Vec<Base>);

impl Strand {
    pub fn bases(&self) -> &[Base] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The complementary strand, read in reverse order (the reverse
    /// complement). Applying this twice returns the original strand.
    pub fn complementary(&self) -> Strand {
        Strand(self.0.iter().rev().map(|b| b.complement()).collect())
    }

    /// All `4^len` strands of the given length, in lexicographic order
    /// (`A < C < G < T`). `len == 0` yields the single empty strand.
    pub fn all_of_length(len: usize) -> impl Iterator<Item = Strand> {
        // Odometer over base-4 digits, most significant first.
        let mut digits = vec![0usize; len];
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let strand = Strand(digits.iter().map(|&d| Base::ALL[d]).collect());
            let mut i = digits.len();
            loop {
                if i == 0 {
                    done = true;
                    break;
                }
                i -= 1;
                if digits[i] < 3 {
                    digits[i] += 1;
                    break;
                }
                digits[i] = 0;
            }
            Some(strand)
        })
    }

    /// A uniformly random strand with length in `min_len..=max_len`.
    ///
    /// Callers seed the RNG themselves, so the same seed reproduces the same
    /// strand. `min_len` must not exceed `max_len`.
    pub fn random<R: Rng>(rng: &mut R, min_len: usize, max_len: usize) -> Strand {
        let len = rng.gen_range(min_len..=max_len);
        Strand((0..len).map(|_| Base::ALL[rng.gen_range(0..4)]).collect())
    }
}

impl From<Vec<Base>> for Strand {
    fn from(bases: Vec<Base>) -> Self {
        Strand(bases)
    }
}

impl FromIterator<Base> for Strand {
    fn from_iter<I: IntoIterator<Item = Base>>(iter: I) -> Self {
        Strand(iter.into_iter().collect())
    }
}

impl FromStr for Strand {
    type Err = InvalidBase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| Base::from_char(ch).ok_or(InvalidBase { found: ch, position }))
            .collect()
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strand({self})")
    }
}
