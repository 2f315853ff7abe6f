use super::rules::Rules;
use crate::Error;
use crate::MAX_PEGS;

const EMPTY: u8 = 0xFF;

/// the outcome of comparing a guess against a secret: nA colors in
/// the right position, nB further colors in the wrong position.
///
/// stored as a single byte holding the ordinal of the pair in a
/// triangular arrangement where every diagonal shares nA + nB:
///
/// ```text
/// 0A0B  1A0B  2A0B  3A0B  4A0B
/// 0A1B  1A1B  2A1B  3A1B
/// 0A2B  1A2B  2A2B
/// 0A3B  1A3B
/// 0A4B
/// ```
///
/// the ordinal is k = s(s+1)/2 + nA with s = nA + nB, so a p-peg
/// game occupies ordinals [0, p(p+3)/2], with the perfect feedback
/// (p, 0) packing to the largest ordinal. (p-1, 1) is unreachable
/// but keeps its slot. 0xFF marks an empty feedback.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Feedback(u8);

impl Feedback {
    const fn pack(a: u8, b: u8) -> u8 {
        let s = a as u16 + b as u16;
        (s * (s + 1) / 2 + a as u16) as u8
    }

    fn unpack(self) -> (u8, u8) {
        debug_assert!(!self.is_empty());
        let v = self.0 as u16;
        let mut s = 0u16;
        while (s + 1) * (s + 2) / 2 <= v {
            s += 1;
        }
        let a = v - s * (s + 1) / 2;
        (a as u8, (s - a) as u8)
    }

    pub fn new(a: u8, b: u8) -> Result<Self, Error> {
        if a as usize + (b as usize) <= MAX_PEGS {
            Ok(Self(Self::pack(a, b)))
        } else {
            Err(Error::InvalidFeedback(format!("{}A{}B", a, b)))
        }
    }

    pub const fn empty() -> Self {
        Self(EMPTY)
    }
    pub const fn is_empty(&self) -> bool {
        self.0 == EMPTY
    }

    /// colors matched in the right position (nA)
    pub fn exact(&self) -> u8 {
        self.unpack().0
    }
    /// colors matched in the wrong position (nB)
    pub fn misplaced(&self) -> u8 {
        self.unpack().1
    }

    pub const fn ordinal(&self) -> usize {
        self.0 as usize
    }
    pub const fn from_ordinal(k: usize) -> Self {
        Self(k as u8)
    }

    /// the all-pegs-correct feedback for a rule set
    pub fn perfect(rules: &Rules) -> Self {
        Self(Self::pack(rules.pegs() as u8, 0))
    }

    /// number of ordinal slots a frequency table needs for a rule
    /// set: p(p+3)/2 + 1, one past the perfect ordinal
    pub fn size(rules: &Rules) -> usize {
        let p = rules.pegs();
        p * (p + 3) / 2 + 1
    }

    /// compact (nA << 4) | nB form for lookup-table indexing
    pub fn compact(self) -> u8 {
        let (a, b) = self.unpack();
        (a << 4) | b
    }
    pub fn from_compact(x: u8) -> Self {
        Self(Self::pack(x >> 4, x & 0x0F))
    }
}

/// "1A2B" isomorphism
impl TryFrom<&str> for Feedback {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bytes = s.as_bytes();
        match bytes {
            [a, b'A' | b'a', b, b'B' | b'b'] if a.is_ascii_digit() && b.is_ascii_digit() => {
                Self::new(a - b'0', b - b'0')
            }
            _ => Err(Error::InvalidFeedback(s.to_string())),
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "-A-B")
        } else {
            let (a, b) = self.unpack();
            write!(f, "{}A{}B", a, b)
        }
    }
}
