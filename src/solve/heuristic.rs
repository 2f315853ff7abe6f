use crate::SCORE_TOLERANCE;
use crate::engine::frequency::FrequencyTable;

/// a heuristic score. lower is better for every heuristic (the
/// maximizing ones negate). backed by f64 and compared with a
/// fixed tolerance so that entropy ties break identically across
/// targets; the integral heuristics are exact in f64 anyway.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Score(f64);

impl Score {
    pub fn better_than(&self, other: &Self) -> bool {
        self.0 < other.0 - SCORE_TOLERANCE
    }
    pub fn ties(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() <= SCORE_TOLERANCE
    }
}

/// the closed set of scoring functions a heuristic strategy can
/// drive. each maps the frequency table of a candidate guess to
/// a score to minimize. adding one is a design event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Heuristic {
    /// smallest worst-case cell (Knuth, 1976)
    MinMax,
    /// fewest expected remaining possibilities, i.e. sum of
    /// squared cell sizes (Irving, 1978)
    MinAvg,
    /// highest entropy of the cell distribution (Neuwirth, 1982)
    MaxEntropy,
    /// most non-empty cells
    MaxParts,
}

impl Heuristic {
    pub fn score(&self, freq: &FrequencyTable) -> Score {
        Score(match self {
            Self::MinMax => freq.max() as f64,
            Self::MinAvg => freq.iter().map(|f| (f as f64) * (f as f64)).sum(),
            Self::MaxEntropy => freq
                .iter()
                .filter(|f| *f > 1)
                .map(|f| (f as f64) * (f as f64).ln())
                .sum(),
            Self::MaxParts => -(freq.nonzero() as f64),
        })
    }
}

impl TryFrom<&str> for Heuristic {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "minmax" => Ok(Self::MinMax),
            "minavg" => Ok(Self::MinAvg),
            "entropy" => Ok(Self::MaxEntropy),
            "parts" => Ok(Self::MaxParts),
            _ => Err(crate::Error::InvalidRules(format!("unknown heuristic {}", s))),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinMax => write!(f, "minmax"),
            Self::MinAvg => write!(f, "minavg"),
            Self::MaxEntropy => write!(f, "entropy"),
            Self::MaxParts => write!(f, "parts"),
        }
    }
}
