use super::heuristic::Heuristic;
use crate::codes::codeword::Codeword;
use crate::engine::engine::Engine;

/// the closed set of guessing strategies. a strategy maps the
/// current possibilities and a candidate list to a guess; the
/// guess, when made, always comes from one of the two lists.
/// returning None signals the strategy cannot or will not choose.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// the first remaining possibility
    Simple,
    /// an obviously optimal guess, if one exists; serves as a
    /// fast path in front of the heavier strategies
    Obvious,
    /// the candidate with the best heuristic score
    Heuristic(Heuristic),
}

impl Strategy {
    pub fn make_guess(
        &self,
        engine: &Engine,
        possibilities: &[Codeword],
        candidates: &[Codeword],
    ) -> Option<Codeword> {
        match self {
            Self::Simple => possibilities.first().copied(),
            Self::Obvious => self.obvious(engine, possibilities),
            Self::Heuristic(heuristic) => {
                self.heuristic(engine, *heuristic, possibilities, candidates)
            }
        }
    }

    // a guess from the possibility set that splits every
    // remaining possibility into its own cell. with one or two
    // possibilities the first one is trivially optimal; beyond
    // the feedback cardinality no such guess can exist.
    fn obvious(&self, engine: &Engine, possibilities: &[Codeword]) -> Option<Codeword> {
        let count = possibilities.len();
        let p = engine.rules().pegs();
        match count {
            0 => None,
            1 | 2 => Some(possibilities[0]),
            _ if count > p * (p + 3) / 2 => None,
            _ => possibilities
                .iter()
                .find(|guess| engine.frequencies(guess, possibilities).max() == 1)
                .copied(),
        }
    }

    // evaluate every candidate and keep the best score. ties
    // prefer a candidate that is itself a possibility (its table
    // has a non-zero perfect bucket); further ties keep the
    // earliest candidate.
    fn heuristic(
        &self,
        engine: &Engine,
        heuristic: Heuristic,
        possibilities: &[Codeword],
        candidates: &[Codeword],
    ) -> Option<Codeword> {
        let perfect = engine.perfect().ordinal();
        let mut choice = None;
        for candidate in candidates {
            let freq = engine.frequencies(candidate, possibilities);
            let score = heuristic.score(&freq);
            let possible = freq[perfect] > 0;
            choice = match choice {
                None => Some((*candidate, score, possible)),
                Some((_, best, was_possible))
                    if score.better_than(&best) || (score.ties(&best) && possible && !was_possible) =>
                {
                    Some((*candidate, score, possible))
                }
                keep => keep,
            };
        }
        choice.map(|(guess, _, _)| guess)
    }
}

impl TryFrom<&str> for Strategy {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "simple" => Ok(Self::Simple),
            "obvious" => Ok(Self::Obvious),
            _ => Heuristic::try_from(s).map(Self::Heuristic),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Obvious => write!(f, "obvious"),
            Self::Heuristic(h) => write!(f, "{}", h),
        }
    }
}
