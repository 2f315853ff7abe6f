use super::cost::Cost;
use crate::codes::codeword::Codeword;
use crate::engine::engine::Engine;
use crate::engine::frequency::FrequencyTable;

/// lower-bound estimator for the optimal search. precomputes,
/// for every possible set size n, the fewest total steps any
/// strategy could need to reveal n secrets when each guess can
/// split a set into at most b = P(P+3)/2 - 1 non-perfect cells.
pub struct Bounds {
    cache: Vec<Cost>,
}

impl Bounds {
    pub fn new(engine: &Engine) -> Self {
        let p = engine.rules().pegs();
        let b = p * (p + 3) / 2 - 1;
        let cache = (0..=engine.universe().len())
            .map(|n| Self::simple(n, b))
            .collect();
        Self { cache }
    }

    // the ideal tree: one secret revealed by the first guess,
    // b more by the second level, b^2 more by the third, ...
    fn simple(n: usize, b: usize) -> Cost {
        let mut cost = Cost::zero();
        let mut remaining = n;
        let mut count = 1;
        while remaining > 0 {
            cost.steps += remaining as u32;
            cost.depth += 1;
            remaining = remaining.saturating_sub(count);
            count = count.saturating_mul(b);
        }
        cost
    }

    /// least total steps to reveal n secrets under these rules
    pub fn simple_estimate(&self, n: usize) -> Cost {
        self.cache[n]
    }

    /// lower bound of the cost of a guess with the given
    /// partition, excluding the guess itself: each non-perfect
    /// cell still costs at least its simple estimate
    pub fn estimate(&self, engine: &Engine, freq: &FrequencyTable) -> Cost {
        let perfect = engine.perfect().ordinal();
        let mut bound = Cost::zero();
        for k in 0..freq.len() {
            if freq[k] == 0 || k == perfect {
                continue;
            }
            let cell = self.simple_estimate(freq[k] as usize);
            bound.steps += cell.steps;
            bound.depth = bound.depth.max(cell.depth);
        }
        bound
    }

    /// lower bounds for every candidate against a secret set
    pub fn evaluate(
        &self,
        engine: &Engine,
        secrets: &[Codeword],
        candidates: &[Codeword],
    ) -> Vec<Cost> {
        candidates
            .iter()
            .map(|guess| self.estimate(engine, &engine.frequencies(guess, secrets)))
            .collect()
    }
}
