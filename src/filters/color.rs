use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::mask::ColorMask;
use crate::codes::rules::Rules;
use crate::engine::engine::Engine;

/// prunes guesses that differ only by a relabeling of
/// indistinguishable colors. two masks track the state: colors
/// never seen in any guess, and colors known impossible given
/// the remaining possibilities. all excluded colors are
/// interchangeable, so only the candidate using the smallest
/// labels first survives.
#[derive(Clone, Debug)]
pub struct ColorFilter {
    unguessed: ColorMask,
    excluded: ColorMask,
}

impl ColorFilter {
    pub fn new(rules: &Rules) -> Self {
        Self {
            unguessed: ColorMask::fill(rules.colors()),
            excluded: ColorMask::empty(),
        }
    }

    pub fn unguessed(&self) -> ColorMask {
        self.unguessed
    }
    pub fn excluded(&self) -> ColorMask {
        self.excluded
    }

    pub fn constrain(
        &mut self,
        engine: &Engine,
        guess: &Codeword,
        _response: Feedback,
        remaining: &[Codeword],
    ) {
        let mut excluded = ColorMask::fill(engine.rules().colors());
        excluded -= engine.color_mask(remaining);
        self.excluded = excluded;
        self.unguessed -= guess.colors();
        self.unguessed -= excluded;
    }

    pub fn canonical(&self, engine: &Engine, candidates: &[Codeword]) -> Vec<Codeword> {
        if engine.rules().repeatable() {
            self.canonical_rep(candidates)
        } else {
            self.canonical_norep(candidates)
        }
    }

    // with repetition, an excluded color may appear any number of
    // times, so the canonical representative uses only the
    // smallest excluded label.
    fn canonical_rep(&self, candidates: &[Codeword]) -> Vec<Codeword> {
        if self.excluded.is_empty() {
            return candidates.to_vec();
        }
        let first = self.excluded.smallest();
        candidates
            .iter()
            .copied()
            .filter(|guess| {
                guess
                    .digits()
                    .all(|c| !self.excluded.contains(c) || c == first)
            })
            .collect()
    }

    // without repetition, excluded colors along the pegs must
    // appear as the smallest not-yet-seen excluded labels, in
    // order.
    fn canonical_norep(&self, candidates: &[Codeword]) -> Vec<Codeword> {
        if self.excluded.empty_or_unique() {
            return candidates.to_vec();
        }
        candidates
            .iter()
            .copied()
            .filter(|guess| {
                let mut excluded = self.excluded;
                for c in guess.digits() {
                    if excluded.contains(c) {
                        if excluded.any_below(c) {
                            return false;
                        }
                        excluded.remove(c);
                    }
                }
                true
            })
            .collect()
    }
}
