use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::mask::ColorMask;
use crate::codes::permutation::CodewordPermutation;
use crate::codes::rules::Rules;
use crate::engine::engine::Engine;

/// prunes guesses equivalent under the peg/color symmetries that
/// fix every past guess. starts from all P! peg permutations with
/// fully unspecified color maps; each constraint discards the
/// pairs that cannot map the guess onto itself and tightens the
/// color maps of those that can. a candidate is canonical iff no
/// surviving pair maps it to a lexicographically smaller codeword.
#[derive(Clone, Debug)]
pub struct ConstraintFilter {
    rules: Rules,
    free: ColorMask,
    pairs: Vec<CodewordPermutation>,
}

impl ConstraintFilter {
    pub fn new(rules: &Rules) -> Self {
        Self {
            rules: *rules,
            free: ColorMask::fill(rules.colors()),
            pairs: CodewordPermutation::exhaust(*rules),
        }
    }

    pub fn pairs(&self) -> &[CodewordPermutation] {
        &self.pairs
    }

    pub fn constrain(
        &mut self,
        _engine: &Engine,
        guess: &Codeword,
        _response: Feedback,
        _remaining: &[Codeword],
    ) {
        let pegs = self.rules.pegs();
        let free = self.free;
        self.pairs.retain_mut(|pair| {
            let permuted = pair.permute_pegs(guess);
            let mut from = free;
            let mut to = free;
            for j in 0..pegs {
                let c = permuted.peg(j);
                let target = guess.peg(j);
                if from.contains(c) {
                    if !to.contains(target) {
                        return false;
                    }
                    pair.map_color(c, target);
                    from.remove(c);
                    to.remove(target);
                } else if pair.color(c) != Some(target) {
                    return false;
                }
            }
            true
        });

        self.free -= guess.colors();

        // a lone free color can only map to itself; pin it so the
        // maps become total and the fast path can apply
        if self.free.unique() {
            let last = self.free.smallest();
            for pair in self.pairs.iter_mut() {
                pair.map_color(last, last);
            }
            self.free.clear();
        }
    }

    pub fn canonical(&self, _engine: &Engine, candidates: &[Codeword]) -> Vec<Codeword> {
        // once only the identity remains with no freedom left,
        // nothing can be filtered out
        if self.pairs.len() == 1 && self.free.is_empty() {
            return candidates.to_vec();
        }
        candidates
            .iter()
            .copied()
            .filter(|candidate| self.is_canonical(candidate))
            .collect()
    }

    // a candidate is canonical iff no pair, with its color map
    // completed greedily on free colors, maps it strictly smaller.
    // the first differing peg decides.
    fn is_canonical(&self, candidate: &Codeword) -> bool {
        let pegs = self.rules.pegs();
        for (i, pair) in self.pairs.iter().enumerate() {
            let permuted = if i == 0 {
                // pairs[0] is the identity peg permutation
                *candidate
            } else {
                pair.permute_pegs(candidate)
            };
            let mut pair = *pair;
            let mut from = self.free;
            let mut to = self.free;
            for k in 0..pegs {
                let c = permuted.peg(k);
                if from.contains(c) {
                    let smallest = to.smallest();
                    pair.map_color(c, smallest);
                    from.remove(c);
                    to.remove(smallest);
                }
                let mapped = pair.color(c).expect("pair maps every pinned color");
                match mapped.cmp(&candidate.peg(k)) {
                    std::cmp::Ordering::Less => return false,
                    std::cmp::Ordering::Greater => break,
                    std::cmp::Ordering::Equal => continue,
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(Rules::try_from("p4c6r").unwrap())
    }

    #[test]
    fn first_guess_classes_are_the_multiset_patterns() {
        let engine = engine();
        let filter = ConstraintFilter::new(engine.rules());
        let canonical = filter.canonical(&engine, engine.universe());
        let format = |c: &Codeword| engine.rules().format(c);
        let classes = canonical.iter().map(format).collect::<Vec<_>>();
        assert!(classes == vec!["1111", "1112", "1122", "1123", "1234"]);
    }

    #[test]
    fn constraints_shrink_the_symmetry_group() {
        let engine = engine();
        let mut filter = ConstraintFilter::new(engine.rules());
        assert!(filter.pairs().len() == 24);
        let guess = engine.rules().codeword("1123").unwrap();
        filter.constrain(&engine, &guess, Feedback::empty(), engine.universe());
        // surviving pairs must fix 1123: pegs 0,1 may swap, and
        // pegs 2,3 may swap provided colors 2 and 3 swap with them
        assert!(filter.pairs().len() == 4);
    }

    #[test]
    fn every_class_keeps_a_representative() {
        // exhaustively map each codeword through each surviving
        // pair (completed greedily); the canonical set must contain
        // at least one member of every orbit
        let engine = Engine::new(Rules::try_from("p3c4r").unwrap());
        let mut filter = ConstraintFilter::new(engine.rules());
        let guess = engine.rules().codeword("112").unwrap();
        filter.constrain(&engine, &guess, Feedback::empty(), engine.universe());
        let canonical = filter.canonical(&engine, engine.universe());

        for codeword in engine.universe() {
            let reachable = filter.is_canonical(codeword)
                || canonical.iter().any(|c| orbit_related(&filter, c, codeword));
            assert!(reachable);
        }
    }

    // whether some surviving pair, greedily completed, maps a onto b
    fn orbit_related(filter: &ConstraintFilter, a: &Codeword, b: &Codeword) -> bool {
        let pegs = a.pegs();
        for pair in filter.pairs() {
            let permuted = pair.permute_pegs(a);
            let mut pair = *pair;
            let mut from = filter.free;
            let mut to = filter.free;
            let mut matched = true;
            for k in 0..pegs {
                let c = permuted.peg(k);
                if from.contains(c) {
                    let target = b.peg(k);
                    if !to.contains(target) {
                        matched = false;
                        break;
                    }
                    pair.map_color(c, target);
                    from.remove(c);
                    to.remove(target);
                }
                match pair.color(c) {
                    Some(mapped) if mapped == b.peg(k) => continue,
                    _ => {
                        matched = false;
                        break;
                    }
                }
            }
            if matched {
                return true;
            }
        }
        false
    }

    #[test]
    fn identity_only_after_enough_constraints() {
        let engine = engine();
        let mut filter = ConstraintFilter::new(engine.rules());
        for s in ["1234", "2345", "3456"] {
            let guess = engine.rules().codeword(s).unwrap();
            filter.constrain(&engine, &guess, Feedback::empty(), engine.universe());
        }
        let canonical = filter.canonical(&engine, engine.universe());
        assert!(canonical.len() == engine.universe().len());
    }
}
