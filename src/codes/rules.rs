use super::codeword::Codeword;
use crate::Color;
use crate::Error;
use crate::MAX_COLORS;
use crate::MAX_PEGS;

/// the immutable parameters of a codeword game: how many pegs,
/// how many colors, and whether a color may repeat. a rule set
/// is validated at construction and never mutated.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Rules {
    pegs: u8,
    colors: u8,
    repeatable: bool,
}

impl Rules {
    pub fn new(pegs: usize, colors: usize, repeatable: bool) -> Result<Self, Error> {
        if pegs == 0 || pegs > MAX_PEGS {
            Err(Error::InvalidRules(format!("pegs must be 1..={}", MAX_PEGS)))
        } else if colors == 0 || colors > MAX_COLORS {
            Err(Error::InvalidRules(format!(
                "colors must be 1..={}",
                MAX_COLORS
            )))
        } else if !repeatable && colors < pegs {
            Err(Error::InvalidRules(
                "without repetition, colors must be >= pegs".to_string(),
            ))
        } else {
            Ok(Self {
                pegs: pegs as u8,
                colors: colors as u8,
                repeatable,
            })
        }
    }

    pub const fn pegs(&self) -> usize {
        self.pegs as usize
    }
    pub const fn colors(&self) -> usize {
        self.colors as usize
    }
    pub const fn repeatable(&self) -> bool {
        self.repeatable
    }

    /// number of codewords conforming to these rules:
    /// C^P with repetition, C!/(C-P)! without
    pub fn size(&self) -> usize {
        let c = self.colors();
        if self.repeatable {
            c.pow(self.pegs as u32)
        } else {
            (c - self.pegs() + 1..=c).product()
        }
    }

    /// the universe of conforming codewords, in lexicographic
    /// order on the peg digits. depth-first assignment of each
    /// peg, bounded by the per-color repeat limit.
    pub fn enumerate(&self) -> Vec<Codeword> {
        let mut universe = Vec::with_capacity(self.size());
        let limit = if self.repeatable { self.pegs } else { 1 };
        let mut partial = Codeword::empty();
        self.descend(&mut partial, 0, limit, &mut universe);
        universe
    }

    fn descend(&self, partial: &mut Codeword, peg: usize, limit: u8, out: &mut Vec<Codeword>) {
        for color in 0..self.colors {
            if partial.count(color) < limit {
                partial.set(peg, color);
                if peg + 1 == self.pegs() {
                    out.push(*partial);
                } else {
                    self.descend(partial, peg + 1, limit, out);
                }
                partial.unset(peg);
            }
        }
    }

    /// a uniformly random conforming codeword
    pub fn random(&self) -> Codeword {
        let mut codeword = Codeword::empty();
        if self.repeatable {
            for peg in 0..self.pegs() {
                codeword.set(peg, rand::random_range(0..self.colors));
            }
        } else {
            let mut pool = (0..self.colors).collect::<Vec<Color>>();
            for peg in 0..self.pegs() {
                codeword.set(peg, pool.swap_remove(rand::random_range(0..pool.len())));
            }
        }
        codeword
    }

    /// lexicographic index of a conforming codeword within this
    /// rule set's enumeration, without materializing the universe.
    /// positional weights; without repetition each digit is ranked
    /// among the colors still unused at its peg.
    pub fn index_of(&self, codeword: &Codeword) -> usize {
        let p = self.pegs();
        let mut weights = [0usize; MAX_PEGS];
        let mut w = 1;
        for i in (0..p).rev() {
            weights[i] = w;
            w *= if self.repeatable {
                self.colors()
            } else {
                self.colors() - i
            };
        }
        if self.repeatable {
            codeword
                .digits()
                .zip(weights)
                .map(|(d, w)| d as usize * w)
                .sum()
        } else {
            let mut used = 0u16;
            let mut index = 0;
            for (d, w) in codeword.digits().zip(weights) {
                let below = (used & ((1 << d) - 1)).count_ones() as usize;
                index += (d as usize - below) * w;
                used |= 1 << d;
            }
            index
        }
    }

    // digit notation. colors print 1-based, except that a
    // ten-color game uses the full '0'..'9' range 0-based.
    fn base(&self) -> u8 {
        if self.colors() == MAX_COLORS { b'0' } else { b'1' }
    }

    /// render a codeword in this rule set's digit notation
    pub fn format(&self, codeword: &Codeword) -> String {
        codeword
            .digits()
            .map(|d| (self.base() + d) as char)
            .collect()
    }

    /// parse a codeword from digit notation and validate it
    /// against these rules
    pub fn codeword(&self, s: &str) -> Result<Codeword, Error> {
        let reject = || Error::InvalidCodeword(s.to_string());
        if s.len() != self.pegs() {
            return Err(reject());
        }
        let mut codeword = Codeword::empty();
        for (peg, ch) in s.bytes().enumerate() {
            let color = ch.wrapping_sub(self.base());
            if (color as usize) >= self.colors() {
                return Err(reject());
            }
            if !self.repeatable && codeword.count(color) > 0 {
                return Err(reject());
            }
            codeword.set(peg, color);
        }
        Ok(codeword)
    }
}

/// "p4c6r" isomorphism
impl TryFrom<&str> for Rules {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let reject = || Error::InvalidRules(s.to_string());
        let rest = s.strip_prefix(['p', 'P']).ok_or_else(reject)?;
        let c = rest.find(['c', 'C']).ok_or_else(reject)?;
        let pegs = rest[..c].parse::<usize>().map_err(|_| reject())?;
        let rest = &rest[c + 1..];
        let (colors, repeatable) = match rest.strip_suffix(['r', 'R']) {
            Some(digits) => (digits, true),
            None => (rest.strip_suffix(['n', 'N']).ok_or_else(reject)?, false),
        };
        let colors = colors.parse::<usize>().map_err(|_| reject())?;
        Self::new(pegs, colors, repeatable)
    }
}

impl std::fmt::Display for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "p{}c{}{}",
            self.pegs,
            self.colors,
            if self.repeatable { 'r' } else { 'n' }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert!(Rules::new(4, 6, true).is_ok());
        assert!(Rules::new(0, 6, true).is_err());
        assert!(Rules::new(7, 6, true).is_err());
        assert!(Rules::new(4, 11, true).is_err());
        assert!(Rules::new(5, 4, false).is_err());
        assert!(Rules::new(4, 4, false).is_ok());
    }

    #[test]
    fn string_form() {
        let rules = Rules::try_from("p4c6r").unwrap();
        assert!(rules.pegs() == 4);
        assert!(rules.colors() == 6);
        assert!(rules.repeatable());
        let rules = Rules::try_from("p4c10n").unwrap();
        assert!(rules.colors() == 10);
        assert!(!rules.repeatable());
        assert!(format!("{}", rules) == "p4c10n");
        for s in ["p1c1r", "p4c6r", "p4c10n", "p6c10r", "p5c8n"] {
            let rules = Rules::try_from(s).unwrap();
            assert!(Rules::try_from(format!("{}", rules).as_str()).unwrap() == rules);
        }
        assert!(Rules::try_from("4c6r").is_err());
        assert!(Rules::try_from("p4x6r").is_err());
        assert!(Rules::try_from("p9c6r").is_err());
    }

    #[test]
    fn sizes() {
        assert!(Rules::try_from("p4c6r").unwrap().size() == 1296);
        assert!(Rules::try_from("p4c10n").unwrap().size() == 5040);
        assert!(Rules::try_from("p1c1r").unwrap().size() == 1);
    }

    #[test]
    fn enumerate_mastermind() {
        let rules = Rules::try_from("p4c6r").unwrap();
        let universe = rules.enumerate();
        assert!(universe.len() == 1296);
        assert!(rules.format(&universe[0]) == "1111");
        assert!(rules.format(universe.last().unwrap()) == "6666");
        assert!(universe.iter().all(|c| c.conforms(&rules)));
    }

    #[test]
    fn enumerate_no_repetition() {
        let rules = Rules::try_from("p4c10n").unwrap();
        let universe = rules.enumerate();
        assert!(universe.len() == 5040);
        assert!(rules.format(&universe[357]) == "0741");
        assert!(universe.iter().all(|c| !c.repeated()));
    }

    #[test]
    fn enumerate_is_lexicographic() {
        let rules = Rules::try_from("p3c4r").unwrap();
        let universe = rules.enumerate();
        let digits = |c: &Codeword| c.digits().collect::<Vec<_>>();
        assert!(universe.windows(2).all(|w| digits(&w[0]) < digits(&w[1])));
    }

    #[test]
    fn notation_roundtrip() {
        let rules = Rules::try_from("p4c6r").unwrap();
        for codeword in rules.enumerate() {
            let parsed = rules.codeword(&rules.format(&codeword)).unwrap();
            assert!(parsed == codeword);
        }
    }

    #[test]
    fn parse_rejects_nonconforming() {
        let rules = Rules::try_from("p4c6r").unwrap();
        assert!(rules.codeword("123").is_err());
        assert!(rules.codeword("1237").is_err());
        assert!(rules.codeword("0123").is_err());
        let rules = Rules::try_from("p4c10n").unwrap();
        assert!(rules.codeword("0012").is_err());
        assert!(rules.codeword("0123").is_ok());
    }

    #[test]
    fn index_of_matches_enumeration_order() {
        for s in ["p4c6r", "p4c10n", "p3c5n"] {
            let rules = Rules::try_from(s).unwrap();
            let universe = rules.enumerate();
            for (i, codeword) in universe.iter().enumerate().step_by(17) {
                assert!(rules.index_of(codeword) == i);
            }
        }
        let rules = Rules::try_from("p4c10n").unwrap();
        assert!(rules.index_of(&rules.codeword("0741").unwrap()) == 357);
    }

    #[test]
    fn random_conforms() {
        let rules = Rules::try_from("p4c6n").unwrap();
        for _ in 0..32 {
            assert!(rules.random().conforms(&rules));
        }
    }
}
