use super::codeword::Codeword;
use super::rules::Rules;
use crate::Color;
use crate::MAX_COLORS;
use crate::MAX_PEGS;
use crate::Peg;
use itertools::Itertools;

const FREE: i8 = -1;

/// a symmetry of the game: a peg permutation composed with a
/// partial color permutation. applying (pi, sigma) to a codeword
/// yields c'[i] = sigma(c[pi(i)]). color images still undefined
/// are stored as -1 and may be fixed later, one constraint at a
/// time, or completed greedily during a canonicality sweep.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CodewordPermutation {
    rules: Rules,
    pegs: [i8; MAX_PEGS],
    colors: [i8; MAX_COLORS],
}

impl CodewordPermutation {
    /// identity on pegs, fully unspecified on colors
    pub fn identity(rules: Rules) -> Self {
        let mut pegs = [FREE; MAX_PEGS];
        for (i, p) in pegs.iter_mut().enumerate().take(rules.pegs()) {
            *p = i as i8;
        }
        Self {
            rules,
            pegs,
            colors: [FREE; MAX_COLORS],
        }
    }

    /// all P! peg permutations, each with an unspecified color map
    pub fn exhaust(rules: Rules) -> Vec<Self> {
        (0..rules.pegs() as i8)
            .permutations(rules.pegs())
            .map(|p| {
                let mut permutation = Self::identity(rules);
                permutation.pegs[..rules.pegs()].copy_from_slice(&p);
                permutation
            })
            .collect()
    }

    pub fn peg(&self, i: Peg) -> Peg {
        self.pegs[i] as Peg
    }

    /// image of a color, or None while still unmapped
    pub fn color(&self, c: Color) -> Option<Color> {
        match self.colors[c as usize] {
            FREE => None,
            mapped => Some(mapped as Color),
        }
    }

    pub fn map_color(&mut self, from: Color, to: Color) {
        self.colors[from as usize] = to as i8;
    }

    /// reorder the pegs only, leaving colors unmapped
    pub fn permute_pegs(&self, w: &Codeword) -> Codeword {
        let mut permuted = Codeword::empty();
        for i in 0..self.rules.pegs() {
            permuted.set(i, w.peg(self.peg(i)));
        }
        permuted
    }

    /// apply the full permutation. every color of w must be mapped.
    pub fn permute(&self, w: &Codeword) -> Codeword {
        let mut permuted = Codeword::empty();
        for i in 0..self.rules.pegs() {
            let c = w.peg(self.peg(i));
            permuted.set(i, self.color(c).expect("color image defined"));
        }
        permuted
    }
}

impl std::fmt::Display for CodewordPermutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let image = |x: i8| match x {
            FREE => "*".to_string(),
            x => x.to_string(),
        };
        write!(f, "(")?;
        for i in 0..self.rules.pegs() {
            write!(f, "{}{}", if i > 0 { " " } else { "" }, image(self.pegs[i]))?;
        }
        write!(f, ") o (")?;
        for c in 0..self.rules.colors() {
            write!(f, "{}{}", if c > 0 { " " } else { "" }, image(self.colors[c]))?;
        }
        write!(f, ")")
    }
}
