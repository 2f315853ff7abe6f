use crate::MAX_COLORS;
use crate::MAX_PEGS;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use once_cell::sync::Lazy;

/// maps (nA << 4) | nAB to a feedback ordinal. indices with
/// nAB < nA are never produced by the kernel and hold the
/// empty sentinel.
static GENERIC_LOOKUP: Lazy<[Feedback; 0x100]> = Lazy::new(|| {
    let mut table = [Feedback::empty(); 0x100];
    for (i, slot) in table.iter_mut().enumerate() {
        let a = (i >> 4) as u8;
        let ab = (i & 0x0F) as u8;
        if ab >= a && (ab as usize) <= MAX_PEGS {
            *slot = Feedback::new(a, ab - a).expect("in range");
        }
    }
    table
});

/// maps the 16-bit byte-equality mask of a no-repeat comparison
/// to a feedback ordinal. the low MAX_COLORS bits mark matching
/// color presences (nAB), the high MAX_PEGS bits mark matching
/// peg positions (nA).
static NOREPEAT_LOOKUP: Lazy<Vec<Feedback>> = Lazy::new(|| {
    (0..0x10000u32)
        .map(|mask| {
            let a = (mask >> MAX_COLORS).count_ones() as u8;
            let ab = (mask & ((1 << MAX_COLORS) - 1)).count_ones() as u8;
            if ab >= a && (ab as usize) <= MAX_PEGS && (a as usize) <= MAX_PEGS {
                Feedback::new(a, ab - a).expect("in range")
            } else {
                Feedback::empty()
            }
        })
        .collect()
});

/// which comparison kernel an engine runs. selected once, at
/// engine construction, from the rule set's repeatable flag.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kernel {
    /// works for any pair of conforming codewords
    Generic,
    /// requires both codewords to have all-distinct colors; about
    /// twice as fast as the generic kernel
    NoRepeat,
}

/// one side of a comparison, preconditioned once so that the
/// per-guess loop body stays branch-free and allocation-free.
#[derive(Clone, Copy)]
pub struct Comparer {
    kernel: Kernel,
    secret: [u8; 16],
}

impl Comparer {
    pub fn new(kernel: Kernel, secret: &Codeword) -> Self {
        let mut bytes = *secret.bytes();
        // unused pegs carry 0xFF; masking to 0x0F keeps every legal
        // byte intact while ensuring an unused secret peg never
        // compares equal to an unused guess peg.
        for b in bytes.iter_mut() {
            *b &= 0x0F;
        }
        if kernel == Kernel::NoRepeat {
            // a zero counter must not compare equal to a zero
            // counter in the guess, or absent colors would count
            // as matches.
            for b in bytes.iter_mut().take(MAX_COLORS) {
                if *b == 0 {
                    *b = 0xFF;
                }
            }
        }
        Self { kernel, secret: bytes }
    }

    /// feedback of this secret against one guess
    #[inline]
    pub fn compare(&self, guess: &Codeword) -> Feedback {
        match self.kernel {
            Kernel::Generic => self.generic(guess.bytes()),
            Kernel::NoRepeat => self.norepeat(guess.bytes()),
        }
    }

    #[inline]
    fn generic(&self, guess: &[u8; 16]) -> Feedback {
        let mut na = 0u16;
        for i in MAX_COLORS..16 {
            na += (self.secret[i] == guess[i]) as u16;
        }
        let mut nab = 0u16;
        for i in 0..MAX_COLORS {
            nab += self.secret[i].min(guess[i]) as u16;
        }
        GENERIC_LOOKUP[((na << 4) | nab) as usize]
    }

    #[inline]
    fn norepeat(&self, guess: &[u8; 16]) -> Feedback {
        let mut mask = 0u32;
        for i in 0..16 {
            mask |= ((self.secret[i] == guess[i]) as u32) << i;
        }
        NOREPEAT_LOOKUP[mask as usize]
    }
}
