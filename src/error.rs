/// everything that can go wrong at the library surface.
/// kernel routines never fail; their preconditions are on the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// rule parameters violate the peg/color/repetition constraints
    InvalidRules(String),
    /// a codeword failed to parse or does not conform to the rules
    InvalidCodeword(String),
    /// a feedback failed to parse or its (nA, nB) is out of range
    InvalidFeedback(String),
    /// the optimal search found no strategy within the depth limit
    SearchInfeasible,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRules(s) => write!(f, "invalid rules: {}", s),
            Self::InvalidCodeword(s) => write!(f, "invalid codeword: {}", s),
            Self::InvalidFeedback(s) => write!(f, "invalid feedback: {}", s),
            Self::SearchInfeasible => write!(f, "no strategy within the depth limit"),
        }
    }
}

impl std::error::Error for Error {}
