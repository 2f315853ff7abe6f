/// what a strategy is optimized for, in increasing strength.
/// each objective compares everything the weaker ones compare,
/// plus one more component.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Objective {
    /// fewest total guesses across all secrets
    MinSteps,
    /// then fewest guesses for the worst secret
    MinDepth,
    /// then fewest secrets at that worst depth
    MinWorst,
}

impl Objective {
    /// whether cost a is strictly better than cost b under this
    /// objective. components beyond the objective are ignored.
    pub fn superior(&self, a: &Cost, b: &Cost) -> bool {
        if a.steps != b.steps {
            return a.steps < b.steps;
        }
        if *self == Self::MinSteps {
            return false;
        }
        if a.depth != b.depth {
            return a.depth < b.depth;
        }
        if *self == Self::MinDepth {
            return false;
        }
        a.worst < b.worst
    }
}

impl TryFrom<&str> for Objective {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "steps" => Ok(Self::MinSteps),
            "depth" => Ok(Self::MinDepth),
            "worst" => Ok(Self::MinWorst),
            _ => Err(crate::Error::InvalidRules(format!("unknown objective {}", s))),
        }
    }
}

/// the price of a strategy over a secret set: total guesses
/// summed across all secrets, the maximum depth any secret
/// needs, and how many secrets need that maximum.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cost {
    pub steps: u32,
    pub depth: u32,
    pub worst: u32,
}

impl Cost {
    pub const fn new(steps: u32, depth: u32, worst: u32) -> Self {
        Self { steps, depth, worst }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// fold in the cost of a sibling cell: steps add, depth
    /// maxes, and worst counts the secrets at the running maximum
    pub fn absorb(&mut self, cell: Cost) {
        self.steps += cell.steps;
        match cell.depth.cmp(&self.depth) {
            std::cmp::Ordering::Greater => {
                self.depth = cell.depth;
                self.worst = cell.worst;
            }
            std::cmp::Ordering::Equal => self.worst += cell.worst,
            std::cmp::Ordering::Less => {}
        }
    }

    /// shift by the initial guess that led to this state: every
    /// secret here costs one more step, one more level deep
    pub fn deepen(&mut self, secrets: u32) {
        self.steps += secrets;
        self.depth += 1;
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.steps, self.depth, self.worst)
    }
}

/// limits a strategy must respect while being built
#[derive(Clone, Copy, Debug)]
pub struct Constraints {
    /// maximum guesses allowed to reveal any secret
    pub max_depth: u32,
    /// guess only from the remaining possibilities
    pub pos_only: bool,
    /// take an obvious guess when one exists
    pub use_obvious: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_depth: 100,
            pos_only: false,
            use_obvious: true,
        }
    }
}
