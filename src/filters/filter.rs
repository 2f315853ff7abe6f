use super::color::ColorFilter;
use super::constraint::ConstraintFilter;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::rules::Rules;
use crate::engine::engine::Engine;

/// the closed set of equivalence filters. filters are plain
/// values: the search clones one whenever it branches, and each
/// clone evolves independently as constraints arrive.
#[derive(Clone, Debug)]
pub enum Filter {
    /// keeps everything; useful as a baseline
    Dummy,
    Color(ColorFilter),
    Constraint(ConstraintFilter),
    /// applies two filters in sequence
    Composite(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn dummy() -> Self {
        Self::Dummy
    }
    pub fn color(rules: &Rules) -> Self {
        Self::Color(ColorFilter::new(rules))
    }
    pub fn constraint(rules: &Rules) -> Self {
        Self::Constraint(ConstraintFilter::new(rules))
    }
    /// the standard composition: response-independent constraint
    /// equivalence first, then response-dependent color equivalence
    pub fn standard(rules: &Rules) -> Self {
        Self::Composite(
            Box::new(Self::constraint(rules)),
            Box::new(Self::color(rules)),
        )
    }

    /// the canonical candidates among the given ones, preserving
    /// input order
    pub fn canonical(&self, engine: &Engine, candidates: &[Codeword]) -> Vec<Codeword> {
        match self {
            Self::Dummy => candidates.to_vec(),
            Self::Color(filter) => filter.canonical(engine, candidates),
            Self::Constraint(filter) => filter.canonical(engine, candidates),
            Self::Composite(first, second) => {
                second.canonical(engine, &first.canonical(engine, candidates))
            }
        }
    }

    /// record an observed (guess, response) pair and the remaining
    /// possibilities it leaves
    pub fn constrain(
        &mut self,
        engine: &Engine,
        guess: &Codeword,
        response: Feedback,
        remaining: &[Codeword],
    ) {
        match self {
            Self::Dummy => {}
            Self::Color(filter) => filter.constrain(engine, guess, response, remaining),
            Self::Constraint(filter) => filter.constrain(engine, guess, response, remaining),
            Self::Composite(first, second) => {
                first.constrain(engine, guess, response, remaining);
                second.constrain(engine, guess, response, remaining);
            }
        }
    }
}

impl Filter {
    /// resolve a filter by name, for the CLI
    pub fn named(name: &str, rules: &Rules) -> Option<Self> {
        match name {
            "dummy" => Some(Self::dummy()),
            "color" => Some(Self::color(rules)),
            "constraint" => Some(Self::constraint(rules)),
            "standard" => Some(Self::standard(rules)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_keeps_everything() {
        let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
        let filter = Filter::dummy();
        assert!(filter.canonical(&engine, engine.universe()).len() == 1296);
    }

    #[test]
    fn standard_composes_both_prunings() {
        let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
        let filter = Filter::standard(engine.rules());
        let canonical = filter.canonical(&engine, engine.universe());
        // before any constraint the color filter is inert and the
        // constraint filter leaves the five multiset patterns
        assert!(canonical.len() == 5);
    }

    #[test]
    fn composite_is_no_looser_than_its_parts() {
        let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
        let guess = engine.rules().codeword("1122").unwrap();
        let response = Feedback::try_from("0A1B").unwrap();
        let remaining = engine.filter_by_feedback(engine.universe(), &guess, response);

        let mut composite = Filter::standard(engine.rules());
        let mut color = Filter::color(engine.rules());
        composite.constrain(&engine, &guess, response, &remaining);
        color.constrain(&engine, &guess, response, &remaining);

        let both = composite.canonical(&engine, engine.universe());
        let alone = color.canonical(&engine, engine.universe());
        assert!(!both.is_empty());
        assert!(both.len() <= alone.len());
    }
}
