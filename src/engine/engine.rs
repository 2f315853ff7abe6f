use super::compare::Comparer;
use super::compare::Kernel;
use super::frequency::FrequencyTable;
use super::frequency::Partition;
use super::partition::rearrange;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::mask::ColorMask;
use crate::codes::rules::Rules;

/// rules-aware facade over the comparison kernels. owns the
/// enumerated universe and dispatches every bulk operation to
/// the kernel variant chosen at construction.
pub struct Engine {
    rules: Rules,
    kernel: Kernel,
    universe: Vec<Codeword>,
}

impl Engine {
    pub fn new(rules: Rules) -> Self {
        let kernel = if rules.repeatable() {
            Kernel::Generic
        } else {
            Kernel::NoRepeat
        };
        let universe = rules.enumerate();
        log::debug!(
            "engine for {}: {} codewords, {:?} kernel",
            rules,
            universe.len(),
            kernel
        );
        Self {
            rules,
            kernel,
            universe,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
    pub fn universe(&self) -> &[Codeword] {
        &self.universe
    }
    pub fn perfect(&self) -> Feedback {
        Feedback::perfect(&self.rules)
    }

    /// feedback of a guess against one secret
    pub fn compare(&self, guess: &Codeword, secret: &Codeword) -> Feedback {
        Comparer::new(self.kernel, secret).compare(guess)
    }

    /// feedbacks of a guess against each secret, in order
    pub fn feedbacks(&self, guess: &Codeword, secrets: &[Codeword]) -> Vec<Feedback> {
        let comparer = Comparer::new(self.kernel, guess);
        secrets.iter().map(|s| comparer.compare(s)).collect()
    }

    /// feedback frequencies of a guess against a secret set
    pub fn frequencies(&self, guess: &Codeword, secrets: &[Codeword]) -> FrequencyTable {
        let comparer = Comparer::new(self.kernel, guess);
        let mut freq = FrequencyTable::new(Feedback::size(&self.rules));
        for secret in secrets {
            freq.tally(comparer.compare(secret));
        }
        freq
    }

    /// feedbacks and frequencies in a single pass
    pub fn tabulate(
        &self,
        guess: &Codeword,
        secrets: &[Codeword],
        feedbacks: &mut Vec<Feedback>,
    ) -> FrequencyTable {
        let comparer = Comparer::new(self.kernel, guess);
        let mut freq = FrequencyTable::new(Feedback::size(&self.rules));
        feedbacks.clear();
        feedbacks.reserve(secrets.len());
        for secret in secrets {
            let fb = comparer.compare(secret);
            feedbacks.push(fb);
            freq.tally(fb);
        }
        freq
    }

    /// reorder a secret set in place so that secrets sharing a
    /// feedback against the guess become contiguous, in ascending
    /// feedback order. returns the frequencies and cell bounds.
    pub fn partition(
        &self,
        secrets: &mut [Codeword],
        guess: &Codeword,
    ) -> (FrequencyTable, Partition) {
        let mut feedbacks = Vec::new();
        let freq = self.tabulate(guess, secrets, &mut feedbacks);
        rearrange(secrets, &mut feedbacks, &freq);
        let cells = Partition::from_frequencies(&freq);
        (freq, cells)
    }

    /// the subset of a list consistent with observing the given
    /// response to the given guess
    pub fn filter_by_feedback(
        &self,
        list: &[Codeword],
        guess: &Codeword,
        response: Feedback,
    ) -> Vec<Codeword> {
        let comparer = Comparer::new(self.kernel, guess);
        list.iter()
            .copied()
            .filter(|secret| comparer.compare(secret) == response)
            .collect()
    }

    /// colors present anywhere in a list of codewords
    pub fn color_mask(&self, codewords: &[Codeword]) -> ColorMask {
        codewords
            .iter()
            .fold(ColorMask::empty(), |mask, c| mask | c.colors())
    }
}
