use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::mask::ColorMask;
use crate::engine::engine::Engine;
use crate::filters::filter::Filter;
use crate::solve::builder::make_guess;
use crate::solve::cost::Constraints;
use crate::solve::strategy::Strategy;

// one constraint's worth of game state, for undo
#[derive(Clone)]
struct Frame {
    end: usize,
    guessed: ColorMask,
    impossible: ColorMask,
    filter: Filter,
}

/// a stateful player. owns a working copy of the universe and
/// narrows it in place as (guess, feedback) constraints arrive:
/// each constraint partitions the current possibility range and
/// keeps the matching cell, pushing a frame so the constraint
/// can be popped again. also tracks which colors have been
/// guessed and which are known impossible.
pub struct CodeBreaker<'a> {
    engine: &'a Engine,
    strategy: Strategy,
    options: Constraints,
    secrets: Vec<Codeword>,
    frames: Vec<Frame>,
}

impl<'a> CodeBreaker<'a> {
    pub fn new(engine: &'a Engine, strategy: Strategy, filter: Filter, options: Constraints) -> Self {
        let root = Frame {
            end: engine.universe().len(),
            guessed: ColorMask::empty(),
            impossible: ColorMask::empty(),
            filter,
        };
        Self {
            engine,
            strategy,
            options,
            secrets: engine.universe().to_vec(),
            frames: vec![root],
        }
    }

    /// secrets still consistent with every constraint so far
    pub fn possibilities(&self) -> &[Codeword] {
        &self.secrets[..self.frames.last().expect("root frame").end]
    }

    /// number of constraints currently applied
    pub fn constraints(&self) -> usize {
        self.frames.len() - 1
    }

    /// colors appearing in any guess so far
    pub fn guessed(&self) -> ColorMask {
        self.frames.last().expect("root frame").guessed
    }

    /// colors that cannot appear in the secret
    pub fn excluded(&self) -> ColorMask {
        self.frames.last().expect("root frame").impossible
    }

    /// apply an observed (guess, feedback) pair, narrowing the
    /// possibility set
    pub fn push(&mut self, guess: &Codeword, feedback: Feedback) {
        let top = self.frames.last().expect("root frame").clone();
        let (_, cells) = self.engine.partition(&mut self.secrets[..top.end], guess);
        let cell = cells.cell(feedback.ordinal());

        // move the surviving cell to the front so frames nest
        self.secrets[..top.end].rotate_left(cell.start);
        let remaining = cell.len();

        let mut filter = top.filter;
        filter.constrain(self.engine, guess, feedback, &self.secrets[..remaining]);
        let all = ColorMask::fill(self.engine.rules().colors());
        let mut impossible = all;
        impossible -= self.engine.color_mask(&self.secrets[..remaining]);
        self.frames.push(Frame {
            end: remaining,
            guessed: top.guessed | guess.colors(),
            impossible,
            filter,
        });
    }

    /// undo the most recent constraint. the possibility set grows
    /// back, though not necessarily in its previous order.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// the next guess to make, or None if no possibilities remain
    pub fn guess(&self) -> Option<Codeword> {
        let top = self.frames.last().expect("root frame");
        make_guess(
            self.engine,
            &self.strategy,
            &top.filter,
            &self.options,
            self.possibilities(),
        )
    }
}
