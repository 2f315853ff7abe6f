use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::solve::tree::StrategyTree;

/// replays a prebuilt strategy tree as a player. every state of
/// the tree prescribes one guess (shared by all of its children);
/// a response moves to the child carrying that feedback. useful
/// for serving a precomputed strategy without re-searching.
pub struct Playback<'a> {
    tree: &'a StrategyTree,
    node: usize,
}

impl<'a> Playback<'a> {
    pub fn new(tree: &'a StrategyTree) -> Self {
        Self {
            tree,
            node: StrategyTree::root(),
        }
    }

    /// number of guesses made so far
    pub fn rounds(&self) -> usize {
        self.tree.nodes()[self.node].depth()
    }

    /// the guess prescribed at the current state, or None if the
    /// tree has no continuation here
    pub fn guess(&self) -> Option<Codeword> {
        self.tree
            .children(self.node)
            .next()
            .map(|child| *self.tree.nodes()[child].guess())
    }

    /// follow the response to the next state. fails if the tree
    /// never observed this response here, which means the secret
    /// is inconsistent with the strategy's possibility set.
    pub fn advance(&mut self, response: Feedback) -> bool {
        let child = self
            .tree
            .children(self.node)
            .find(|child| self.tree.nodes()[*child].response() == response);
        match child {
            Some(child) => {
                self.node = child;
                true
            }
            None => false,
        }
    }

    /// restart from the root state
    pub fn reset(&mut self) {
        self.node = StrategyTree::root();
    }
}
