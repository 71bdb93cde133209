use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;

/// A [`Brancher`] which asks the given branchers in order and returns the first decision any of
/// them proposes.
///
/// Every other method of [`Brancher`] is forwarded to all of the branchers.
#[derive(Debug)]
pub struct SequencedBrancher {
    branchers: Vec<Box<dyn Brancher>>,
}

impl SequencedBrancher {
    pub fn new(branchers: Vec<Box<dyn Brancher>>) -> Self {
        SequencedBrancher { branchers }
    }

    pub fn add_brancher(&mut self, brancher: Box<dyn Brancher>) {
        self.branchers.push(brancher);
    }
}

impl Brancher for SequencedBrancher {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        self.branchers
            .iter_mut()
            .find_map(|brancher| brancher.next_decision(context))
    }

    fn on_conflict(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_conflict());
    }

    fn on_backtrack(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_backtrack());
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_solution(solution));
    }

    fn on_restart(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_restart());
    }
}
