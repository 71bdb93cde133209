//! Propagators the search itself relies on.
mod decision_nogood;

pub(crate) use decision_nogood::DecisionNogoodConstructor;
