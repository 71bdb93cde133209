use std::fmt::Display;

/// The available [`CutoffSequence`](super::CutoffSequence)s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CutoffSequenceType {
    Monotonic,
    Linear,
    Geometrical,
    InnerOuterGeometrical,
    #[default]
    Luby,
}

impl Display for CutoffSequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutoffSequenceType::Monotonic => write!(f, "monotonic"),
            CutoffSequenceType::Linear => write!(f, "linear"),
            CutoffSequenceType::Geometrical => write!(f, "geometrical"),
            CutoffSequenceType::InnerOuterGeometrical => write!(f, "inner-outer-geometrical"),
            CutoffSequenceType::Luby => write!(f, "luby"),
        }
    }
}
