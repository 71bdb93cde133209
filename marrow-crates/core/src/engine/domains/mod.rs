//! Representations of the domains of integer variables.
//!
//! Every mutation takes the [`Cause`](crate::basic_types::Cause) of the change, records the
//! removed values in the delta of the variable, and either succeeds (reporting whether the domain
//! changed) or fails with a [`Contradiction`](crate::basic_types::Contradiction) without touching
//! the domain.
mod bit_set_domain;
mod domain_iterators;
mod integer_domain;
mod interval_domain;

pub(crate) use bit_set_domain::BitSetDomain;
pub use domain_iterators::DomainRanges;
pub use domain_iterators::DomainValues;
pub(crate) use integer_domain::DomainUpdate;
pub(crate) use integer_domain::IntegerDomain;
pub(crate) use interval_domain::IntervalDomain;
