//! sprout-cases
//!
//! Case-level view over the screening instruments: the read-only
//! [`aggregate::CaseAggregate`] and the latest-result records it is built
//! from.

pub mod aggregate;
pub mod error;
pub mod records;
