//! sprout-core
//!
//! Pure answer vocabulary shared by the screening instruments and the case
//! view. No storage or transport dependency.

pub mod error;
pub mod models;
