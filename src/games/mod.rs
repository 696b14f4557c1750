//! Game implementations.

pub mod ultimate;
