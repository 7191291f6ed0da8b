//! Game implementations.

pub mod elemental;
