//! Control algorithms

pub mod pursuit;
