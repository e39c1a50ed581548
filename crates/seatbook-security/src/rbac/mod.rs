//! Role-based access checks on validated claims.

mod checker;

pub use checker::*;
