pub mod config;
pub mod error;
pub mod eval;
pub mod games;
pub mod node;
pub mod solvers;
