pub mod adapter;
pub mod heuristic;
pub mod subprocess;
