pub mod slot;
pub mod tracker;
