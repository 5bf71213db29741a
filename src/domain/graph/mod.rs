pub mod road;
pub mod snapshot;
pub mod store;
