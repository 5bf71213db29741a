pub mod booking;
pub mod clock;
pub mod graph;
pub mod ids;
pub mod occupancy;
pub mod oracle;
pub mod planner;
pub mod principal;
