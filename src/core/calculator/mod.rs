pub mod distance;
pub mod milestones;
pub mod schedule;
