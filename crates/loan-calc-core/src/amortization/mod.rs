pub mod calculator;
pub mod costs;
pub mod mortgage;
pub mod schedule;
