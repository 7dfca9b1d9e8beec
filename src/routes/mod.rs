pub(crate) mod common;

pub mod bars;
pub mod cron;
pub mod fixtures;
pub mod health;
pub mod leagues;
