mod handler;
mod model;

pub use handler::{calendar, league_fixtures, tv_guide};
