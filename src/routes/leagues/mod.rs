mod handler;
mod model;

pub use handler::{league, search_teams, seasons};
