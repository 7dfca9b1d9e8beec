mod handler;

pub use handler::{create_bar, get_bar, list_bars};
