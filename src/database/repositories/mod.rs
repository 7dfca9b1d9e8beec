// 存储库

pub mod bar;

pub use bar::{BarRepository, InMemoryBarRepository};
