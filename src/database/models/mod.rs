// 数据实体定义

pub mod bar;

pub use bar::{BarEntity, NewBar};
