//! 惰性、可组合的序列处理流水线。
//!
//! 中间操作（`filter`、`map`、`distinct`、`limit`、`skip`、`sort`、`peek`）只声明操作链，
//! 终结操作（`for_each`、`count`、`reduce`、`to_array`等）才会把整条链融合成一个推送式消费者，
//! 并对元素源只遍历一次，中间不产生额外的集合。
//!
//! ```
//! use river::River;
//!
//! let values = vec!["1", "2", "3", "4", "5", "2", "1", "2", "1", "2", "1", "2"];
//! let mut river = River::of(values).limit(5)?;
//! assert_eq!(river.to_array()?, vec!["1", "2", "3", "4", "5"]);
//! # Ok::<(), river::RiverErr>(())
//! ```

mod config;
mod err;
mod input;
mod op;
mod output;
mod river;
mod sink;
mod stage;

pub use crate::config::Config;
pub use crate::err::RiverErr;
pub use crate::input::Source;
pub use crate::op::OpKind;
pub use crate::river::River;

/// 整数类型
pub type Integer = i64;

pub type RiverRes<T> = Result<T, RiverErr>;
