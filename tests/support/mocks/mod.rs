// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod datasource;
pub mod time;

pub use datasource::{Call, MockDatasource, fault, missing};
pub use time::{FixedClock, fixed_now};
