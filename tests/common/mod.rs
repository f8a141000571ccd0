#![allow(dead_code)]

mod test_utils;

pub use test_utils::*;
