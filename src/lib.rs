// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod ddl;
pub mod diagram;
pub mod ident;
pub mod model;
pub mod resolve;
pub mod store;
pub mod validate;
