//! Employee record model

pub mod employee;

pub use employee::*;
