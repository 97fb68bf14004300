//! Test modules for the facade crate.


pub mod admin;
pub mod atomicity;
