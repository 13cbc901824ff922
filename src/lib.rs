//! ZUMI - Bakery Storefront Library
//!
//! A terminal storefront for a small bakery: browse the cookie catalog,
//! rate, and send order requests by email, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
