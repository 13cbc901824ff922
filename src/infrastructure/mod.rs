//! Infrastructure layer providing external service integrations.
//!
//! This module contains the EmailJS relay client and file loading for
//! catalog and relay configuration.

pub mod persistence;
pub mod relay;

pub use persistence::*;
pub use relay::*;
