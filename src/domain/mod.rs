//! Domain types for Arbiter Core.
//!
//! This module contains the core business entities and value objects.

mod policy;
mod request;
mod result;
mod verdict;

pub use policy::*;
pub use request::*;
pub use result::*;
pub use verdict::*;
