//! # Pokedex Core
//!
//! Core types, errors, and traits shared by every Pokedex crate.
//!
//! - **Types**: PokeAPI resources (location areas, creatures) and the caught-creature collection
//! - **Errors**: one error enum for the client and the REPL
//! - **Constants**: API defaults and catch tuning
//! - **Traits**: the response cache contract consumed by the HTTP client
//! - **Catch**: the catch probability roll
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{catch_probability, MAX_BASE_EXPERIENCE};
//!
//! assert_eq!(catch_probability(0, MAX_BASE_EXPERIENCE), 1.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod catch;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use catch::{attempt_catch, catch_probability};
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
