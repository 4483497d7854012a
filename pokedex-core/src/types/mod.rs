//! Domain types for Pokedex.
//!
//! - [`LocationAreaPage`]: one page of the location-area listing
//! - [`LocationArea`]: a single area and the creatures encountered there
//! - [`Pokemon`]: a creature with its stats and types
//! - [`Pokedex`]: the creatures a user has caught this session

mod location;
mod pokedex;
mod pokemon;

pub use location::*;
pub use pokedex::*;
pub use pokemon::*;
