//! Catch rolls.
//!
//! The chance of catching a creature falls linearly with its base experience:
//!
//! ```text
//! p = 1 - base_experience / max_base_experience      clamped to [0, 1]
//! ```

use rand::Rng;

use crate::constants::MAX_BASE_EXPERIENCE;
use crate::types::Pokemon;

/// Probability of catching a creature with the given base experience.
///
/// Zero experience is always caught; anything at or above
/// `max_base_experience` never is. A zero maximum never catches.
pub fn catch_probability(base_experience: u32, max_base_experience: u32) -> f64 {
    if max_base_experience == 0 {
        return 0.0;
    }
    let ratio = f64::from(base_experience) / f64::from(max_base_experience);
    (1.0 - ratio).clamp(0.0, 1.0)
}

/// Rolls once against [`catch_probability`] with [`MAX_BASE_EXPERIENCE`].
///
/// Returns true if the creature was caught.
pub fn attempt_catch<R: Rng + ?Sized>(pokemon: &Pokemon, rng: &mut R) -> bool {
    let probability = catch_probability(pokemon.base_experience(), MAX_BASE_EXPERIENCE);
    rng.gen::<f64>() < probability
}
