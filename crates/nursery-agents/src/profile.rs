//! Deterministic per-child profile generation.
//!
//! A session seed plus a spawn index always yields the same
//! [`Profile`]: each child draws from its own `ChaCha12` stream, derived
//! from the seed by a large odd multiplier so neighbouring indices do not
//! share low bits.

use nursery_types::{Activity, AgeTier, Food, Personality, Preferences};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::emotion::EmotionalState;

/// Multiplier separating the RNG streams of neighbouring spawn indices.
const STREAM_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// Personality plus starting mood for one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Immutable traits.
    pub personality: Personality,
    /// Emotional state at spawn.
    pub mood: EmotionalState,
}

/// Derive the RNG for the child at `index` in a session seeded with `seed`.
pub fn profile_rng(seed: u64, index: u32) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed ^ u64::from(index).wrapping_add(1).wrapping_mul(STREAM_PRIME))
}

/// Pick one element of a non-empty fixed table.
fn pick<T: Copy, const N: usize>(rng: &mut impl Rng, table: [T; N], fallback: T) -> T {
    table
        .get(rng.random_range(0..N.max(1)))
        .copied()
        .unwrap_or(fallback)
}

/// Generate the profile of the child at `index`.
pub fn generate_profile(seed: u64, index: u32) -> Profile {
    let mut rng = profile_rng(seed, index);

    let age_tier = pick(&mut rng, AgeTier::ALL, AgeTier::Toddler);
    let personality = Personality {
        age_tier,
        shyness: rng.random_range(0.0..=1.0),
        curiosity: rng.random_range(0.0..=1.0),
        energy: rng.random_range(0.0..=1.0),
        clinginess: rng.random_range(0.0..=1.0),
        stubbornness: rng.random_range(0.0..=1.0),
        preferences: Preferences {
            favorite_food: pick(&mut rng, Food::ALL, Food::Milk),
            favorite_activity: pick(&mut rng, Activity::ALL, Activity::Blocks),
        },
    };

    let mood = EmotionalState::new(
        rng.random_range(0.1..=0.4),
        rng.random_range(0.1..=0.4),
        rng.random_range(0.0..=0.9),
        rng.random_range(0.4..=0.8),
        rng.random_range(0.0..=0.3),
        rng.random_range(0.5..=0.9),
    );

    Profile { personality, mood }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_and_index_give_same_profile() {
        assert_eq!(generate_profile(42, 3), generate_profile(42, 3));
    }

    #[test]
    fn different_indices_differ() {
        assert_ne!(generate_profile(42, 0), generate_profile(42, 1));
    }

    #[test]
    fn seed_and_index_do_not_alias() {
        assert_ne!(generate_profile(0, 1), generate_profile(1, 0));
    }

    #[test]
    fn generated_profiles_are_in_range() {
        for index in 0..200 {
            let profile = generate_profile(7, index);
            assert!(profile.personality.is_valid());
            let mood = profile.mood;
            assert!((0.1..=0.4).contains(&mood.hunger()));
            assert!((0.0..=0.9).contains(&mood.fatigue()));
            assert!((0.4..=0.8).contains(&mood.trust()));
            assert!((0.5..=0.9).contains(&mood.comfort()));
        }
    }

    #[test]
    fn every_tier_appears() {
        let tiers: std::collections::BTreeSet<AgeTier> = (0..100)
            .map(|i| generate_profile(11, i).personality.age_tier)
            .collect();
        assert_eq!(tiers.len(), 3);
    }
}
