//! Static shape data generated once per agent
//!
//! Opaque to the simulation: only the renderer reads it. It is carried
//! verbatim through snapshots so a rewound agent looks exactly the same.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Species, Vec2};

/// One circular lobe of an organic outline, relative to the agent center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubShape {
    pub offset: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ShapeData {
    /// Drawn from species and size alone
    #[default]
    Plain,
    /// Cluster of lobes (algae fronds, coral branches)
    Lobes(Vec<SubShape>),
    /// Closed polygon relative to the center (rocks)
    Outline(Vec<Vec2>),
}

impl ShapeData {
    /// Generate the shape for a newly created agent
    pub fn generate<R: Rng + ?Sized>(species: Species, size: f32, rng: &mut R) -> Self {
        match species {
            Species::Algae => Self::Lobes(
                (0..5)
                    .map(|_| SubShape {
                        offset: Vec2::new(
                            (rng.gen::<f32>() - 0.5) * size * 1.2,
                            (rng.gen::<f32>() - 0.5) * size * 1.2,
                        ),
                        radius: size * (0.4 + rng.gen::<f32>() * 0.4),
                    })
                    .collect(),
            ),
            Species::Coral => {
                let branches = rng.gen_range(5..9);
                Self::Lobes(
                    (0..branches)
                        .map(|_| {
                            let angle = rng.gen::<f32>() * TAU;
                            let dist = size * (0.4 + rng.gen::<f32>() * 0.6);
                            SubShape {
                                offset: Vec2::new(angle.cos() * dist, angle.sin() * dist),
                                radius: size * (0.25 + rng.gen::<f32>() * 0.35),
                            }
                        })
                        .collect(),
                )
            }
            Species::Rock => {
                let sides = rng.gen_range(6..10);
                Self::Outline(
                    (0..sides)
                        .map(|i| {
                            let angle = i as f32 / sides as f32 * TAU;
                            let r = size * (0.8 + rng.gen::<f32>() * 0.4);
                            Vec2::new(angle.cos() * r, angle.sin() * r)
                        })
                        .collect(),
                )
            }
            Species::Shark | Species::Fish | Species::Shrimp => Self::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_animals_are_plain() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for species in [Species::Shark, Species::Fish, Species::Shrimp] {
            assert_eq!(ShapeData::generate(species, 10.0, &mut rng), ShapeData::Plain);
        }
    }

    #[test]
    fn test_coral_branch_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            match ShapeData::generate(Species::Coral, 18.0, &mut rng) {
                ShapeData::Lobes(lobes) => assert!((5..9).contains(&lobes.len())),
                other => panic!("coral should be lobed, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rock_outline_stays_near_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ShapeData::Outline(points) = ShapeData::generate(Species::Rock, 40.0, &mut rng) else {
            panic!("rock should have an outline");
        };
        assert!((6..10).contains(&points.len()));
        for p in points {
            let r = p.length();
            assert!(r >= 40.0 * 0.8 - 1e-3 && r <= 40.0 * 1.2 + 1e-3);
        }
    }
}
