//! Test utilities for orrery unit tests.
//!
//! Provides a small catalog fixture and assertions for the geometric
//! invariants the registry must keep.

use bevy::math::DVec3;

use crate::catalog::{BodyCatalog, BodyDefinition};

/// Fixtures for building small scenes.
pub mod fixtures {
    use super::*;

    /// Sun, Earth and Moon with round numbers.
    ///
    /// Earth orbits at 20 with speed 1; the Moon orbits Earth at 2.5 with speed 3.
    pub fn mini_bodies() -> Vec<BodyDefinition> {
        vec![
            BodyDefinition::central("Sun", 5.0),
            BodyDefinition::orbiting("Earth", 1.0, 20.0, 1.0, 0.01),
            BodyDefinition::orbiting("Moon", 0.27, 2.5, 3.0, 0.005).around("Earth"),
        ]
    }

    pub fn mini_catalog() -> BodyCatalog {
        BodyCatalog::new(mini_bodies()).expect("fixture catalog is valid")
    }
}

/// Assertions for orbit invariants.
pub mod assertions {
    use super::*;

    /// Assert that `pos` lies `distance` away from `center`, within `tolerance`.
    ///
    /// # Panics
    /// Panics if the radius is off by more than `tolerance`.
    pub fn assert_on_orbit(pos: DVec3, center: DVec3, distance: f64, tolerance: f64) {
        let actual = pos.distance(center);
        assert!(
            (actual - distance).abs() <= tolerance,
            "Off orbit: |p - c|={actual:.6e}, expected {distance:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert two positions agree component-wise within `tolerance`.
    pub fn assert_same_position(a: DVec3, b: DVec3, tolerance: f64) {
        assert!(
            a.distance(b) <= tolerance,
            "Positions differ: {a:?} vs {b:?} (tolerance {tolerance:.1e})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BodyRegistry;

    #[test]
    fn test_mini_catalog_has_a_moon() {
        let catalog = fixtures::mini_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.children_of("Earth").count(), 1);
    }

    #[test]
    fn test_registry_bodies_start_on_their_orbits() {
        let registry = BodyRegistry::new(fixtures::mini_catalog());
        let earth = registry.get("Earth").unwrap().position;
        assertions::assert_on_orbit(earth, DVec3::ZERO, 20.0, 1e-12);
        let moon = registry.get("Moon").unwrap().position;
        assertions::assert_on_orbit(moon, earth, 2.5, 1e-12);
    }
}
