//! Cyclability cost model.
//!
//! Converts a segment's attributes into the scalar traversal cost
//! minimized by the route search. The policy reflects the product's
//! gravel-avoidance goal: nominally bike-specific ways that are actually
//! unpaved are penalized hardest, paved ways are cheap.

use crate::Error;
use crate::model::{BicycleAccess, CycleEdge};

/// Surface values counted as paved. A composite surface tag is fully paved
/// only if every component is in this set.
pub const SURFACES_PAVED: &[&str] = &[
    "paved",
    "asphalt",
    "concrete",
    "concrete:plates",
    "concrete:lanes",
    "paving_stones",
    "sett",
    "metal",
    "wood",
];

/// Highway classes treated as cycle-friendly when the way is not
/// explicitly designated for bicycles.
pub const HIGHWAYS_CYCLE_FRIENDLY: &[&str] = &[
    "cycleway",
    "living_street",
    "residential",
    "tertiary",
    "track",
    "path",
    "bridleway",
];

/// Multiplier for a designated bicycle way with an unpaved surface.
const DESIGNATED_UNPAVED_PENALTY: f64 = 100.0;
/// Multiplier for a cycle-friendly highway with an unpaved surface.
const FRIENDLY_UNPAVED_PENALTY: f64 = 10.0;
/// Multiplier when the surface is not tagged at all.
const UNKNOWN_SURFACE_PENALTY: f64 = 5.0;
/// Cost for segments the policy has no opinion on: not designated, not a
/// cycle-friendly highway, unpaved.
const NEUTRAL_COST: f64 = 1.0;

/// Whether every component of a (possibly composite) surface tag is paved.
///
/// Partial matches count as not paved: `"gravel;asphalt"` is unpaved.
pub fn is_fully_paved(surface: &str) -> bool {
    surface
        .split(';')
        .map(str::trim)
        .all(|component| SURFACES_PAVED.contains(&component))
}

/// Whether a highway class belongs to the cycle-friendly set.
pub fn is_cycle_friendly(highway: &str) -> bool {
    HIGHWAYS_CYCLE_FRIENDLY.contains(&highway)
}

/// Traversal cost of a segment: the routing weight minimized by the
/// search. Lower is more rideable.
///
/// Priority-ordered policy, first matching branch wins. Direction of
/// traversal does not matter; one-way segments are separate directed
/// edges in the network.
///
/// # Errors
///
/// Returns [`Error::InvalidEdge`] for a non-positive or non-finite
/// length, from every branch.
pub fn cyclability_cost(edge: &CycleEdge) -> Result<f64, Error> {
    if !(edge.length_m.is_finite() && edge.length_m > 0.0) {
        return Err(Error::InvalidEdge(format!(
            "segment length must be positive and finite, got {}",
            edge.length_m
        )));
    }

    let paved = edge.surface.as_deref().map(is_fully_paved);

    if edge.bicycle == BicycleAccess::Designated {
        let cost = match paved {
            Some(false) => edge.length_m * DESIGNATED_UNPAVED_PENALTY,
            None => edge.length_m * UNKNOWN_SURFACE_PENALTY,
            Some(true) => edge.length_m.recip(),
        };
        return Ok(cost);
    }

    if edge.highway.as_deref().is_some_and(is_cycle_friendly) {
        let cost = match paved {
            Some(false) => edge.length_m * FRIENDLY_UNPAVED_PENALTY,
            None => edge.length_m * UNKNOWN_SURFACE_PENALTY,
            Some(true) => edge.length_m.recip(),
        };
        return Ok(cost);
    }

    // Ordinary roads: paved or untagged surfaces keep the inverse-length
    // cost; unpaved ones get the explicit neutral cost.
    let cost = match paved {
        None | Some(true) => edge.length_m.recip(),
        Some(false) => NEUTRAL_COST,
    };
    Ok(cost)
}

/// Cyclability score of a segment: the inverse of its traversal cost,
/// higher is more bicycle-friendly. Exposed for ranking and display;
/// the search itself minimizes [`cyclability_cost`].
///
/// # Errors
///
/// Same conditions as [`cyclability_cost`].
pub fn cyclability_score(edge: &CycleEdge) -> Result<f64, Error> {
    cyclability_cost(edge).map(f64::recip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(
        length_m: f64,
        highway: Option<&str>,
        surface: Option<&str>,
        bicycle: BicycleAccess,
    ) -> CycleEdge {
        CycleEdge {
            length_m,
            highway: highway.map(str::to_owned),
            surface: surface.map(str::to_owned),
            bicycle,
            name: None,
        }
    }

    #[test]
    fn untagged_edge_costs_inverse_length() {
        let e = edge(250.0, None, None, BicycleAccess::Unspecified);
        let cost = cyclability_cost(&e).unwrap();
        assert_eq!(cost, 1.0 / 250.0);
        assert!(cost.is_finite() && cost > 0.0);
    }

    #[test]
    fn designated_unpaved_composite_is_heavily_penalized() {
        let e = edge(
            1200.0,
            Some("cycleway"),
            Some("gravel;asphalt"),
            BicycleAccess::Designated,
        );
        assert_eq!(cyclability_cost(&e).unwrap(), 1200.0 * 100.0);
    }

    #[test]
    fn designated_unknown_surface_gets_uncertainty_penalty() {
        let e = edge(800.0, None, None, BicycleAccess::Designated);
        assert_eq!(cyclability_cost(&e).unwrap(), 800.0 * 5.0);
    }

    #[test]
    fn designated_paved_costs_inverse_length() {
        let e = edge(500.0, None, Some("asphalt"), BicycleAccess::Designated);
        assert_eq!(cyclability_cost(&e).unwrap(), 1.0 / 500.0);
    }

    #[test]
    fn friendly_highway_paved_composite_costs_inverse_length() {
        let e = edge(
            1500.0,
            Some("residential"),
            Some("asphalt;paving_stones"),
            BicycleAccess::Unspecified,
        );
        assert_eq!(cyclability_cost(&e).unwrap(), 1.0 / 1500.0);
    }

    #[test]
    fn friendly_highway_unpaved_gets_moderate_penalty() {
        let e = edge(
            300.0,
            Some("track"),
            Some("gravel"),
            BicycleAccess::Unspecified,
        );
        assert_eq!(cyclability_cost(&e).unwrap(), 300.0 * 10.0);
    }

    #[test]
    fn friendly_highway_unknown_surface_gets_uncertainty_penalty() {
        let e = edge(300.0, Some("path"), None, BicycleAccess::Unspecified);
        assert_eq!(cyclability_cost(&e).unwrap(), 300.0 * 5.0);
    }

    #[test]
    fn unfriendly_unpaved_takes_the_neutral_branch() {
        let e = edge(
            450.0,
            Some("primary"),
            Some("dirt"),
            BicycleAccess::Unspecified,
        );
        assert_eq!(cyclability_cost(&e).unwrap(), 1.0);
    }

    #[test]
    fn unfriendly_paved_costs_inverse_length() {
        let e = edge(
            450.0,
            Some("primary"),
            Some("asphalt"),
            BicycleAccess::Unspecified,
        );
        assert_eq!(cyclability_cost(&e).unwrap(), 1.0 / 450.0);
    }

    #[test]
    fn score_is_cost_inverse() {
        let e = edge(
            300.0,
            Some("track"),
            Some("gravel"),
            BicycleAccess::Unspecified,
        );
        let score = cyclability_score(&e).unwrap();
        assert_eq!(score, 1.0 / (300.0 * 10.0));
        assert!(score.is_finite() && score > 0.0);
    }

    #[test]
    fn zero_and_negative_lengths_fail_on_every_branch() {
        let variants = [
            (None, None, BicycleAccess::Unspecified),
            (None, Some("gravel"), BicycleAccess::Designated),
            (None, None, BicycleAccess::Designated),
            (None, Some("asphalt"), BicycleAccess::Designated),
            (Some("track"), Some("gravel"), BicycleAccess::Unspecified),
            (Some("track"), None, BicycleAccess::Unspecified),
            (Some("track"), Some("asphalt"), BicycleAccess::Unspecified),
            (Some("primary"), Some("dirt"), BicycleAccess::Unspecified),
            (Some("primary"), Some("asphalt"), BicycleAccess::Unspecified),
        ];

        for length in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            for (highway, surface, bicycle) in variants {
                let e = edge(length, highway, surface, bicycle);
                assert!(
                    matches!(cyclability_cost(&e), Err(Error::InvalidEdge(_))),
                    "length {length} with {highway:?}/{surface:?}/{bicycle:?} must fail"
                );
            }
        }
    }

    #[test]
    fn composite_surface_requires_every_component_paved() {
        assert!(is_fully_paved("asphalt"));
        assert!(is_fully_paved("asphalt; concrete"));
        assert!(!is_fully_paved("asphalt;gravel"));
        assert!(!is_fully_paved("ground"));
    }

    #[test]
    fn name_does_not_affect_cost() {
        let mut named = edge(250.0, None, None, BicycleAccess::Unspecified);
        named.name = Some("Quietway 7".to_owned());
        let anonymous = edge(250.0, None, None, BicycleAccess::Unspecified);
        assert_eq!(
            cyclability_cost(&named).unwrap(),
            cyclability_cost(&anonymous).unwrap()
        );
    }
}
