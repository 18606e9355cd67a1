//! Directional alignment filter for charging-stop candidates.
//!
//! Candidates are kept only when stopping at them keeps the route heading
//! towards the destination. Coordinates are treated as a flat lon/lat plane
//! in radians, matching the straight-line distance model of the station
//! directory; this is deliberately not a great-circle bearing.

use std::f64::consts::FRAC_PI_4;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Maximum detour angle, in radians, for a candidate to count as aligned.
pub const MAX_HEADING_ANGLE: f64 = FRAC_PI_4;

/// Angle between the travel vectors `current -> candidate` and
/// `candidate -> destination`.
///
/// Returns [`Error::DegenerateHeading`] when either vector has zero length,
/// since no angle is defined in that case.
pub fn heading_angle(
    current: Coordinate,
    candidate: Coordinate,
    destination: Coordinate,
) -> Result<f64> {
    let (lon1, lat1) = current.to_radians();
    let (lon2, lat2) = candidate.to_radians();
    let (lon3, lat3) = destination.to_radians();

    let incoming = (lon2 - lon1, lat2 - lat1);
    let outgoing = (lon3 - lon2, lat3 - lat2);

    let mag_in = (incoming.0 * incoming.0 + incoming.1 * incoming.1).sqrt();
    let mag_out = (outgoing.0 * outgoing.0 + outgoing.1 * outgoing.1).sqrt();
    if mag_in == 0.0 || mag_out == 0.0 {
        return Err(Error::DegenerateHeading);
    }

    let dot = incoming.0 * outgoing.0 + incoming.1 * outgoing.1;
    // Rounding can push the ratio marginally outside acos's domain.
    let cos = (dot / (mag_in * mag_out)).clamp(-1.0, 1.0);
    Ok(cos.acos())
}

/// Whether stopping at `candidate` keeps the route heading towards
/// `destination` (detour angle of at most 45 degrees, inclusive).
///
/// Degenerate cases: a candidate at the current position is rejected, since
/// selecting it would make no forward progress; a candidate sitting exactly
/// on the destination is accepted.
pub fn is_aligned(current: Coordinate, candidate: Coordinate, destination: Coordinate) -> bool {
    match heading_angle(current, candidate, destination) {
        Ok(angle) => angle <= MAX_HEADING_ANGLE,
        Err(_) => candidate != current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_ahead_is_aligned() {
        let current = Coordinate::new(0.0, 0.0);
        let candidate = Coordinate::new(1.0, 1.0);
        let destination = Coordinate::new(2.0, 2.0);
        assert!(is_aligned(current, candidate, destination));
    }

    #[test]
    fn forty_five_degrees_is_aligned_inclusive() {
        // East to the candidate, then north-east to the destination.
        let current = Coordinate::new(0.0, 0.0);
        let candidate = Coordinate::new(0.0, 1.0);
        let destination = Coordinate::new(1.0, 2.0);

        let angle = heading_angle(current, candidate, destination).unwrap();
        assert!((angle - MAX_HEADING_ANGLE).abs() < 1e-12);
        assert!(is_aligned(current, candidate, destination));
    }

    #[test]
    fn ninety_degrees_is_not_aligned() {
        // East to the candidate, then due north.
        let current = Coordinate::new(0.0, -1.0);
        let candidate = Coordinate::new(0.0, 0.0);
        let destination = Coordinate::new(1.0, 0.0);

        let angle = heading_angle(current, candidate, destination).unwrap();
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(!is_aligned(current, candidate, destination));
    }

    #[test]
    fn backtracking_is_not_aligned() {
        let current = Coordinate::new(48.8535, 2.3484);
        let candidate = Coordinate::new(49.9, 0.8);
        let destination = Coordinate::new(43.2962, 5.37);
        assert!(!is_aligned(current, candidate, destination));
    }

    #[test]
    fn candidate_at_current_position_is_rejected() {
        let current = Coordinate::new(1.0, 1.0);
        let destination = Coordinate::new(2.0, 2.0);
        assert!(matches!(
            heading_angle(current, current, destination),
            Err(Error::DegenerateHeading)
        ));
        assert!(!is_aligned(current, current, destination));
    }

    #[test]
    fn candidate_at_destination_is_accepted() {
        let current = Coordinate::new(1.0, 1.0);
        let destination = Coordinate::new(2.0, 2.0);
        assert!(is_aligned(current, destination, destination));
    }

    #[test]
    fn opposite_vectors_clamp_instead_of_panicking() {
        // Perfect backtrack: cosine lands on the domain edge.
        let current = Coordinate::new(0.0, 0.0);
        let candidate = Coordinate::new(2.0, 2.0);
        let destination = Coordinate::new(0.0, 0.0);
        let angle = heading_angle(current, candidate, destination).unwrap();
        assert!((angle - std::f64::consts::PI).abs() < 1e-9);
        assert!(!is_aligned(current, candidate, destination));
    }
}
