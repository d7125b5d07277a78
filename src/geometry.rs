//! Move geometry
//!
//! Pure decomposition of an absolute target into the polar move the robot
//! actually performs: turn to a heading, travel a distance, move the pen
//! axis. No hardware or state mutation in here.

use crate::parser::{ArgMap, ParseError};

/// A planar move expressed as the robot executes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarMove {
    /// Absolute heading in degrees, right-handed, 0 = +X axis.
    pub absolute_angle: f64,
    /// Straight-line travel distance in gcode units.
    pub distance: f64,
    /// Pen-axis displacement.
    pub dz: f64,
}

/// Resolve a move's argument map against the current position.
///
/// The heading uses `atan(dY/dX)` converted to degrees, with the vertical
/// case pinned to `0` for positive dY and `-180` otherwise. That is a
/// two-quadrant simplification inherited from the machine's calibration,
/// not a true atan2; keep it bit-for-bit until the geometry is revisited.
pub fn resolve(x0: f64, y0: f64, z0: f64, args: &ArgMap) -> Result<PolarMove, ParseError> {
    if let (Some(x), Some(y)) = (args.get('X'), args.get('Y')) {
        let dx = x - x0;
        let dy = y - y0;
        let absolute_angle = if dx == 0.0 {
            if dy > 0.0 { 0.0 } else { -180.0 }
        } else {
            (dy / dx).atan().to_degrees()
        };
        Ok(PolarMove {
            absolute_angle,
            distance: (dx * dx + dy * dy).sqrt(),
            dz: 0.0,
        })
    } else if let Some(z) = args.get('Z') {
        Ok(PolarMove {
            absolute_angle: 0.0,
            distance: 0.0,
            dz: z - z0,
        })
    } else {
        Err(ParseError::InvalidMoveSpecification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(char, f64)]) -> ArgMap {
        let mut map = ArgMap::default();
        for &(letter, value) in pairs {
            map.insert(letter, value);
        }
        map
    }

    #[test]
    fn straight_line_along_x() {
        let polar = resolve(0.0, 0.0, 0.0, &args(&[('X', 10.0), ('Y', 0.0)])).expect("move");
        assert_eq!(polar.absolute_angle, 0.0);
        assert_eq!(polar.distance, 10.0);
        assert_eq!(polar.dz, 0.0);
    }

    #[test]
    fn diagonal_distance_and_angle() {
        let polar = resolve(0.0, 0.0, 0.0, &args(&[('X', 3.0), ('Y', 4.0)])).expect("move");
        assert_eq!(polar.distance, 5.0);
        assert!((polar.absolute_angle - 53.13010235415598).abs() < 1e-9);
    }

    #[test]
    fn vertical_up_resolves_to_zero_degrees() {
        // dX == 0, dY > 0 pins the heading to 0 in this simplified model.
        let polar = resolve(0.0, 0.0, 0.0, &args(&[('X', 0.0), ('Y', 5.0)])).expect("move");
        assert_eq!(polar.absolute_angle, 0.0);
        assert_eq!(polar.distance, 5.0);
    }

    #[test]
    fn vertical_down_resolves_to_minus_180() {
        let polar = resolve(0.0, 0.0, 0.0, &args(&[('X', 0.0), ('Y', -5.0)])).expect("move");
        assert_eq!(polar.absolute_angle, -180.0);
    }

    #[test]
    fn relative_to_current_position() {
        let polar = resolve(10.0, 0.0, 0.0, &args(&[('X', 10.0), ('Y', 7.0)])).expect("move");
        assert_eq!(polar.absolute_angle, 0.0);
        assert_eq!(polar.distance, 7.0);
    }

    #[test]
    fn z_only_move_has_no_travel() {
        let polar = resolve(1.0, 2.0, 0.5, &args(&[('Z', -1.0)])).expect("move");
        assert_eq!(polar.absolute_angle, 0.0);
        assert_eq!(polar.distance, 0.0);
        assert_eq!(polar.dz, -1.5);
    }

    #[test]
    fn empty_argument_map_is_rejected() {
        let err = resolve(0.0, 0.0, 0.0, &ArgMap::default()).unwrap_err();
        assert_eq!(err, ParseError::InvalidMoveSpecification);
    }
}
