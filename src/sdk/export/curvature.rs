use crate::sdk::geo::Point;
use crate::sdk::routing::Route;
use serde::Serialize;

/// Turns sharper than this many degrees count as significant.
pub const SIGNIFICANT_TURN_DEG: f64 = 15.0;

/// Turn-complexity summary of a polyline. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CurvatureSummary {
    pub total_turns: f64,
    pub avg_turn: f64,
    pub max_turn: f64,
    pub significant_turns: usize,
}

/// Heading change at every interior point, each in [0, 180].
pub fn turn_angles(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .map(|w| {
            let incoming = w[0].bearing(&w[1]);
            let outgoing = w[1].bearing(&w[2]);
            let theta = (outgoing - incoming).abs();
            if theta > 180.0 {
                360.0 - theta
            } else {
                theta
            }
        })
        .collect()
}

pub fn analyse_points(points: &[Point]) -> CurvatureSummary {
    let turns = turn_angles(points);
    if turns.is_empty() {
        return CurvatureSummary::default();
    }

    let total_turns: f64 = turns.iter().sum();
    CurvatureSummary {
        total_turns,
        avg_turn: total_turns / turns.len() as f64,
        max_turn: turns.iter().copied().fold(0.0, f64::max),
        significant_turns: turns.iter().filter(|&&t| t > SIGNIFICANT_TURN_DEG).count(),
    }
}

pub fn analyse_curvature(route: &Route) -> CurvatureSummary {
    let points: Vec<Point> = route.points().collect();
    analyse_points(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn straight_line_has_no_turns() {
        for line in [
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]),
            points(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]),
        ] {
            let summary = analyse_points(&line);
            assert_eq!(summary.total_turns, 0.0);
            assert_eq!(summary.significant_turns, 0);
        }
    }

    #[test]
    fn right_angle_turn() {
        // north along the prime meridian, then east along the equator
        let summary = analyse_points(&points(&[(-1.0, 0.0), (0.0, 0.0), (0.0, 1.0)]));
        assert!((summary.max_turn - 90.0).abs() < 1e-6);
        assert!((summary.avg_turn - 90.0).abs() < 1e-6);
        assert_eq!(summary.significant_turns, 1);
    }

    #[test]
    fn turn_angle_wraps_to_shortest() {
        // headings of about -170 then +170: a 20 degree turn, not 340
        let turns = turn_angles(&points(&[(0.0, 0.0), (-1.0, -0.176), (-2.0, 0.0)]));
        assert_eq!(turns.len(), 1);
        assert!((turns[0] - 19.957).abs() < 0.01, "got {}", turns[0]);
    }

    #[test]
    fn u_turn_is_180() {
        let turns = turn_angles(&points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]));
        assert!((turns[0] - 180.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_three_points_is_all_zero() {
        for coords in [&[][..], &[(1.0, 1.0)][..], &[(1.0, 1.0), (2.0, 2.0)][..]] {
            assert_eq!(analyse_points(&points(coords)), CurvatureSummary::default());
        }
    }

    #[test]
    fn mixed_turns_are_aggregated() {
        // straight, then a right angle, then a gentle bend
        let line = points(&[(-2.0, 0.0), (-1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (0.1, 2.0)]);
        let turns = turn_angles(&line);
        let summary = analyse_points(&line);

        assert_eq!(turns.len(), 3);
        assert!(turns[0].abs() < 1e-9);
        assert!((summary.total_turns - turns.iter().sum::<f64>()).abs() < 1e-12);
        assert!((summary.avg_turn - summary.total_turns / 3.0).abs() < 1e-12);
        assert!((summary.max_turn - 90.0).abs() < 1e-6);
        assert_eq!(summary.significant_turns, 1);
    }
}
