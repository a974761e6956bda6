//! Append-only 2-D curves with on-the-fly simplification.
//!
//! [`XyCurve`] stores the vertices of a monotone polyline (ROC curves, in
//! practice). Every [`XyCurve::append`] drops trailing vertices that lie on
//! the line through their neighbours, so the stored curve is the minimal
//! vertex set describing the same piecewise-linear shape. Dropping such a
//! vertex never changes [`XyCurve::area_under_curve`].

use std::fmt;

/// A single vertex of an [`XyCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Horizontal coordinate (e.g. false positive rate).
    pub x: f64,
    /// Vertical coordinate (e.g. true positive rate).
    pub y: f64,
}

/// Axis-aligned bounding box of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// An ordered, simplified sequence of 2-D points with axis labels.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XyCurve {
    points: Vec<CurvePoint>,
    x_label: String,
    y_label: String,
}

impl XyCurve {
    /// Create an empty, unlabelled curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty curve with axis labels.
    pub fn with_labels(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }

    /// Create an empty curve with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append `(x, y)` and drop any vertex made redundant by it.
    ///
    /// Points must arrive non-decreasing in both coordinates; this is not
    /// checked. After the push, while three or more points remain, the
    /// middle one of the last three is removed if it is collinear with the
    /// other two, and the new last three are examined again.
    pub fn append(&mut self, x: f64, y: f64) {
        self.points.push(CurvePoint { x, y });
        while self.points.len() >= 3 {
            let n = self.points.len();
            let (p0, p1, p2) = (self.points[n - 3], self.points[n - 2], self.points[n - 1]);
            if !collinear(p0, p1, p2) {
                break;
            }
            self.points.remove(n - 2);
        }
    }

    /// Divide every x coordinate by `x_total` and every y coordinate by
    /// `y_total`.
    ///
    /// Turns a curve built on raw counts into one on rates. A coordinate equal
    /// to its total maps to exactly `1.0`. Positive totals keep the
    /// simplification invariant intact.
    pub fn normalize(&mut self, x_total: f64, y_total: f64) {
        for p in &mut self.points {
            p.x /= x_total;
            p.y /= y_total;
        }
    }

    /// Area under the curve by the trapezoidal rule.
    ///
    /// Curves with fewer than two points have zero area.
    pub fn area_under_curve(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x) * (w[0].y + w[1].y) * 0.5)
            .sum()
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All stored points, in insertion order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// The `i`-th point, if any.
    pub fn point(&self, i: usize) -> Option<CurvePoint> {
        self.points.get(i).copied()
    }

    pub fn first(&self) -> Option<CurvePoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<CurvePoint> {
        self.points.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        self.points.iter().copied()
    }

    /// Label of the x axis.
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Label of the y axis.
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Bounding box of the stored points, `None` for an empty curve.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.points[1..].iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

impl fmt::Display for XyCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XyCurve[{},{}]:", self.x_label, self.y_label)?;
        for p in &self.points {
            write!(f, " {},{}", p.x, p.y)?;
        }
        Ok(())
    }
}

/// Whether `p1` lies on the line through `p0` and `p2`.
///
/// Exact zero test on the cross product of `(p1 - p0)` and `(p2 - p0)`.
/// Integer coordinates below 2^26 keep both products exact.
#[inline]
fn collinear(p0: CurvePoint, p1: CurvePoint, p2: CurvePoint) -> bool {
    (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x) == 0.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_of(points: &[(f64, f64)]) -> XyCurve {
        let mut c = XyCurve::new();
        for &(x, y) in points {
            c.append(x, y);
        }
        c
    }

    #[test]
    fn vertical_run_collapses() {
        let c = curve_of(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 2.0)]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.point(1), Some(CurvePoint { x: 0.0, y: 2.0 }));
    }

    #[test]
    fn horizontal_run_collapses() {
        let c = curve_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn diagonal_collapses_to_endpoints() {
        let c = curve_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
        assert_eq!(c.points(), &[CurvePoint { x: 0.0, y: 0.0 }, CurvePoint { x: 4.0, y: 4.0 }]);
    }

    #[test]
    fn corners_are_kept() {
        let c = curve_of(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn duplicate_point_is_absorbed() {
        let c = curve_of(&[(0.0, 0.0), (1.0, 2.0), (1.0, 2.0)]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.last(), Some(CurvePoint { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn exact_rates_collinear() {
        let c = curve_of(&[(0.0, 0.0), (0.25, 0.5), (0.5, 1.0)]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn near_collinear_large_counts_kept() {
        // Cross product of exactly 1 against products near 1e12.
        let c = curve_of(&[(0.0, 0.0), (999_999.0, 1_000_000.0), (1_000_000.0, 1_000_001.0)]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn area_unit_square_diagonal() {
        let c = curve_of(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!((c.area_under_curve() - 0.5).abs() < 1e-14);
    }

    #[test]
    fn area_step_curve() {
        let c = curve_of(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert!((c.area_under_curve() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn area_of_degenerate_curves_is_zero() {
        assert_eq!(XyCurve::new().area_under_curve(), 0.0);
        assert_eq!(curve_of(&[(0.3, 0.7)]).area_under_curve(), 0.0);
    }

    #[test]
    fn simplification_preserves_area() {
        let raw = [(0.0, 0.0), (0.1, 0.2), (0.2, 0.4), (0.4, 0.4), (0.7, 0.9), (1.0, 1.0)];
        let simplified = curve_of(&raw);
        let naive: f64 = raw
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) * 0.5)
            .sum();
        assert!(simplified.len() < raw.len());
        assert!((simplified.area_under_curve() - naive).abs() < 1e-14);
    }

    #[test]
    fn normalize_maps_counts_to_rates() {
        let mut c = curve_of(&[(0.0, 0.0), (0.0, 2.0), (49.0, 5.0)]);
        c.normalize(49.0, 5.0);
        assert_eq!(c.last(), Some(CurvePoint { x: 1.0, y: 1.0 }));
        assert_eq!(c.point(1), Some(CurvePoint { x: 0.0, y: 0.4 }));
    }

    #[test]
    fn bounds_and_labels() {
        let mut c = XyCurve::with_labels("FPR", "TPR");
        assert!(c.bounds().is_none());
        c.append(0.0, 0.0);
        c.append(0.5, 1.0);
        c.append(1.0, 1.0);
        let b = c.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0.0, 1.0, 0.0, 1.0));
        assert_eq!(c.x_label(), "FPR");
        assert_eq!(c.to_string(), "XyCurve[FPR,TPR]: 0,0 0.5,1 1,1");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Monotone staircase of integer steps, like a ROC curve in count space.
    fn monotone_steps() -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((0..4u32, 0..4u32), 1..60).prop_map(|steps| {
            let (mut x, mut y) = (0.0, 0.0);
            let mut out = vec![(0.0, 0.0)];
            for (dx, dy) in steps {
                x += dx as f64;
                y += dy as f64;
                out.push((x, y));
            }
            out
        })
    }

    proptest! {
        #[test]
        fn area_matches_unsimplified(points in monotone_steps()) {
            let mut c = XyCurve::new();
            for &(x, y) in &points {
                c.append(x, y);
            }
            let naive: f64 = points
                .windows(2)
                .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) * 0.5)
                .sum();
            prop_assert!((c.area_under_curve() - naive).abs() < 1e-9);
            prop_assert!(c.len() <= points.len());
        }

        #[test]
        fn no_three_consecutive_collinear(points in monotone_steps()) {
            let mut c = XyCurve::new();
            for &(x, y) in &points {
                c.append(x, y);
            }
            for w in c.points().windows(3) {
                prop_assert!(!collinear(w[0], w[1], w[2]));
            }
        }
    }
}
