use crate::{Point, QuadraticBezierSegment};

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from.lerp(self.ctrl1, t);
        let ctrl2a = self.ctrl1.lerp(self.ctrl2, t);
        let ctrl1aa = ctrl1a.lerp(ctrl2a, t);
        let ctrl3a = self.ctrl2.lerp(self.to, t);
        let ctrl2aa = ctrl2a.lerp(ctrl3a, t);
        let ctrl1aaa = ctrl1aa.lerp(ctrl2aa, t);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Approximates the curve with `2^depth` line segments by splitting it in halves
    /// recursively, and invokes the callback with the end point of each of them.
    ///
    /// The start point is not passed to the callback. The last point is always `self.to`.
    pub fn for_each_subdivided<F>(&self, depth: u32, callback: &mut F)
    where
        F: FnMut(Point),
    {
        if depth == 0 {
            callback(self.to);
            return;
        }

        let (before, after) = self.split(0.5);
        before.for_each_subdivided(depth - 1, callback);
        after.for_each_subdivided(depth - 1, callback);
    }

    /// Returns whether all points of the segment are the same.
    pub fn is_a_point(&self, tolerance: f64) -> bool {
        let tolerance_squared = tolerance * tolerance;
        (self.from - self.to).square_length() <= tolerance_squared
            && (self.from - self.ctrl1).square_length() <= tolerance_squared
            && (self.to - self.ctrl2).square_length() <= tolerance_squared
    }
}

impl From<QuadraticBezierSegment> for CubicBezierSegment {
    fn from(curve: QuadraticBezierSegment) -> Self {
        curve.to_cubic()
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn split_keeps_the_curve() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 40.0),
        ctrl2: point(50.0, 40.0),
        to: point(60.0, 0.0),
    };

    let (a, b) = curve.split(0.25);
    assert_eq!(a.from, curve.from);
    assert_eq!(b.to, curve.to);
    assert_eq!(a.to, b.from);
    assert!((a.to - curve.sample(0.25)).length() < 1e-9);
    assert!((a.sample(0.5) - curve.sample(0.125)).length() < 1e-9);
    assert!((b.sample(0.5) - curve.sample(0.625)).length() < 1e-9);
}

#[test]
fn subdivision_samples_uniformly() {
    let curve = CubicBezierSegment {
        from: point(-5.0, 3.0),
        ctrl1: point(0.0, 20.0),
        ctrl2: point(30.0, -20.0),
        to: point(35.0, 3.0),
    };

    let mut points = Vec::new();
    curve.for_each_subdivided(3, &mut |p| points.push(p));

    assert_eq!(points.len(), 8);
    assert_eq!(*points.last().unwrap(), curve.to);
    for (i, p) in points.iter().enumerate() {
        let t = (i + 1) as f64 / 8.0;
        assert!((*p - curve.sample(t)).length() < 1e-9);
    }
}

#[test]
fn flip_reverses_the_parameterization() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 4.0),
        ctrl2: point(5.0, 4.0),
        to: point(6.0, 1.0),
    };
    let flipped = curve.flip();
    assert!((flipped.sample(0.3) - curve.sample(0.7)).length() < 1e-9);
    assert!(!curve.is_a_point(0.01));
}
