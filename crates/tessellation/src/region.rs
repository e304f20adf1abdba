//! Conversion of a path into a region.
//!
//! The path is flattened if needed, then its strokes are handed to a `RegionSink` as a
//! single point array plus the number of points of each polygon. Every stroke is a
//! polygon, closed or not. Building the region itself (scanline conversion, clipping
//! structures) is the sink's job.

use crate::algorithms::flatten::flatten_path;
use crate::algorithms::hit_test::polygon_winding_number_at_position;
use crate::math::Point;
use crate::path::{FillRule, PathBuffer, PathError, VertexKind};
use crate::RegionError;

/// Builds a region out of polygons.
pub trait RegionSink {
    type Region;
    type Error;

    /// `points` contains the vertices of all polygons one after the other and `counts`
    /// the number of vertices of each polygon. Both are empty for an empty path.
    fn build_region(
        &mut self,
        points: &[Point],
        counts: &[usize],
        fill_rule: FillRule,
    ) -> Result<Self::Region, Self::Error>;
}

/// Builds a region out of the strokes of a path.
///
/// Fails with `PathError::NoOpenPath` if the path does not start with a `MoveTo` vertex.
/// Errors from the sink are returned as `RegionError::Sink`.
pub fn path_to_region<S: RegionSink>(
    path: &PathBuffer,
    fill_rule: FillRule,
    sink: &mut S,
) -> Result<S::Region, RegionError<S::Error>> {
    let flattened;
    let path = if path.has_curves() {
        flattened = flatten_path(path)?;
        &flattened
    } else {
        path
    };

    if let Some(first) = path.vertices().first() {
        if first.kind != VertexKind::MoveTo {
            log::warn!("path does not begin with a move-to, no region built");
            return Err(PathError::NoOpenPath.into());
        }
    }

    let mut points = Vec::new();
    points
        .try_reserve_exact(path.len())
        .map_err(PathError::from)?;
    let mut counts = Vec::new();
    for stroke in path.strokes() {
        counts.try_reserve(1).map_err(PathError::from)?;
        counts.push(stroke.len());
        points.extend(stroke.iter().map(|v| v.position));
    }

    log::debug!(
        "building a region from {} polygons ({} points, {:?})",
        counts.len(),
        points.len(),
        fill_rule
    );

    sink.build_region(&points, &counts, fill_rule)
        .map_err(RegionError::Sink)
}

/// A set of polygons with a fill rule; the simplest possible region.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PolygonSet {
    points: Vec<Point>,
    counts: Vec<usize>,
    fill_rule: FillRule,
}

impl PolygonSet {
    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn num_polygons(&self) -> usize {
        self.counts.len()
    }

    /// Iterates over the polygons.
    pub fn polygons(&self) -> impl Iterator<Item = &[Point]> + '_ {
        let mut start = 0;
        self.counts.iter().map(move |&count| {
            let polygon = &self.points[start..start + count];
            start += count;
            polygon
        })
    }

    /// Whether a point is inside the region, according to its fill rule.
    pub fn contains(&self, point: &Point) -> bool {
        let winding: i32 = self
            .polygons()
            .map(|polygon| polygon_winding_number_at_position(point, polygon))
            .sum();

        self.fill_rule.is_in(winding)
    }
}

/// A `RegionSink` producing `PolygonSet`s.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolygonSetBuilder;

impl RegionSink for PolygonSetBuilder {
    type Region = PolygonSet;
    type Error = PathError;

    fn build_region(
        &mut self,
        points: &[Point],
        counts: &[usize],
        fill_rule: FillRule,
    ) -> Result<PolygonSet, PathError> {
        let mut region = PolygonSet {
            points: Vec::new(),
            counts: Vec::new(),
            fill_rule,
        };
        region.points.try_reserve_exact(points.len())?;
        region.counts.try_reserve_exact(counts.len())?;
        region.points.extend_from_slice(points);
        region.counts.extend_from_slice(counts);

        Ok(region)
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
struct Recorded {
    points: Vec<Point>,
    counts: Vec<usize>,
    fill_rule: Option<FillRule>,
}

#[cfg(test)]
impl RegionSink for Recorded {
    type Region = usize;
    type Error = &'static str;

    fn build_region(
        &mut self,
        points: &[Point],
        counts: &[usize],
        fill_rule: FillRule,
    ) -> Result<usize, &'static str> {
        if points.len() > 1000 {
            return Err("too many points");
        }
        self.points = points.to_vec();
        self.counts = counts.to_vec();
        self.fill_rule = Some(fill_rule);

        Ok(counts.len())
    }
}

#[cfg(test)]
fn recorder() -> Recorded {
    Recorded {
        points: Vec::new(),
        counts: Vec::new(),
        fill_rule: None,
    }
}

#[test]
fn one_count_per_stroke() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(&[point(4.0, 0.0), point(4.0, 4.0)], VertexKind::LineTo)
        .unwrap();
    path.close_last_stroke();
    path.push(point(10.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(14.0, 0.0), point(14.0, 4.0), point(10.0, 4.0)],
        VertexKind::LineTo,
    )
    .unwrap();

    let mut sink = recorder();
    let count = path_to_region(&path, FillRule::NonZero, &mut sink).unwrap();

    assert_eq!(count, 2);
    assert_eq!(sink.counts, vec![3, 4]);
    assert_eq!(sink.points.len(), 7);
    assert_eq!(sink.points[3], point(10.0, 0.0));
    assert_eq!(sink.fill_rule, Some(FillRule::NonZero));
}

#[test]
fn curves_are_flattened() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)],
        VertexKind::BezierTo,
    )
    .unwrap();

    let mut sink = recorder();
    path_to_region(&path, FillRule::EvenOdd, &mut sink).unwrap();
    assert_eq!(sink.counts, vec![9]);
}

#[test]
fn empty_path_gives_an_empty_region() {
    let region = path_to_region(&PathBuffer::new(), FillRule::EvenOdd, &mut PolygonSetBuilder)
        .unwrap();
    assert!(region.is_empty());
    assert_eq!(region.num_polygons(), 0);
    assert!(!region.contains(&point(0.0, 0.0)));
}

#[test]
fn sink_errors_are_forwarded() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    for i in 0..1001 {
        path.push(point(i as f64, 1.0), VertexKind::LineTo).unwrap();
    }

    let result = path_to_region(&path, FillRule::EvenOdd, &mut recorder());
    assert_eq!(result, Err(RegionError::Sink("too many points")));
}

#[test]
fn path_must_begin_with_a_move_to() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::LineTo).unwrap();
    path.push(point(1.0, 0.0), VertexKind::LineTo).unwrap();

    let result = path_to_region(&path, FillRule::EvenOdd, &mut PolygonSetBuilder);
    assert_eq!(result, Err(RegionError::Path(PathError::NoOpenPath)));
}

#[test]
fn polygon_set_contains() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();
    path.push(point(2.0, 2.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(8.0, 2.0), point(8.0, 8.0), point(2.0, 8.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();

    let even_odd = path_to_region(&path, FillRule::EvenOdd, &mut PolygonSetBuilder).unwrap();
    let non_zero = path_to_region(&path, FillRule::NonZero, &mut PolygonSetBuilder).unwrap();

    assert_eq!(even_odd.num_polygons(), 2);
    assert!(even_odd.contains(&point(1.0, 5.0)));
    assert!(!even_odd.contains(&point(5.0, 5.0)));
    assert!(non_zero.contains(&point(5.0, 5.0)));
    assert!(!non_zero.contains(&point(11.0, 5.0)));
}
