//! The growable vertex buffer paths are recorded into.
//!
//! A path is a sequence of tagged vertices. A `MoveTo` vertex begins a stroke, `LineTo`
//! vertices extend it with straight lines and `BezierTo` vertices come in runs of three
//! (two control points and an end point) that extend it with a cubic bézier curve.
//! The last vertex of a stroke may close it, which adds an implicit edge back to the
//! stroke's `MoveTo` point.
//!
//! Small paths are stored inline; the buffer moves to the heap when it outgrows
//! `INLINE_CAPACITY` vertices. Allocation failures are reported as
//! `PathError::OutOfMemory` instead of aborting.

use crate::math::*;
use crate::PathError;

use arrayvec::ArrayVec;
use core::fmt;
use core::iter::FusedIterator;

/// Number of vertices stored without allocating.
pub const INLINE_CAPACITY: usize = 16;

/// Heap capacity reserved when an inline buffer overflows.
const MIN_HEAP_CAPACITY: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum VertexKind {
    MoveTo,
    LineTo,
    BezierTo,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Point,
    pub kind: VertexKind,
    /// Adds an implicit edge from this vertex back to the stroke's `MoveTo` point.
    pub closes_figure: bool,
}

impl Vertex {
    #[inline]
    pub fn new(position: Point, kind: VertexKind) -> Self {
        Vertex {
            position,
            kind,
            closes_figure: false,
        }
    }

    #[inline]
    pub fn closing(mut self) -> Self {
        self.closes_figure = true;
        self
    }
}

#[derive(Clone)]
enum Storage {
    Inline(ArrayVec<Vertex, INLINE_CAPACITY>),
    Heap(Vec<Vertex>),
}

/// The state of a `PathBuffer` at some point, to return to with `PathBuffer::rollback`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Checkpoint {
    len: usize,
    cursor: Point,
    new_stroke: bool,
    tail_closes_figure: bool,
}

/// A growable sequence of path vertices, plus the current position.
///
/// The cursor is the current position of the drawing context in device space. It
/// usually equals the last vertex but a move-to only updates the cursor and sets the
/// `new_stroke` flag, so that the next drawing command begins a new stroke there.
#[derive(Clone)]
pub struct PathBuffer {
    storage: Storage,
    cursor: Point,
    new_stroke: bool,
}

impl PathBuffer {
    #[inline]
    pub fn new() -> Self {
        PathBuffer {
            storage: Storage::Inline(ArrayVec::new()),
            cursor: Point::zero(),
            new_stroke: true,
        }
    }

    /// Creates an empty path whose cursor is at a given position.
    #[inline]
    pub fn starting_at(cursor: Point) -> Self {
        PathBuffer {
            cursor,
            ..PathBuffer::new()
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, PathError> {
        let mut path = PathBuffer::new();
        path.reserve(capacity)?;

        Ok(path)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        match &self.storage {
            Storage::Inline(vertices) => vertices.as_slice(),
            Storage::Heap(vertices) => vertices.as_slice(),
        }
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        match &mut self.storage {
            Storage::Inline(vertices) => vertices.as_mut_slice(),
            Storage::Heap(vertices) => vertices.as_mut_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline(_) => INLINE_CAPACITY,
            Storage::Heap(vertices) => vertices.capacity(),
        }
    }

    /// Returns whether the vertices are still stored inline.
    #[inline]
    pub fn is_inline(&self) -> bool {
        match self.storage {
            Storage::Inline(_) => true,
            Storage::Heap(_) => false,
        }
    }

    #[inline]
    pub fn last(&self) -> Option<&Vertex> {
        self.vertices().last()
    }

    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[inline]
    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    /// Whether the next drawing command must begin a new stroke.
    #[inline]
    pub fn new_stroke(&self) -> bool {
        self.new_stroke
    }

    #[inline]
    pub fn set_new_stroke(&mut self, new_stroke: bool) {
        self.new_stroke = new_stroke;
    }

    /// Moves the cursor to the last vertex, if any.
    pub fn update_cursor_to_last(&mut self) {
        if let Some(last) = self.last() {
            self.cursor = last.position;
        }
    }

    /// Ensures there is room for `additional` more vertices.
    ///
    /// The capacity at least doubles when it grows and never shrinks.
    pub fn reserve(&mut self, additional: usize) -> Result<(), PathError> {
        let needed = self
            .len()
            .checked_add(additional)
            .ok_or(PathError::OutOfMemory)?;

        if let Storage::Inline(vertices) = &self.storage {
            if needed <= INLINE_CAPACITY {
                return Ok(());
            }

            let mut heap = Vec::new();
            heap.try_reserve_exact(needed.max(MIN_HEAP_CAPACITY))?;
            heap.extend_from_slice(vertices.as_slice());
            self.storage = Storage::Heap(heap);

            return Ok(());
        }

        if let Storage::Heap(vertices) = &mut self.storage {
            if needed > vertices.capacity() {
                let new_capacity = needed.max(vertices.capacity() * 2);
                vertices.try_reserve_exact(new_capacity - vertices.len())?;
            }
        }

        Ok(())
    }

    // Callers must have reserved room for the vertex.
    fn push_reserved(&mut self, vertex: Vertex) {
        log::trace!(
            "{:?} {:?} {:?}{}",
            vertex.kind,
            vertex.position.x,
            vertex.position.y,
            if vertex.closes_figure { " Z" } else { "" }
        );
        match &mut self.storage {
            Storage::Inline(vertices) => vertices.push(vertex),
            Storage::Heap(vertices) => vertices.push(vertex),
        }
    }

    pub fn append(&mut self, vertex: Vertex) -> Result<(), PathError> {
        self.reserve(1)?;
        self.push_reserved(vertex);

        Ok(())
    }

    #[inline]
    pub fn push(&mut self, position: Point, kind: VertexKind) -> Result<(), PathError> {
        self.append(Vertex::new(position, kind))
    }

    /// Appends several points tagged with the same kind.
    ///
    /// Returns the inserted vertices so that the caller can retag some of them, for
    /// example turning the first one into a `MoveTo`.
    pub fn append_run(
        &mut self,
        points: &[Point],
        kind: VertexKind,
    ) -> Result<&mut [Vertex], PathError> {
        self.reserve(points.len())?;
        let start = self.len();
        for &position in points {
            self.push_reserved(Vertex::new(position, kind));
        }

        Ok(&mut self.vertices_mut()[start..])
    }

    pub fn append_vertices(&mut self, vertices: &[Vertex]) -> Result<(), PathError> {
        self.reserve(vertices.len())?;
        for vertex in vertices {
            self.push_reserved(*vertex);
        }

        Ok(())
    }

    /// Closes the last stroke and moves the cursor back to its first point.
    ///
    /// Does nothing on an empty path.
    pub fn close_last_stroke(&mut self) {
        let start = match self.last_move_to() {
            Some(position) => position,
            None => return,
        };

        if let Some(last) = self.vertices_mut().last_mut() {
            last.closes_figure = true;
        }
        self.cursor = start;
    }

    /// The position of the `MoveTo` vertex that begins the last stroke.
    pub fn last_move_to(&self) -> Option<Point> {
        self.vertices()
            .iter()
            .rev()
            .find(|v| v.kind == VertexKind::MoveTo)
            .map(|v| v.position)
    }

    /// Whether the last vertex closes its stroke.
    #[inline]
    pub fn is_last_stroke_closed(&self) -> bool {
        self.last().map(|v| v.closes_figure).unwrap_or(false)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.len(),
            cursor: self.cursor,
            new_stroke: self.new_stroke,
            tail_closes_figure: self.is_last_stroke_closed(),
        }
    }

    /// Restores the state captured by `checkpoint`, discarding the vertices added since.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.len <= self.len());
        match &mut self.storage {
            Storage::Inline(vertices) => vertices.truncate(checkpoint.len),
            Storage::Heap(vertices) => vertices.truncate(checkpoint.len),
        }
        if let Some(last) = self.vertices_mut().last_mut() {
            last.closes_figure = checkpoint.tail_closes_figure;
        }
        self.cursor = checkpoint.cursor;
        self.new_stroke = checkpoint.new_stroke;
    }

    /// Removes every vertex, keeping the allocation and the cursor.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Inline(vertices) => vertices.clear(),
            Storage::Heap(vertices) => vertices.clear(),
        }
        self.new_stroke = true;
    }

    /// Deep copy that reports allocation failures.
    pub fn try_clone(&self) -> Result<Self, PathError> {
        let storage = match &self.storage {
            Storage::Inline(vertices) => Storage::Inline(vertices.clone()),
            Storage::Heap(vertices) => {
                let mut copy = Vec::new();
                copy.try_reserve_exact(vertices.capacity())?;
                copy.extend_from_slice(vertices);
                Storage::Heap(copy)
            }
        };

        Ok(PathBuffer {
            storage,
            cursor: self.cursor,
            new_stroke: self.new_stroke,
        })
    }

    /// Iterates over the strokes of the path.
    ///
    /// Each item begins with a `MoveTo` vertex, except possibly the first one if the
    /// path is malformed.
    #[inline]
    pub fn strokes(&self) -> Strokes {
        Strokes {
            vertices: self.vertices(),
        }
    }

    /// Whether the path contains bézier curves.
    pub fn has_curves(&self) -> bool {
        self.vertices()
            .iter()
            .any(|v| v.kind == VertexKind::BezierTo)
    }
}

impl Default for PathBuffer {
    fn default() -> Self {
        PathBuffer::new()
    }
}

impl PartialEq for PathBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor
            && self.new_stroke == other.new_stroke
            && self.vertices() == other.vertices()
    }
}

impl fmt::Debug for PathBuffer {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "\"")?;
        let mut first = true;
        for vertex in self.vertices() {
            if !first {
                write!(formatter, " ")?;
            }
            first = false;

            let verb = match vertex.kind {
                VertexKind::MoveTo => "M",
                VertexKind::LineTo => "L",
                VertexKind::BezierTo => "C",
            };
            write!(formatter, "{} ", verb)?;
            fmt::Debug::fmt(&vertex.position.x, formatter)?;
            write!(formatter, " ")?;
            fmt::Debug::fmt(&vertex.position.y, formatter)?;
            if vertex.closes_figure {
                write!(formatter, " Z")?;
            }
        }
        write!(formatter, "\"")
    }
}

/// An iterator over the strokes of a path, each of them a slice of vertices.
#[derive(Clone)]
pub struct Strokes<'l> {
    vertices: &'l [Vertex],
}

impl<'l> Iterator for Strokes<'l> {
    type Item = &'l [Vertex];

    fn next(&mut self) -> Option<&'l [Vertex]> {
        if self.vertices.is_empty() {
            return None;
        }

        let end = self.vertices[1..]
            .iter()
            .position(|v| v.kind == VertexKind::MoveTo)
            .map(|idx| idx + 1)
            .unwrap_or(self.vertices.len());

        let (stroke, rest) = self.vertices.split_at(end);
        self.vertices = rest;

        Some(stroke)
    }
}

impl<'l> FusedIterator for Strokes<'l> {}

#[cfg(test)]
fn square(path: &mut PathBuffer, x: f64, y: f64) {
    path.push(point(x, y), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(x + 1.0, y), point(x + 1.0, y + 1.0), point(x, y + 1.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();
}

#[test]
fn inline_then_heap() {
    let mut path = PathBuffer::new();
    assert!(path.is_inline());
    assert_eq!(path.capacity(), INLINE_CAPACITY);

    for i in 0..4 {
        square(&mut path, i as f64 * 2.0, 0.0);
    }
    assert_eq!(path.len(), 16);
    assert!(path.is_inline());

    square(&mut path, 10.0, 0.0);
    assert_eq!(path.len(), 20);
    assert!(!path.is_inline());
    assert!(path.capacity() >= MIN_HEAP_CAPACITY);

    let before = path.capacity();
    path.reserve(before).unwrap();
    assert!(path.capacity() >= 2 * before);

    let capacity = path.capacity();
    path.clear();
    path.reserve(1).unwrap();
    assert_eq!(path.capacity(), capacity);
}

#[test]
fn append_run_returns_inserted_vertices() {
    let mut path = PathBuffer::new();
    let inserted = path
        .append_run(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)], VertexKind::LineTo)
        .unwrap();
    assert_eq!(inserted.len(), 3);
    inserted[0].kind = VertexKind::MoveTo;

    let more = path.append_run(&[point(5.0, 5.0)], VertexKind::LineTo).unwrap();
    assert_eq!(more.len(), 1);

    assert_eq!(path.vertices()[0].kind, VertexKind::MoveTo);
    assert_eq!(path.vertices()[3].position, point(5.0, 5.0));
}

#[test]
fn close_snaps_the_cursor_back() {
    let mut path = PathBuffer::new();
    square(&mut path, 3.0, 4.0);

    assert!(path.is_last_stroke_closed());
    assert_eq!(path.cursor(), point(3.0, 4.0));
    assert_eq!(path.last_move_to(), Some(point(3.0, 4.0)));

    let mut empty = PathBuffer::starting_at(point(7.0, 7.0));
    empty.close_last_stroke();
    assert!(empty.is_empty());
    assert_eq!(empty.cursor(), point(7.0, 7.0));
}

#[test]
fn rollback_restores_everything() {
    let mut path = PathBuffer::new();
    square(&mut path, 0.0, 0.0);
    path.set_new_stroke(false);
    let checkpoint = path.checkpoint();
    let copy = path.clone();

    // Push past the inline capacity so the rollback also crosses storage kinds.
    for i in 0..5 {
        square(&mut path, i as f64, 10.0);
    }
    path.vertices_mut()[3].closes_figure = false;
    path.set_new_stroke(true);

    path.rollback(checkpoint);
    assert_eq!(path, copy);
    assert!(!path.is_inline());

    let mut path = PathBuffer::new();
    square(&mut path, 0.0, 0.0);
    let checkpoint = path.checkpoint();
    path.vertices_mut()[3].closes_figure = false;
    path.push(point(9.0, 9.0), VertexKind::LineTo).unwrap();
    path.rollback(checkpoint);
    assert!(path.is_last_stroke_closed());
}

#[test]
fn try_clone_is_deep() {
    let mut path = PathBuffer::new();
    for i in 0..6 {
        square(&mut path, i as f64, 0.0);
    }
    let copy = path.try_clone().unwrap();
    assert_eq!(copy, path);

    path.vertices_mut()[0].position = point(-1.0, -1.0);
    assert_ne!(copy, path);
    assert_eq!(copy.vertices()[0].position, point(0.0, 0.0));
}

#[test]
fn stroke_iterator() {
    let mut path = PathBuffer::new();
    assert_eq!(path.strokes().count(), 0);

    square(&mut path, 0.0, 0.0);
    path.push(point(5.0, 5.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(6.0, 5.0), point(7.0, 6.0), point(8.0, 5.0)],
        VertexKind::BezierTo,
    )
    .unwrap();
    square(&mut path, 0.0, 3.0);

    let lengths: Vec<usize> = path.strokes().map(|s| s.len()).collect();
    assert_eq!(lengths, vec![4, 4, 4]);
    for stroke in path.strokes() {
        assert_eq!(stroke[0].kind, VertexKind::MoveTo);
    }
    assert!(path.has_curves());
}

#[test]
fn debug_format() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.push(point(1.0, 2.0), VertexKind::LineTo).unwrap();
    path.close_last_stroke();

    assert_eq!(format!("{:?}", path), "\"M 0.0 0.0 L 1.0 2.0 Z\"");
}
