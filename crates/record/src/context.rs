//! The path state of a drawing context.
//!
//! ```text
//!            begin              end
//!   Closed --------> Open -------------> Closed (with a finished path)
//!                     |
//!                     +-- abort --> Closed (without path)
//! ```
//!
//! While a path is open, drawing primitives go to its recorder instead of the device.
//! The terminal operations work on the finished path.

use crate::algorithms::flatten::flatten_path;
use crate::device::DeviceContext;
use crate::path::{PathBuffer, PathError};
use crate::recorder::{PathRecorder, Primitive};
use crate::tessellation::{self, RegionError, RegionSink};

/// Where drawing primitives go when no path is open.
pub trait DeviceSink {
    fn draw(&mut self, dc: &dyn DeviceContext, primitive: &Primitive) -> Result<(), PathError>;
}

/// Discards everything.
impl DeviceSink for () {
    fn draw(&mut self, _dc: &dyn DeviceContext, _primitive: &Primitive) -> Result<(), PathError> {
        Ok(())
    }
}

/// The target of drawing primitives, depending on whether a path is open.
pub enum ContextMode<'l, S: DeviceSink> {
    Direct(&'l mut S),
    Recording(&'l mut PathRecorder),
}

impl<'l, S: DeviceSink> ContextMode<'l, S> {
    pub fn draw(&mut self, dc: &dyn DeviceContext, primitive: &Primitive) -> Result<(), PathError> {
        match self {
            ContextMode::Direct(sink) => sink.draw(dc, primitive),
            ContextMode::Recording(recorder) => recorder.record(dc, primitive),
        }
    }

    pub fn is_recording(&self) -> bool {
        match self {
            ContextMode::Direct(_) => false,
            ContextMode::Recording(_) => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum State {
    Closed(Option<PathBuffer>),
    Open(PathRecorder),
}

/// A saved path state, see `PathContext::save`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSnapshot(State);

/// The path bracket of a drawing context: recording state and finished path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathContext {
    state: State,
}

impl PathContext {
    pub fn new() -> Self {
        PathContext {
            state: State::Closed(None),
        }
    }

    /// Starts recording a path at the current position of the context, discarding the
    /// finished path if any.
    ///
    /// Does nothing if a path is already open.
    pub fn begin(&mut self, dc: &dyn DeviceContext) {
        if self.is_open() {
            return;
        }

        let position = dc.point_to_device(dc.current_position());
        log::debug!("begin path at {:?}", position);
        self.state = State::Open(PathRecorder::new(position));
    }

    /// Stops recording and keeps the path for a terminal operation.
    pub fn end(&mut self) -> Result<(), PathError> {
        match core::mem::replace(&mut self.state, State::Closed(None)) {
            State::Open(recorder) => {
                let path = recorder.into_path();
                log::debug!("end path with {} vertices", path.len());
                self.state = State::Closed(Some(path));
                Ok(())
            }
            closed => {
                self.state = closed;
                Err(PathError::NoOpenPath)
            }
        }
    }

    /// Discards the open or finished path.
    pub fn abort(&mut self) {
        log::debug!("abort path");
        self.state = State::Closed(None);
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        match self.state {
            State::Open(_) => true,
            State::Closed(_) => false,
        }
    }

    /// The recorder of the open path.
    pub fn recorder(&mut self) -> Result<&mut PathRecorder, PathError> {
        match &mut self.state {
            State::Open(recorder) => Ok(recorder),
            State::Closed(_) => Err(PathError::NoOpenPath),
        }
    }

    /// Where the primitives drawn now should go.
    pub fn mode<'l, S: DeviceSink>(&'l mut self, sink: &'l mut S) -> ContextMode<'l, S> {
        match &mut self.state {
            State::Open(recorder) => ContextMode::Recording(recorder),
            State::Closed(_) => ContextMode::Direct(sink),
        }
    }

    /// Draws a primitive, recording it if a path is open.
    pub fn draw<S: DeviceSink>(
        &mut self,
        sink: &mut S,
        dc: &dyn DeviceContext,
        primitive: &Primitive,
    ) -> Result<(), PathError> {
        self.mode(sink).draw(dc, primitive)
    }

    /// Copies the whole path state, including an open recording.
    pub fn save(&self) -> Result<PathSnapshot, PathError> {
        let state = match &self.state {
            State::Open(recorder) => State::Open(recorder.try_clone()?),
            State::Closed(Some(path)) => State::Closed(Some(path.try_clone()?)),
            State::Closed(None) => State::Closed(None),
        };

        Ok(PathSnapshot(state))
    }

    /// Returns to a saved path state.
    pub fn restore(&mut self, snapshot: PathSnapshot) {
        log::debug!("restore path state (open: {})", matches!(snapshot.0, State::Open(_)));
        self.state = snapshot.0;
    }

    /// The finished path.
    pub fn path(&self) -> Result<&PathBuffer, PathError> {
        match &self.state {
            State::Closed(Some(path)) => Ok(path),
            _ => Err(PathError::NoOpenPath),
        }
    }

    fn finished_path_mut(&mut self) -> Result<&mut PathBuffer, PathError> {
        match &mut self.state {
            State::Closed(Some(path)) => Ok(path),
            _ => Err(PathError::NoOpenPath),
        }
    }

    /// Replaces the curves of the finished path with lines.
    pub fn flatten_path(&mut self) -> Result<(), PathError> {
        let path = self.finished_path_mut()?;
        *path = flatten_path(path)?;
        log::debug!("flattened path has {} vertices", path.len());

        Ok(())
    }

    /// Replaces the finished path with its outline when stroked with the pen of the
    /// context.
    pub fn widen_path(&mut self, dc: &dyn DeviceContext) -> Result<(), PathError> {
        let path = self.finished_path_mut()?;
        *path = tessellation::widen_path(path, &dc.pen())?;
        log::debug!("widened path has {} vertices", path.len());

        Ok(())
    }

    /// Converts the finished path into a region with the fill rule of the context. The
    /// path is consumed, even if the conversion fails.
    pub fn path_to_region<S: RegionSink>(
        &mut self,
        dc: &dyn DeviceContext,
        sink: &mut S,
    ) -> Result<S::Region, RegionError<S::Error>> {
        let path = self.take_path()?;
        tessellation::path_to_region(&path, dc.fill_rule(), sink)
    }

    /// Takes the finished path out of the context, flattened.
    pub fn take_flat_path(&mut self) -> Result<PathBuffer, PathError> {
        let path = self.take_path()?;
        if path.has_curves() {
            return flatten_path(&path);
        }

        Ok(path)
    }

    fn take_path(&mut self) -> Result<PathBuffer, PathError> {
        match core::mem::replace(&mut self.state, State::Closed(None)) {
            State::Closed(Some(path)) => Ok(path),
            other => {
                self.state = other;
                Err(PathError::NoOpenPath)
            }
        }
    }
}

impl Default for PathContext {
    fn default() -> Self {
        PathContext::new()
    }
}
