use std::collections::TryReserveError;

use thiserror::Error;

/// The error type of the path engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum PathError {
    /// The vertex storage could not grow.
    #[error("not enough memory to grow the path")]
    OutOfMemory,
    /// The operation requires a path that is being recorded or has been completed.
    #[error("no open path")]
    NoOpenPath,
    /// A sequence of point types does not describe valid path segments.
    #[error("malformed point type sequence")]
    MalformedSequence,
    /// The pen or the stroke parameters cannot be widened.
    #[error("unsupported pen")]
    Unsupported,
    /// A count or a parameter is out of range.
    #[error("invalid parameter")]
    InvalidParameter,
}

impl From<TryReserveError> for PathError {
    fn from(_: TryReserveError) -> Self {
        PathError::OutOfMemory
    }
}

#[test]
fn reserve_failure_maps_to_out_of_memory() {
    let mut v: Vec<u64> = Vec::new();
    let err = v.try_reserve(usize::MAX).unwrap_err();
    assert_eq!(PathError::from(err), PathError::OutOfMemory);
    assert_eq!(PathError::NoOpenPath.to_string(), "no open path");
}
