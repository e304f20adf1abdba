use crate::path::PathError;

use thiserror::Error;

/// The error type of `path_to_region`.
///
/// `E` is the error type of the region sink.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RegionError<E> {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("region construction failed: {0}")]
    Sink(E),
}

impl<E> RegionError<E> {
    /// The path error, if the failure did not come from the sink.
    pub fn path_error(&self) -> Option<PathError> {
        match self {
            RegionError::Path(err) => Some(*err),
            RegionError::Sink(_) => None,
        }
    }
}

#[test]
fn region_error_messages() {
    let err: RegionError<PathError> = PathError::NoOpenPath.into();
    assert_eq!(err.to_string(), "no open path");
    assert_eq!(err.path_error(), Some(PathError::NoOpenPath));

    let err: RegionError<&str> = RegionError::Sink("too complex");
    assert_eq!(err.to_string(), "region construction failed: too complex");
    assert_eq!(err.path_error(), None);
}
