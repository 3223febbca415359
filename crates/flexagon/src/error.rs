//! Error type for the template pipeline.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. Every fallible step in
//! the pipeline returns `Result<T, FlexagonError>` and bubbles failures up
//! with `?`. `thiserror` writes the `Display` and `Error` impls for us.

use std::path::PathBuf;

/// Everything that can stop a template from being produced.
///
/// There is no partial-success mode: any of these aborts the run before
/// an output file is written (or, for `Write`, while writing it).
#[derive(Debug, thiserror::Error)]
pub enum FlexagonError {
    /// Wrong number of sources, a zero face width, a non-square face,
    /// or a source too small to carry a hexagon.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A source image could not be opened or decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A triangle or rotated wedge came out with an empty bounding box,
    /// or the layout tried to use a wedge that is not available.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The finished template could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FlexagonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = FlexagonError::InvalidInput("expected 3 images, got 2".to_string());
        assert_eq!(err.to_string(), "invalid input: expected 3 images, got 2");

        let err = FlexagonError::DegenerateGeometry("wedge 3 is empty".to_string());
        assert!(err.to_string().starts_with("degenerate geometry"));
    }

    #[test]
    fn decode_error_includes_path() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = FlexagonError::Decode {
            path: PathBuf::from("faces/one.png"),
            source,
        };
        assert!(err.to_string().contains("faces/one.png"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
