//! Error types for the filter-chain core.

use thiserror::Error;

/// Errors produced by chain validation, geometry setup, and image I/O.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Width or height was zero when creating a quad or pipeline.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An effect chain referenced a kernel name that is not in the set.
    #[error("unknown kernel: {0}")]
    UnknownKernel(String),

    /// The source image exceeds what the GPU can hold in one texture.
    #[error("image {width}x{height} exceeds the maximum texture size {max}")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    /// The source image could not be loaded or decoded.
    #[error("failed to load image '{path}': {reason}")]
    Load { path: String, reason: String },

    /// An I/O error (snapshot write, config read).
    #[error("{0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = FilterError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_kernel_includes_name() {
        let err = FilterError::UnknownKernel("gaussianBlur".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("gaussianBlur"),
            "expected message containing the kernel name, got: {msg}"
        );
    }

    #[test]
    fn image_too_large_includes_all_dimensions() {
        let err = FilterError::ImageTooLarge {
            width: 20000,
            height: 4,
            max: 16384,
        };
        let msg = format!("{err}");
        assert!(msg.contains("20000"), "missing width in: {msg}");
        assert!(msg.contains("16384"), "missing max in: {msg}");
    }

    #[test]
    fn load_error_includes_path_and_reason() {
        let err = FilterError::Load {
            path: "./image.jpg".into(),
            reason: "no such file".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("./image.jpg"), "missing path in: {msg}");
        assert!(msg.contains("no such file"), "missing reason in: {msg}");
    }

    #[test]
    fn filter_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterError>();
    }

    #[test]
    fn filter_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FilterError>();
    }
}
