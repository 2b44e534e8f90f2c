use std::path::PathBuf;

/// A convenience alias for results returned by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building, sending or exporting reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The report form is missing a required field; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP request failed, timed out, returned a non-success status or an
    /// undecodable body.
    #[cfg(feature = "client")]
    #[error("reports API request failed")]
    Transport(#[from] reqwest::Error),

    /// The API configuration is unusable.
    #[error("invalid API configuration: {0}")]
    Config(String),

    /// The image staged for upload could not be read.
    #[error("could not read image {}", path.display())]
    Image {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The PDF document could not be produced.
    #[error("could not render PDF: {0}")]
    Pdf(String),
}

/// A required form field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No location was picked on the map.
    #[error("Please select a location on the map")]
    MissingLocation,
    /// No problem type was chosen.
    #[error("Please select a problem type")]
    MissingCategory,
}
