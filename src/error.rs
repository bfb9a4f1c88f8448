use thiserror::Error;

/// A numeric parameter fell outside of its documented domain. Raised before any geometry
/// is computed or any output is written.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{parameter} {requirement} (got {value})")]
pub struct InvalidParameterError {
    /// Human-readable name of the offending parameter, e.g. "nib width"
    pub parameter: &'static str,
    pub value: f64,
    /// What the parameter must satisfy, e.g. "must be positive"
    pub requirement: &'static str,
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum SheetError {
    #[error(transparent)]
    /// A hand, image, page, or style parameter was out of range
    InvalidParameter(#[from] InvalidParameterError),

    #[error(transparent)]
    /// An I/O error occurred while writing or reading an artifact
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [usvg] failed to parse a drawing
    Svg(#[from] usvg::Error),

    #[error(transparent)]
    /// The paper table could not be read as tab-separated values
    Csv(#[from] csv::Error),

    #[error("paper table line {line}: {message}")]
    /// A record in the paper table was malformed
    PaperTable { line: u64, message: String },

    #[error("template {template:?} uses unknown key {{{key}}} (double '{{' and '}}' to escape them)")]
    /// A naming template referred to a key that isn't available
    Template { template: String, key: String },

    #[error("unrecognized unit {0:?}: must be one of mm, cm, in, pt, or pc")]
    UnknownUnit(String),

    #[error("unrecognized colour {0:?}: use #rgb, #rrggbb, black, grey, red, or blue")]
    UnknownColour(String),

    #[error("unrecognized grid position {0:?}: must be one of c, ul, ur, bl, or br")]
    UnknownGridPosition(String),
}
