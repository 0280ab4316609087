use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocfillError {
    // Template retrieval errors
    #[error("FETCH_FAILED: could not fetch template '{path}': {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("TEMPLATE_NOT_FOUND: no template matches '{0}'")]
    TemplateNotFound(String),

    #[error("NO_TEMPLATE_SELECTED: select a template before filling or generating")]
    NoTemplateSelected,

    // Container errors
    #[error("UNPACK_FAILED: {0}")]
    UnpackFailed(String),

    // Form errors
    #[error("VALIDATION_FAILED: please fill in all fields. Missing: {}", .fields.join(", "))]
    ValidationFailed { fields: Vec<String> },

    #[error("UNKNOWN_FIELD: template has no field named '{0}'")]
    UnknownField(String),

    #[error("NOT_A_DATE_FIELD: field '{0}' is not a date field")]
    NotADateField(String),

    #[error("INVALID_DATE_FORMAT: unknown date format '{0}'")]
    InvalidDateFormat(String),

    #[error("INVALID_DECIMAL_PLACES: {0} is outside 0..=5")]
    InvalidDecimalPlaces(u8),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for DocfillError {
    fn from(err: serde_json::Error) -> Self {
        DocfillError::Generic(format!("JSON error: {}", err))
    }
}

impl From<zip::result::ZipError> for DocfillError {
    fn from(err: zip::result::ZipError) -> Self {
        DocfillError::UnpackFailed(err.to_string())
    }
}

impl From<quick_xml::Error> for DocfillError {
    fn from(err: quick_xml::Error) -> Self {
        DocfillError::UnpackFailed(format!("malformed document body: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DocfillError>;
