use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigureError>;

/// Everything that aborts a configure run before the Makefile is written.
#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error("Invalid option used: \"{0}\"")]
    UnknownOption(String),

    #[error("Option \"{0}\" requires a value")]
    MissingValue(String),

    #[error("No compiler executable configured for \"{0}\"")]
    UnknownCompiler(String),

    #[error("No catalog entry for platform \"{0}\"")]
    UnknownPlatform(String),

    /// A user supplied value that would corrupt the generated Makefile.
    #[error("{field} \"{value}\" cannot be used in a Makefile")]
    UnsafeValue { field: &'static str, value: String },

    #[error("Catalog unit \"{unit}\" does not end in \"{suffix}\"")]
    InvalidUnit { unit: String, suffix: String },

    #[error("Catalog has no common compilation units")]
    EmptyCatalog,

    #[error("Failed to parse catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("Failed to render template: {0}")]
    Template(#[from] tinytemplate::error::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigureError {
    /// Malformed invocations exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigureError::UnknownOption(_) | ConfigureError::MissingValue(_) => 2,
            _ => 1,
        }
    }
}
