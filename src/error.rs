use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoverError {
    #[error("go version '{0}' is not available for download")]
    VersionNotAvailable(String),

    #[error("go version '{0}' is not installed")]
    NotInstalled(String),

    #[error("failed to fetch release listing: {0}")]
    Fetch(String),

    #[error("failed to parse release listing: {0}")]
    Parse(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to extract archive: {0}")]
    Extract(String),

    #[error("environment store error: {0}")]
    EnvStore(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, GoverError>;

pub fn get_exit_code(error: &GoverError) -> i32 {
    match error {
        GoverError::InvalidConfig(_) => 2,

        GoverError::NotInstalled(_) => 4,

        GoverError::Fetch(_) | GoverError::Http(_) | GoverError::VersionNotAvailable(_) => 20,

        _ => 1,
    }
}

/// Render an error with its full `source()` chain, one cause per line.
pub fn format_error_chain(error: &GoverError) -> String {
    let mut output = format!("Error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        output.push_str(&format!("\n  Caused by: {cause}"));
        source = cause.source();
    }

    output
}
