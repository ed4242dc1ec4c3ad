use thiserror::Error;

/// A malformed port specification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("empty port specification")]
    Empty,
    #[error("empty item in port specification: {0:?}")]
    EmptyItem(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("port out of range: {0} (expected 0-65535)")]
    OutOfRange(String),
    #[error("invalid port range: {0}")]
    InvalidRange(String),
    #[error("invalid port range: {start}-{end} (start > end)")]
    ReversedRange { start: u16, end: u16 },
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no address found for {0}")]
    NoAddress(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("error writing to file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error encoding results as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure that stops a scan from starting or its results from being saved.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    PortSpec(#[from] PortSpecError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
