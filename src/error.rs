use thiserror::Error;

/// Errors that abort a decode call. Anomalies in the binary content
/// itself (truncated records, bad pointers, short coefficient vectors)
/// never surface here: they degrade to partial results with a warning,
/// since the producing tool is an external batch process.
#[derive(Debug, Error)]
pub enum FcfError {
    /// A caller-supplied record size that cannot hold the four header
    /// integers plus at least one 64-bit coefficient. Raised before
    /// any file is opened.
    #[error(
        "invalid cut record size {record_size}: must be 16 + 8k bytes with k >= 1"
    )]
    InvalidRecordSize { record_size: usize },

    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FcfError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}
