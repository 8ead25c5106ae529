use crate::error::FcfError;
use serde::Deserialize;
use std::fs;

/// Producer-specific parameters for decoding the binary files. The
/// register sizes and the stage record position are defined by the
/// version of the tool that wrote the files, not by the format itself,
/// so they are grouped here instead of being hard-coded in the decoders.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Size in bytes of each logical record of the mapcut file.
    pub mapcut_record_size: usize,
    /// Zero-based index of the mapcut logical record holding the stage
    /// structure, when the producer writes one.
    pub stage_record_index: usize,
    /// Size in bytes of each cut record. When `None`, the value decoded
    /// from the mapcut file is used.
    pub cut_record_size: Option<usize>,
    /// Upper bound on traversal steps over the cut chain. Guards
    /// against cyclic or malformed pointer chains.
    pub max_cuts: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            mapcut_record_size: 4096,
            stage_record_index: 4,
            cut_record_size: None,
            max_cuts: 100_000,
        }
    }
}

impl DecodeConfig {
    /// Reads a configuration from a JSON file. Missing fields take the
    /// documented defaults.
    pub fn from_file(filepath: &str) -> Result<Self, FcfError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|e| FcfError::io(filepath, e))?;
        let parsed: Self =
            serde_json::from_str(&contents).map_err(|e| FcfError::Config {
                path: filepath.to_owned(),
                source: e,
            })?;
        Ok(parsed)
    }
}
