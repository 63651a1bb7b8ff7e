//! Host hook payload handling.
//! A scaffolding host writes a JSON document describing the generation run
//! to the post-generation hook's stdin.

use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Payload written by the host to the hook's stdin.
#[derive(Debug, Deserialize, PartialEq)]
pub struct HookInput {
    /// Template root the project was generated from
    pub template_dir: Option<PathBuf>,
    /// Directory the project was generated into
    pub output_dir: Option<PathBuf>,
    /// Answers collected by the host; unused by this hook
    #[serde(default)]
    pub context: serde_json::Value,
}

/// Parses a hook payload. Blank input means the host sent nothing.
pub fn parse_hook_input(raw: &str) -> Result<Option<HookInput>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| Error::HookInputError(format!("failed to parse stdin as JSON: {e}")))
}

/// Reads the whole of `reader` and parses it as a hook payload.
pub fn read_hook_input<R: Read>(mut reader: R) -> Result<Option<HookInput>> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    parse_hook_input(&buf)
}
