use thiserror::Error;

use crate::utils::shell::CmdError;

#[derive(Debug, Error)]
pub enum LvgError {
    #[error("no such file: {1}")]
    NoSuchFile(std::io::Error, String),

    #[error("file error: {1}: {0}")]
    FileError(std::io::Error, String),

    #[error("bad manifest: {0}")]
    BadManifest(String),

    #[error("shell command failed: {context}: {error}")]
    CmdFailed { error: CmdError, context: String },

    #[error("bad cli arguments: {0}")]
    BadArgs(String),

    #[error("lvg-rs bug: {0}")]
    LvgRsBug(String),
}
