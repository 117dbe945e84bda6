//! Snapshot input sources.
//!
//! The snapshot document comes from a file path or from piped stdin; it is
//! read whole, once.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

/// Where the snapshot document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file on disk.
    File(PathBuf),
    /// Piped standard input.
    Stdin,
}

impl InputSource {
    /// Read the whole document.
    ///
    /// # Errors
    ///
    /// `InputError::FileNotFound` for a missing file, `InputError::Io` for
    /// any other read failure.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                Ok(std::fs::read_to_string(path)?)
            }
            InputSource::Stdin => read_all(std::io::stdin().lock()),
        }
    }
}

/// Read everything from `reader` as UTF-8.
pub fn read_all(mut reader: impl Read) -> Result<String, InputError> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Pick the input source.
///
/// 1. A file path, when given.
/// 2. Stdin, when it is piped.
/// 3. Otherwise `InputError::NoInput`: reading would block on a terminal.
///
/// # Errors
///
/// `InputError::NoInput` when no file is given and stdin is a TTY.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
