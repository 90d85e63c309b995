use std::path::Path;
use shared::types::IrSignal;
use crate::error::{Error, Result};

/// A signal loaded from disk.
///
/// The raw bytes are what gets sent to the device, so fields the device
/// understands but [`IrSignal`] does not model survive a load/post round trip.
#[derive(Debug, Clone)]
pub struct SignalFile {
    raw: Vec<u8>,
    signal: IrSignal,
}

impl SignalFile {
    pub fn signal(&self) -> &IrSignal {
        &self.signal
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }
}

/// Read a JSON signal file and check it has the IR signal shape.
pub fn read_signal(path: impl AsRef<Path>) -> Result<SignalFile> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let signal = serde_json::from_slice(&raw).map_err(|source| Error::Decode {
        origin: path.display().to_string(),
        source,
    })?;

    tracing::debug!("Loaded signal from {} ({} bytes)", path.display(), raw.len());
    Ok(SignalFile { raw, signal })
}

/// Serialize `signal` as JSON and write it to `path`, replacing any existing file.
pub fn write_signal(path: impl AsRef<Path>, signal: &IrSignal) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec(signal).map_err(Error::Encode)?;

    std::fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Saved signal to {}", path.display());
    Ok(())
}
