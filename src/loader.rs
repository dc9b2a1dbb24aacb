//! Bytecode file loading.
//!
//! A bytecode file is a raw byte sequence with no header or magic number;
//! execution starts at its first byte. The file is memory-mapped for the
//! read and copied out, since the VM relocates the image into its own
//! memory anyway.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use memmap2::Mmap;

/// Read a bytecode file into a byte buffer.
pub fn load_program(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open bytecode file {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map bytecode file {}", path.display()))?;

    if mmap.is_empty() {
        bail!("Bytecode file {} is empty", path.display());
    }

    log::info!("Loaded {} bytes from {}", mmap.len(), path.display());
    Ok(mmap.to_vec())
}
