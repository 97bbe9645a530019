//! Corpus I/O: JSON exports from the parser, and compressed snapshots.
//!
//! A corpus path may be
//! - a JSON file holding an array of type records or a single record,
//! - a directory of such `.json` files (walked recursively, gitignore-aware,
//!   loaded in path order),
//! - a snapshot written by [`save_snapshot`], recognized by its magic bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::{debug, info};

use crate::error::CallflowError;
use crate::model::TypeRecord;

/// Magic bytes identifying LZ4-compressed corpus snapshots.
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"CFLZ";

/// Conventional snapshot file extension.
pub const SNAPSHOT_EXTENSION: &str = "cfs";

// ─── Loading ─────────────────────────────────────────────────────────

/// Load a corpus from a JSON file, a directory of JSON files, or a snapshot.
pub fn load_corpus(path: &Path) -> Result<Vec<TypeRecord>, CallflowError> {
    if !path.exists() {
        return Err(CallflowError::InputNotFound(path.display().to_string()));
    }
    let start = Instant::now();

    let (types, files) = if path.is_dir() {
        let files = json_files_under(path);
        if files.is_empty() {
            return Err(CallflowError::NoInputFiles(path.display().to_string()));
        }
        let mut types = Vec::new();
        for file in &files {
            types.extend(load_json_file(file)?);
        }
        (types, files.len())
    } else if is_snapshot(path)? {
        (load_snapshot(path)?, 1)
    } else {
        (load_json_file(path)?, 1)
    };

    info!(
        input = %path.display(),
        files,
        types = types.len(),
        elapsed_ms = format_args!("{:.1}", start.elapsed().as_secs_f64() * 1000.0),
        "Corpus loaded"
    );
    Ok(types)
}

/// One JSON file: either `[TypeRecord, ...]` or a single `TypeRecord`.
pub fn load_json_file(path: &Path) -> Result<Vec<TypeRecord>, CallflowError> {
    let json_err = |source| CallflowError::Json {
        path: path.display().to_string(),
        source,
    };
    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader).map_err(json_err)?;

    let types = if value.is_array() {
        serde_json::from_value::<Vec<TypeRecord>>(value).map_err(json_err)?
    } else {
        vec![serde_json::from_value::<TypeRecord>(value).map_err(json_err)?]
    };
    debug!(file = %path.display(), types = types.len(), "Loaded corpus file");
    Ok(types)
}

/// `.json` files below `dir`, sorted so the corpus order is reproducible.
fn json_files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(dir)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    files
}

fn is_snapshot(path: &Path) -> Result<bool, CallflowError> {
    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == SNAPSHOT_MAGIC),
        // shorter than the magic: let the JSON parser report it
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ─── Snapshots ───────────────────────────────────────────────────────

/// Write `types` as magic bytes followed by an LZ4 frame of bincode.
pub fn save_snapshot(path: &Path, types: &[TypeRecord]) -> Result<(), CallflowError> {
    let start = Instant::now();
    let snapshot_err = |message: String| CallflowError::Snapshot {
        path: path.display().to_string(),
        message,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(SNAPSHOT_MAGIC)?;
    let mut encoder = lz4_flex::frame::FrameEncoder::new(writer);
    bincode::serialize_into(&mut encoder, types)
        .map_err(|e| snapshot_err(format!("serialization failed: {}", e)))?;
    let mut writer = encoder
        .finish()
        .map_err(|e| snapshot_err(format!("LZ4 finish failed: {}", e)))?;
    writer.flush()?;

    let size = std::fs::metadata(path)?.len();
    info!(
        output = %path.display(),
        types = types.len(),
        size_kb = format_args!("{:.1}", size as f64 / 1024.0),
        elapsed_ms = format_args!("{:.1}", start.elapsed().as_secs_f64() * 1000.0),
        "Snapshot saved"
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Vec<TypeRecord>, CallflowError> {
    let snapshot_err = |message: String| CallflowError::Snapshot {
        path: path.display().to_string(),
        message,
    };

    let mut reader = BufReader::new(File::open(path)?);
    let mut magic = [0u8; 4];
    let bad_magic = || snapshot_err("not a callflow snapshot (bad magic bytes)".to_string());
    match reader.read_exact(&mut magic) {
        Ok(()) if &magic == SNAPSHOT_MAGIC => {}
        Ok(()) => return Err(bad_magic()),
        // shorter than the magic itself
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Err(bad_magic()),
        Err(e) => return Err(snapshot_err(format!("read error (magic bytes): {}", e))),
    }

    let decoder = lz4_flex::frame::FrameDecoder::new(reader);
    bincode::deserialize_from(decoder).map_err(|e| snapshot_err(format!("LZ4 deserialization failed: {}", e)))
}
