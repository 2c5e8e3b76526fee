//! Reading move lists and writing maze snapshots

use std::fs;
use std::path::Path;

use crate::{MazeSnapshot, MAX_MOVES};

/// Largest moves file we are willing to read
pub const MAX_MOVES_FILE_BYTES: u64 = 10_000_000;

pub fn save_snapshot(snapshot: &MazeSnapshot, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MazeSnapshot, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let snapshot: MazeSnapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}

/// Load a JSON array of numeric moves (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST)
pub fn load_moves(path: impl AsRef<Path>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let path = path.as_ref();

    // Validate file size before reading it into memory
    if fs::metadata(path)?.len() > MAX_MOVES_FILE_BYTES {
        return Err("Moves file is too large (max 10MB)".into());
    }

    let json = fs::read_to_string(path)?;
    let moves: Vec<u8> = serde_json::from_str(&json)?;

    if moves.is_empty() {
        return Err("Moves array is empty".into());
    }

    if moves.len() > MAX_MOVES {
        return Err(format!("Too many moves: {} (max {})", moves.len(), MAX_MOVES).into());
    }

    Ok(moves)
}
