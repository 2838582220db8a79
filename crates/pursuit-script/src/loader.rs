//! CSV script loader.
//!
//! # CSV format
//!
//! One row per waypoint, in drawing order.  Lines starting with `#` are
//! ignored and fields may be padded with spaces.
//!
//! ```csv
//! x,y
//! -2,-2
//! 1,11
//! 1,8
//! -1,-1
//! 1,3
//! ```
//!
//! The sentinel pairs `-2,-2` (pen up) and `-1,-1` (pen down) become
//! instructions; every other row is a goal.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ScriptError, WaypointScript};

#[derive(Deserialize)]
struct WaypointRecord {
    x: f64,
    y: f64,
}

/// Load a script from a CSV file.
pub fn load_script_csv(path: &Path) -> Result<WaypointScript, ScriptError> {
    let file = std::fs::File::open(path).map_err(ScriptError::Io)?;
    load_script_reader(file)
}

/// Like [`load_script_csv`] but accepts any `Read` source.
pub fn load_script_reader<R: Read>(reader: R) -> Result<WaypointScript, ScriptError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for result in csv_reader.deserialize::<WaypointRecord>() {
        let row = result.map_err(|e| ScriptError::Parse(e.to_string()))?;
        pairs.push((row.x, row.y));
    }

    WaypointScript::from_pairs(&pairs)
}
