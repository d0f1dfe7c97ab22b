//! Shape table overrides from JSON.
//!
//! The file is an object mapping piece letters to 0/1 matrices:
//!
//! ```json
//! { "I": [[1, 1, 1, 1]], "O": [[1, 1], [1, 1]] }
//! ```
//!
//! The file replaces the whole table. Kinds it does not define, or defines
//! with an invalid matrix, spawn as a single cell.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{Shape, ShapeSet};
use crate::types::PieceKind;

pub fn load_shape_set(path: &Path) -> Result<ShapeSet> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_shape_set(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_shape_set(text: &str) -> Result<ShapeSet> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(text)?;
    let mut set = ShapeSet::empty();

    for (name, value) in raw {
        let Some(kind) = PieceKind::from_str(&name) else {
            eprintln!("[Store] unknown piece {:?} in shape file", name);
            continue;
        };
        let shape = serde_json::from_value::<Vec<Vec<u8>>>(value)
            .ok()
            .and_then(|rows| Shape::from_rows(rows.as_slice()));
        match shape {
            Some(shape) => set.set(kind, shape),
            None => eprintln!("[Store] invalid matrix for piece {}", kind.as_str()),
        }
    }

    for kind in set.missing() {
        eprintln!(
            "[Store] shape file has no usable shape for {}, it will spawn as a single cell",
            kind.as_str()
        );
    }

    Ok(set)
}
