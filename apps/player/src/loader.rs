//! Loading pairs from disk.
//!
//! `.json` files hold an array of `{ "word", "definition" }` objects, with an
//! optional `"id"`. Anything else is read as bulk `word - definition` lines.

use std::path::Path;

use match_core::{Pair, PairStore};
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct PairEntry {
    #[serde(default)]
    id: Option<String>,
    word: String,
    definition: String,
}

pub fn load_pairs(path: &Path) -> Result<Vec<Pair>> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pairs = if path.extension().is_some_and(|ext| ext == "json") {
        pairs_from_json(&content)?
    } else {
        pairs_from_bulk(&content)
    };
    tracing::info!(path = %path.display(), pairs = pairs.len(), "loaded pairs");
    Ok(pairs)
}

pub fn pairs_from_json(content: &str) -> Result<Vec<Pair>> {
    let entries: Vec<PairEntry> = serde_json::from_str(content)?;

    let mut store = PairStore::new();
    for entry in entries {
        match entry.id {
            Some(id) => store.insert(Pair {
                id,
                word: entry.word.trim().to_string(),
                definition: entry.definition.trim().to_string(),
            })?,
            None => {
                store.add(&entry.word, &entry.definition)?;
            }
        }
    }
    Ok(store.pairs().to_vec())
}

pub fn pairs_from_bulk(content: &str) -> Vec<Pair> {
    let mut store = PairStore::new();
    store.import_bulk(content);
    store.pairs().to_vec()
}
