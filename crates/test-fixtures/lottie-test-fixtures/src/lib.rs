//! Shared JSON fixtures (engine configs, player options) for tests and benches.
//!
//! Fixtures live under `fixtures/` at the workspace root and are looked up by
//! name through `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    configs: HashMap<String, String>,
    #[serde(rename = "player-options")]
    player_options: HashMap<String, OptionsEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionsEntry {
    Path(String),
    Detailed { path: String },
}

impl OptionsEntry {
    fn as_path(&self) -> &str {
        match self {
            OptionsEntry::Path(path) => path,
            OptionsEntry::Detailed { path } => path,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Interactivity engine configs (`{ mode, actions, ... }`).
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }
}

/// Player option blobs (`{ autoplay, loop, direction, initial_segment }`).
pub mod player_options {
    use super::*;

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.player_options, "player options", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.player_options, "player options", name)?;
        super::load_json(entry.as_path())
    }
}
