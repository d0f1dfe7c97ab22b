//! Runner configuration from environment variables and command-line flags.
//!
//! Environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `FALLING_BLOCKS_DATA` | Store file (default `falling-blocks.json`) |
//! | `FALLING_BLOCKS_SEED` | Piece sequence seed |
//! | `FALLING_BLOCKS_SHAPES` | Shape override file |
//! | `FALLING_BLOCKS_LOCK_DELAY_MS` | Lock delay in milliseconds |
//!
//! Flags override the environment: `--data <path>`, `--ephemeral` (keep
//! nothing on disk), `--seed <n>`, `--shapes <path>`, `--lock-delay <ms>`,
//! `--fixed-speed`.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::LOCK_DELAY_MS;

pub const DEFAULT_DATA_FILE: &str = "falling-blocks.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Store file; `None` keeps everything in memory
    pub data_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub shapes_path: Option<PathBuf>,
    pub lock_delay_ms: u32,
    /// Forces the dynamic speed setting instead of the saved preference
    pub dynamic_speed: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            seed: None,
            shapes_path: None,
            lock_delay_ms: LOCK_DELAY_MS,
            dynamic_speed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values are
    /// reported and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = get("FALLING_BLOCKS_DATA") {
            config.data_path = Some(PathBuf::from(path));
        }
        if let Some(path) = get("FALLING_BLOCKS_SHAPES") {
            config.shapes_path = Some(PathBuf::from(path));
        }
        if let Some(v) = get("FALLING_BLOCKS_SEED") {
            match v.parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => eprintln!("[Config] ignoring invalid FALLING_BLOCKS_SEED: {}", v),
            }
        }
        if let Some(v) = get("FALLING_BLOCKS_LOCK_DELAY_MS") {
            match v.parse() {
                Ok(ms) => config.lock_delay_ms = ms,
                Err(_) => eprintln!("[Config] ignoring invalid FALLING_BLOCKS_LOCK_DELAY_MS: {}", v),
            }
        }
        config
    }

    /// Apply command-line flags (program name already stripped).
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--data" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --data"))?;
                    self.data_path = Some(PathBuf::from(v));
                }
                "--ephemeral" => self.data_path = None,
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = Some(
                        v.parse::<u32>()
                            .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                    );
                }
                "--shapes" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --shapes"))?;
                    self.shapes_path = Some(PathBuf::from(v));
                }
                "--lock-delay" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --lock-delay"))?;
                    self.lock_delay_ms = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --lock-delay value: {}", v))?;
                }
                "--fixed-speed" => self.dynamic_speed = Some(false),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }
}
