use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

pub const DEFAULT_FILE: &str = "openbigfile.xlsx";
pub const K_ROW: u32 = 5000;
pub const K_COLUMN: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub path: PathBuf,
    // exclusive upper bounds of the generated grid
    pub rows: u32,
    pub columns: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            rows: K_ROW,
            columns: K_COLUMN,
        }
    }
}

impl BenchConfig {
    /// `xlsxbench [PATH]`
    pub fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let _exe = args.next();

        let mut config = Self::default();
        if let Some(path) = args.next() {
            config.path = PathBuf::from(path);
        }
        if let Some(extra) = args.next() {
            bail!("unexpected argument: {}", extra.to_string_lossy());
        }
        Ok(config)
    }
}
