use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::FORTUNA_DIR;
use crate::models::Wheel;
use crate::store::Store;

/// Creates `.fortuna/` in the current directory with the stock wheel.
pub fn run() -> Result<()> {
    let fortuna_dir = PathBuf::from(FORTUNA_DIR);

    if fortuna_dir.exists() {
        println!("Fortuna already initialized in {}", fortuna_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&fortuna_dir).context("Failed to create .fortuna directory")?;
    Store::init(&fortuna_dir, Wheel::seeded())?;

    println!("Initialized fortuna in {}", fortuna_dir.display());
    Ok(())
}
