use std::path::Path;

use crate::error::{BidError, Result};
use crate::settings::{load_rates, save_rates};

pub fn run(rates: Option<&Path>, write: Option<&Path>) -> Result<()> {
    let rates = load_rates(rates)?;
    match write {
        Some(path) => {
            save_rates(&rates, path)?;
            println!("Wrote {}", path.display());
        }
        None => {
            let json =
                serde_json::to_string_pretty(&rates).map_err(|e| BidError::Rates(e.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}
