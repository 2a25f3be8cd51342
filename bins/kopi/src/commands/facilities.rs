//! Facility vocabulary for the filter menu

use crate::Format;
use anyhow::Result;
use kopi_core::{config::Config, Error as CoreError};
use owo_colors::OwoColorize;

/// Print the distinct facilities across a user's recommended cafes
pub async fn run(user: Option<String>, config: &Config, format: Format) -> Result<()> {
    let mut view = super::orchestrator(config, user, None, config.schema.ranking.top_n)?;
    // the vocabulary does not depend on the position
    let _location = view.load().await.map_err(CoreError::from)?;

    let vocabulary = view.facility_vocabulary();
    match format {
        Format::Json => println!("{}", serde_json::to_string(&vocabulary)?),
        Format::Text => {
            for label in &vocabulary {
                println!("{} {}", "•".dimmed(), label);
            }
        }
    }
    Ok(())
}
