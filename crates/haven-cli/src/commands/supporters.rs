use anyhow::{Context, Result};
use haven_core::supporter::{Profession, Supporter};
use std::path::Path;
use std::str::FromStr;

pub fn run(config_dir: Option<&Path>, profession: Option<&str>) -> Result<()> {
    let ctx = super::bootstrap(config_dir, true)?;
    let filter = profession
        .map(|p| Profession::from_str(p).with_context(|| format!("Unknown profession: {p}")))
        .transpose()?;

    let listed: Vec<&Supporter> = ctx
        .connections
        .supporters()
        .iter()
        .filter(|s| filter.is_none_or(|p| s.profession == p))
        .collect();

    if listed.is_empty() {
        println!("No supporters found.");
        return Ok(());
    }

    for supporter in listed {
        println!(
            "{} [{}] {} ({:.1}, {} reviews, replies {})",
            supporter.name,
            supporter.id,
            supporter.profession.label(),
            supporter.rating,
            supporter.reviews,
            supporter.response_time
        );
        println!("    {}", supporter.specializations.join(", "));
    }
    Ok(())
}
