use anyhow::Result;
use std::path::Path;

pub async fn run(config_dir: Option<&Path>, text: &str) -> Result<()> {
    let ctx = super::bootstrap(config_dir, false)?;
    let classification = ctx.classifier.classify(text).await;
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}
