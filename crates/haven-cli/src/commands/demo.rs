use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use haven_application::seed::DEMO_SUPPORTER_ID;
use haven_core::evidence::Platform;
use std::path::Path;

const SAMPLE_EVIDENCE: [(&str, Platform, i64); 3] = [
    ("I know where you live. You should be careful walking home.", Platform::Twitter, 72),
    ("Posted your address and phone number in the group chat lol", Platform::Whatsapp, 30),
    ("Nobody will believe you. Delete your account or else.", Platform::Instagram, 2),
];

pub async fn run(config_dir: Option<&Path>, offline: bool) -> Result<()> {
    let ctx = super::bootstrap(config_dir, offline)?;

    let survivor = ctx
        .identity
        .login("survivor@demo.com", "password")
        .await
        .context("Demo survivor login failed")?;
    println!("Signed in as {}", survivor.display_name());

    for (text, platform, hours_ago) in SAMPLE_EVIDENCE {
        let item = ctx
            .evidence
            .add_evidence(text, platform, Utc::now() - Duration::hours(hours_ago))
            .await;
        println!("Logged {} ({}) fingerprint {}", item.id, platform, item.fingerprint());
    }

    println!("Analyzing...");
    ctx.evidence.settled().await;
    for item in ctx.evidence.items().await {
        if let Some(classification) = &item.classification {
            println!(
                "  {} -> {} / {} ({:.2}): {}",
                item.id,
                classification.category,
                classification.severity,
                classification.confidence,
                classification.summary
            );
        }
    }
    println!(
        "High-severity items: {}",
        ctx.evidence.high_severity_count().await
    );

    let dossier = ctx
        .dossiers
        .create_dossier_with_metadata(ctx.evidence.items().await)
        .await;
    ctx.dossiers.settled().await;
    let dossier = ctx
        .dossiers
        .get(&dossier.id)
        .await
        .context("Dossier disappeared")?;
    println!("\nDossier: {} [{}]", dossier.title, dossier.severity);
    println!("  {}", dossier.description);
    if let Some(summary) = &dossier.ai_summary {
        println!("  Summary: {summary}");
    }

    let connection = ctx
        .connections
        .request_connection(DEMO_SUPPORTER_ID, "Hi, I'd like some help dealing with this.")
        .await?;
    println!("\nRequested connection {} ({})", connection.id, connection.status);

    ctx.identity.logout().await;
    let supporter = ctx.identity.login("sarah@clinic.com", "password").await?;
    let inbox = ctx.connections.connections_for(&supporter).await;
    println!("{} has {} request(s)", supporter.name, inbox.len());

    ctx.connections.accept(&connection.id).await?;
    ctx.connections
        .send_message(&connection.id, "Of course. Let's start with your safety plan.")
        .await?;

    let thread = ctx
        .connections
        .get(&connection.id)
        .await
        .context("Connection disappeared")?;
    println!("Connection {} is now {}", thread.id, thread.status);
    for message in &thread.messages {
        println!("  [{}] {}", message.sender_id, message.content);
    }

    ctx.identity.logout().await;
    Ok(())
}
