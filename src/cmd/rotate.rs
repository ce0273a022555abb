use anyhow::Result;

use devprint::Config;

use super::open_manager;

pub async fn cmd_regenerate(config: &Config, email: &str) -> Result<()> {
    let mut manager = open_manager(config).await?;
    let fresh = manager.regenerate_fingerprint(email)?;
    manager.flush().await?;

    println!("🎭 New fingerprint for {email}");
    println!("   Device: {}", fresh.device_id);
    println!("   UA: {}", fresh.user_agent);
    Ok(())
}

pub async fn cmd_restore(config: &Config, email: &str, index: usize) -> Result<()> {
    let mut manager = open_manager(config).await?;
    let restored = manager.restore_fingerprint(email, index)?;
    manager.flush().await?;

    println!("♻️  Restored fingerprint for {email}");
    println!("   Device: {}", restored.device_id);
    println!("   UA: {}", restored.user_agent);
    Ok(())
}
