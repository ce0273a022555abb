use anyhow::Result;

use devprint::Config;

use super::open_manager;

pub async fn cmd_list(config: &Config) -> Result<()> {
    let manager = open_manager(config).await?;
    let accounts = manager.all_accounts();

    if accounts.is_empty() {
        eprintln!("No accounts in {}", manager.store().path().display());
        return Ok(());
    }

    for account in accounts {
        let device_id = account
            .fingerprint
            .as_ref()
            .map_or("-", |fp| fp.device_id.as_str());
        println!(
            "{}  {}  history: {}",
            account.email,
            device_id,
            account.fingerprint_history.len()
        );
    }
    Ok(())
}

pub async fn cmd_show(config: &Config, email: &str) -> Result<()> {
    let mut manager = open_manager(config).await?;
    let fingerprint = manager.ensure_fingerprint(email)?;
    println!("{}", serde_json::to_string_pretty(fingerprint)?);
    Ok(())
}

pub async fn cmd_history(config: &Config, email: &str) -> Result<()> {
    let manager = open_manager(config).await?;
    let history = manager.fingerprint_history(email)?;

    if history.is_empty() {
        println!("No fingerprint history for {email}");
        return Ok(());
    }

    for (index, entry) in history.iter().enumerate() {
        println!(
            "[{index}] {}  {}  retired {} ({})",
            entry.fingerprint.device_id,
            entry.fingerprint.user_agent,
            entry.retired_at.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.reason
        );
    }
    Ok(())
}

pub async fn cmd_headers(config: &Config, email: &str) -> Result<()> {
    let manager = open_manager(config).await?;
    for (name, value) in manager.headers(email)?.iter() {
        println!("{name}: {value}");
    }
    Ok(())
}
