use anyhow::Result;

use devprint::{Config, FingerprintFactory};

pub fn cmd_generate(config: &Config, count: usize) -> Result<()> {
    let mut factory = FingerprintFactory::new(config.product.clone())?;
    println!("🎭 Generating {count} device fingerprints:\n");

    for i in 0..count {
        let fp = factory.generate();
        println!("Fingerprint {}:", i + 1);
        println!("   Device: {}", fp.device_id);
        println!("   UA: {}", fp.user_agent);
        println!("   Api-Client: {}", fp.api_client);
        println!("   Quota-User: {}", fp.quota_user);
        println!();
    }
    Ok(())
}
