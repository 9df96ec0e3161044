// `hostconnect secret`: generate a random secret for HOSTCONNECT_SECRET.

use colored::Colorize;
use rand::RngCore;

pub fn run() -> anyhow::Result<()> {
    let secret = generate_secret();

    println!();
    println!("Add the following to your environment:");
    println!();
    println!("{}", format!("HOSTCONNECT_SECRET={secret}").green());
    println!();

    Ok(())
}

/// 32 random bytes, hex encoded.
fn generate_secret() -> String {
    let mut buf = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostconnect_core::options::MIN_SECRET_LENGTH;

    #[test]
    fn secret_is_long_enough_for_options() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.len() >= MIN_SECRET_LENGTH);
        assert!(hostconnect_core::HostConnectOptions::new(secret).validate().is_ok());
    }

    #[test]
    fn secrets_differ() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
