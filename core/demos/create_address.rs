//! Create one address and print what comes back.
//!
//! ```text
//! LOB_API_KEY=test_... cargo run -p lob-core --example create_address
//! ```
//!
//! Point `LOB_BASE_URL` at `http://127.0.0.1:3000/v1` to run against the
//! mock server instead of Lob.

use lob_core::{AddressRequest, Config, LobClient};
use tracing_subscriber::EnvFilter;

fn main() -> lob_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = LobClient::new(Config::from_env()?);

    let address = AddressRequest {
        name: Some("Lobster Test".to_string()),
        email: Some("lobtest@example.com".to_string()),
        phone: Some("5555555555".to_string()),
        address_line1: Some("1005 W Burnside St".to_string()),
        address_city: Some("Portland".to_string()),
        address_state: Some("OR".to_string()),
        address_zip: Some("97209".to_string()),
        address_country: Some("US".to_string()),
        ..Default::default()
    };
    println!("{address:#?}");

    match client.addresses().create(&address) {
        Ok(created) => println!("{created:#?}"),
        Err(err) => eprintln!("Error: {err}"),
    }
    Ok(())
}
