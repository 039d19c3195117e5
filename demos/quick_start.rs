//! Basic serialization and deserialization of typed structs.
//!
//! Run with: cargo run --example quick_start

use serde::{Deserialize, Serialize};
use serde_yamlite::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    active: bool,
    tags: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let server = Server {
        host: "example.com".to_string(),
        port: 8080,
        active: true,
        tags: vec!["production".to_string(), "eu-west".to_string()],
    };

    // Serialize to the indented text form
    let text = to_string(&server)?;
    println!("Document:\n{}", text);

    // Deserialize back to the struct
    let server_back: Server = from_str(&text)?;
    assert_eq!(server, server_back);
    println!("✓ Round-trip successful");

    // Decode errors carry the 1-based line number
    match from_str::<Server>("host: example.com\n    port: 8080\n") {
        Err(e) => println!("✓ Malformed input rejected: {}", e),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
