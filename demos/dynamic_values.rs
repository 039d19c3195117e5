//! Working with dynamic documents: the yaml! macro, Value trees, and
//! custom indentation.
//!
//! Run with: cargo run --example dynamic_values

use serde_yamlite::{decode, encode, encode_with_options, yaml, YamlOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document without a struct definition
    let doc = yaml!({
        "name": "pipeline",
        "steps": ["build", "test", "deploy"],
        "limits": {
            "retries": 3,
            "timeout": 2.5
        }
    });

    println!("Default 2-space indent:\n{}", encode(&doc)?);

    let options = YamlOptions::new().with_indent(4);
    println!("4-space indent:\n{}", encode_with_options(&doc, &options)?);

    // Decode arbitrary input and inspect it
    let parsed = decode("a: 1\nb:\n  c: two words\n")?;
    println!(
        "b.c = {:?}",
        parsed.get("b").and_then(|v| v.get("c")).and_then(|v| v.as_str())
    );

    // Re-encoding a decoded document is byte-stable
    let text = encode(&doc)?;
    assert_eq!(encode(&decode(&text)?)?, text);
    println!("✓ Re-encoding is idempotent");

    Ok(())
}
