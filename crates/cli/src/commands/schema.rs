//! Schema export command.
//!
//! Prints the product schema as JSON in the shape the studio expects, so the
//! Rust definition stays the single source of truth for the content model.

use driftwood_core::schema::product_schema;

/// Print the product schema to stdout.
#[allow(clippy::print_stdout)]
pub fn print(pretty: bool) -> Result<(), serde_json::Error> {
    let schema = product_schema();

    let json = if pretty {
        serde_json::to_string_pretty(&schema)?
    } else {
        serde_json::to_string(&schema)?
    };

    println!("{json}");
    Ok(())
}
