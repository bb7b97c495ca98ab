//! Catalog export.

use nexus_portal_admin::services::seed_products;

/// Render the launch catalog as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(compact: bool) -> Result<String, serde_json::Error> {
    let products = seed_products(chrono::Utc::now());
    if compact {
        serde_json::to_string(&products)
    } else {
        serde_json::to_string_pretty(&products)
    }
}

/// Print the launch catalog to stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
#[allow(clippy::print_stdout)]
pub fn run(compact: bool) -> Result<(), serde_json::Error> {
    println!("{}", render(compact)?);
    Ok(())
}
