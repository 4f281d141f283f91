//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log lines use the compact format and hide the module prefix (`with_target(false)`);
//! the structured fields (`entity_type`, `attribute`, `id`) carry the context instead.
//! Verbosity comes from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Copier calls**: a span per `hydrate` call with the source and destination types
//! - **References**: every reference captured by the input copier, and every resolution
//! - **Attributes**: each copied attribute at `trace` level
//! - **Ignored input**: undeclared attributes and unknown copier kinds at `warn` level
//!
//! ## Usage Examples
//!
//! ```bash
//! # Summary per call
//! RUST_LOG=debug cargo run
//!
//! # Every attribute written
//! RUST_LOG=trace cargo run
//!
//! # Only this crate
//! RUST_LOG=dto_hydrator=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a dehydration that captures a reference reads:
//!
//! ```text
//! DEBUG hydrate{source="OrderInput" destination="Order"}: Input hydration keys=3
//! DEBUG hydrate{source="OrderInput" destination="Order"}: Capturing reference entity_type="Customer" id=3 attribute="customer"
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call it once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
