//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `orderflow_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use orderflow_core::User;

fn main() {
    println!("orderflow_core version={}", orderflow_core::core_version());
    println!(
        "sample_predicate valid={} \"a b\"={}",
        User::new("valid").is_orderable(),
        User::new("a b").is_orderable()
    );
}
