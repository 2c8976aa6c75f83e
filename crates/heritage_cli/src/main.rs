//! Smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `heritage_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("heritage_core ping={}", heritage_core::ping());
    println!("heritage_core version={}", heritage_core::core_version());
}
