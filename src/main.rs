//! Stardrift CLI
//!
//! Generates the particle fields for a portfolio page snapshot and prints
//! the resulting markup or the generated particle values.
//!
//! ```sh
//! stardrift --width 1440 --flag show-skills-stars
//! stardrift --format json --seed 7 --resize 800 --resize 1600
//! RUST_LOG=stardrift=debug stardrift --watch
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
