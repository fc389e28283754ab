//! Example printing the secrets a session seed produces.
//!
//! # Usage
//!
//! Generate secrets from a random seed:
//!
//! ```sh
//! cargo run --example generate_secrets
//! ```
//!
//! Reproduce a session from its seed:
//!
//! ```sh
//! cargo run --example generate_secrets -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Print several sonar patterns derived from the same seed:
//!
//! ```sh
//! cargo run --example generate_secrets -- --sonar-samples 4
//! ```

use clap::Parser;
use subcontrols_core::Cell;
use subcontrols_generator::{SecretGenerator, SecretSeed, SonarSecret};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Session seed as 64 hex digits. Random when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<SecretSeed>,

    /// Number of sonar patterns to print.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    sonar_samples: usize,
}

fn main() {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(SecretSeed::random);
    let generator = SecretGenerator::new();

    println!("Seed:");
    println!("  {seed}");
    println!();

    let code = generator.generate_code_with_seed(seed.derive("control-unlock"));
    println!("Code:");
    println!("  {} (keyword {})", code.code, code.keyword);
    println!();

    for i in 0..args.sonar_samples {
        let sonar = generator.generate_sonar_with_seed(seed.derive(&format!("sonar-{i}")));
        print_sonar(&sonar);
    }

    let riddle = generator.generate_riddle_with_seed(seed.derive("navigation"));
    println!("Riddle:");
    println!("  {}", riddle.riddle.prompt());
    println!("  answers: {}", riddle.riddle.answers().join(", "));
}

fn print_sonar(secret: &SonarSecret) {
    let target = &secret.target;
    let size = target.size().get();
    println!(
        "Sonar ({}, {} turn(s), flip h={}, v={}):",
        secret.shape.name(),
        secret.transform.quarter_turns(),
        secret.transform.flip_horizontal(),
        secret.transform.flip_vertical()
    );
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| {
                if target.cells().contains(Cell::new(row, col)) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("  {line}  {}", target.row_target(row));
    }
    let cols: Vec<_> = target.col_targets().iter().map(u8::to_string).collect();
    println!("  {}", cols.join(""));
    println!();
}
