//! # Kasir
//!
//! Entry point of the `kasir` binary. All logic lives in `kasir_cli`.

use kasir_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    kasir_cli::run(Cli::parse_args())
}
