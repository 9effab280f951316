//! CLI interface for pktdecode
//!
//! Argument parsing, frame input, and the layer-by-layer walk that chains
//! the header decoders together.

pub mod args;
pub mod constants;
pub mod dissect;
pub mod error;
pub mod input;

pub use args::{Cli, Commands, LinkLayer};
pub use dissect::{dissect, Dissection, LayerReport, Stop};
pub use error::{CliError, Result};

/// Execute a parsed command, writing the report to stdout
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Decode {
            hex,
            file,
            link,
            len,
        } => {
            let frame = match (hex, file) {
                (Some(text), _) => input::parse_hex(text)?,
                (None, Some(path)) => input::read_file(path)?,
                (None, None) => return Err(CliError::EmptyInput),
            };
            let declared = len.unwrap_or(frame.len());

            let result = dissect(&frame, declared, (*link).into());
            println!("{}", result);

            match result.error() {
                Some((layer, err)) => Err(CliError::Decode {
                    layer,
                    source: err.clone(),
                }),
                None => Ok(()),
            }
        }
        Commands::Constants => {
            print!("{}", constants::render());
            Ok(())
        }
    }
}
