// USAGE: run from a code directory <root>/code/xtra/<season>/RSR/<process>
//   icecap-get params
//   icecap-get pst 'MIS/*'
//   icecap-get pik MIS/JKB2e/Y35a --process pik1
// or pass --code-path <dir> from anywhere. RUST_LOG=debug for the details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use icecap_get::{cmp, flight, pik, pst, MetaFilter, Params};
use log::trace;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Code directory to derive the season from, instead of the working directory
    #[clap(long, global = true, parse(from_os_str))]
    code_path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the paths derived for the season
    Params,
    /// List PIK products and pick types for a PST
    Pik {
        pst: String,
        /// Process directory, defaults to the current one
        #[clap(long)]
        process: Option<String>,
    },
    /// List CMP radar products for a PST
    Cmp {
        pst: String,
        /// Process directory, defaults to the current one
        #[clap(long)]
        process: Option<String>,
        /// Drop exactly the `.meta` files instead of applying the historical glob
        #[clap(long)]
        strict_meta: bool,
    },
    /// List the season's PSTs matching a shell pattern
    Pst {
        #[clap(default_value = "*")]
        pattern: String,
    },
    /// Print the flight a PST belongs to
    Flight { pst: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    trace!("{args:?}");

    let params = match &args.code_path {
        Some(dir) => Params::from_code_path(dir),
        None => Params::from_cwd(),
    }
    .context("deriving season parameters")?;

    match args.command {
        Command::Params => {
            for (key, value) in params.entries() {
                println!("{key}\t{value}");
            }
        }
        Command::Pik { pst, process } => {
            let (products, piks) = pik(&params, &pst, process.as_deref())?;
            for (product, pik_type) in products.iter().zip(&piks) {
                println!("{product}\t{pik_type}");
            }
        }
        Command::Cmp {
            pst,
            process,
            strict_meta,
        } => {
            let filter = if strict_meta {
                MetaFilter::Suffix
            } else {
                MetaFilter::CharacterClass
            };
            for product in cmp(&params, &pst, process.as_deref(), filter)? {
                println!("{product}");
            }
        }
        Command::Pst { pattern } => {
            for name in pst(&params, &pattern)? {
                println!("{name}");
            }
        }
        Command::Flight { pst } => {
            println!("{}", flight(&params, &pst).with_context(|| format!("looking up {pst}"))?);
        }
    }
    Ok(())
}
