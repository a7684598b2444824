use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hashnest::{HashConfig, Params};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod auth;

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem", env = "HASHNEST_ARGON_MEM")]
    mem_cost_kib: Option<u32>,

    /// Argon2 time cost / iterations (default: 1)
    #[arg(long = "argon-time", env = "HASHNEST_ARGON_TIME")]
    time_cost: Option<u32>,

    /// Argon2 parallelism (default: available CPUs)
    #[arg(long = "argon-parallelism", env = "HASHNEST_ARGON_PARALLELISM")]
    parallelism: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-len", env = "HASHNEST_KEY_LEN")]
    key_len: Option<u32>,

    /// Salt length in bytes (default: 16)
    #[arg(long = "salt-len", env = "HASHNEST_SALT_LEN")]
    salt_len: Option<usize>,
}

impl Argon2Args {
    fn to_hash_config(&self) -> Result<HashConfig> {
        let default = HashConfig::default();

        HashConfig::new(
            self.time_cost.unwrap_or(default.time_cost()),
            self.mem_cost_kib.unwrap_or(default.mem_cost_kib()),
            self.parallelism.unwrap_or(default.parallelism()),
            self.key_len.unwrap_or(default.key_len()),
            self.salt_len.unwrap_or(default.salt_len()),
        )
        .context("invalid Argon2 parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "hashnest")]
#[command(version, about = "Argon2id password hashing with PHC-style strings.")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the encoded string
    Hash {
        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Checks a password against an encoded hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Prints the parameters stored in an encoded hash
    #[command(arg_required_else_help = true)]
    Inspect { hash: String },
}

#[derive(Serialize)]
struct Inspection<'a> {
    algorithm: &'static str,
    version: u32,
    #[serde(flatten)]
    params: &'a Params,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Hash { argon2 } => {
            let config = argon2.to_hash_config()?;
            let password = auth::read_new_password()?;
            let encoded = hashnest::hash_with(&password, &config).context("hashing failed")?;
            println!("{encoded}");
        }
        Commands::Verify { hash } => {
            let password = auth::read_password()?;
            let matched = hashnest::verify_detailed(&password, hash.trim())
                .context("unable to verify password")?;
            if !matched {
                bail!("password does not match");
            }
            println!("match");
        }
        Commands::Inspect { hash } => {
            let (_, params) = hashnest::decode(hash.trim()).context("unable to decode hash")?;
            let inspection = Inspection {
                algorithm: hashnest::ALGORITHM,
                version: hashnest::VERSION,
                params: &params,
            };
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
    }

    Ok(())
}
