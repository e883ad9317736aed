//! CLI for quintel — entropy, encryption, and signal intelligence.
//!
//! This binary is the transport layer the core deliberately excludes: it
//! parses flags, base64-encodes ciphertexts for the text boundary, prints
//! reports, and maps every [`quintel_core::CoreError`] to a message and a
//! non-zero exit code.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quintel")]
#[command(about = "quintel — quantum-inspired numeric compute core")]
#[command(version = quintel_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic entropy stream from a seed
    Entropy {
        /// Seed (integer; defaults to the documented fixed constant)
        #[arg(long)]
        seed: Option<String>,

        /// Number of values to generate
        #[arg(long, default_value_t = 32)]
        count: usize,

        /// Output kind: bytes or floats
        #[arg(long, default_value = "bytes", value_parser = ["bytes", "floats"])]
        kind: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a fresh encryption key (base64)
    Keygen,

    /// Encrypt data under a key; prints a base64 token
    Encrypt {
        /// Plaintext to encrypt
        data: String,

        /// Key as base64 (falls back to the QUINTEL_KEY environment variable)
        #[arg(long)]
        key: Option<String>,
    },

    /// Decrypt a base64 token produced by `encrypt`
    Decrypt {
        /// Base64 ciphertext token
        token: String,

        /// Key as base64 (falls back to the QUINTEL_KEY environment variable)
        #[arg(long)]
        key: Option<String>,
    },

    /// Predict a scalar from a single input value
    Predict {
        /// Input value
        value: f64,
    },

    /// Score a signal window for anomalies
    Analyze {
        /// Comma-separated samples, e.g. "1,2,3,4,100"
        data: String,

        /// Anomaly threshold (deviation score; defaults to 0.8)
        #[arg(long)]
        threshold: Option<f64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Normalize a signal window to unit norm
    Process {
        /// Comma-separated samples
        data: String,
    },

    /// Compute the aggregate intelligence score for a signal window
    Intelligence {
        /// Comma-separated samples
        data: String,

        /// Seed for a reproducible aggregate (unseeded runs use OS entropy)
        #[arg(long)]
        seed: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Entropy {
            seed,
            count,
            kind,
            json,
        } => commands::entropy::run(seed.as_deref(), count, &kind, json),
        Commands::Keygen => commands::crypt::keygen(),
        Commands::Encrypt { data, key } => commands::crypt::encrypt(&data, key.as_deref()),
        Commands::Decrypt { token, key } => commands::crypt::decrypt(&token, key.as_deref()),
        Commands::Predict { value } => commands::predict::run(value),
        Commands::Analyze {
            data,
            threshold,
            json,
        } => commands::signal::analyze(&data, threshold, json),
        Commands::Process { data } => commands::signal::process(&data),
        Commands::Intelligence { data, seed, json } => {
            commands::signal::intelligence(&data, seed.as_deref(), json)
        }
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}
