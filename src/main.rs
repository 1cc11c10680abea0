use clap::{Args, Parser, Subcommand};
use skein256::cli::{check_file, sum_files, SumOptions};
use skein256::{Config, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("SKEIN256_VERSION");
const BUILD: &str = env!("SKEIN256_BUILD");
const PROFILE: &str = env!("SKEIN256_PROFILE");
const GIT_HASH: &str = env!("SKEIN256_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH)
    })
}

#[derive(Parser)]
#[command(name = "skein256")]
#[command(author, about = "Skein-256 checksums with optional key, personalization and nonce", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Byte string given on the command line as hex
#[derive(Clone, Debug)]
struct HexBytes(Vec<u8>);

impl HexBytes {
    fn take(value: Option<HexBytes>) -> Vec<u8> {
        value.map(|h| h.0).unwrap_or_default()
    }
}

/// Skein configuration fields, given as hex
#[derive(Args)]
struct ConfigArgs {
    /// JSON file with hex-encoded config fields
    #[arg(long = "config")]
    config_file: Option<PathBuf>,

    /// MAC key
    #[arg(long, value_parser = parse_hex)]
    key: Option<HexBytes>,

    /// Personalization string
    #[arg(long, value_parser = parse_hex)]
    personal: Option<HexBytes>,

    /// Public key
    #[arg(long, value_parser = parse_hex)]
    public_key: Option<HexBytes>,

    /// Key identifier
    #[arg(long, value_parser = parse_hex)]
    key_id: Option<HexBytes>,

    /// Nonce
    #[arg(long, value_parser = parse_hex)]
    nonce: Option<HexBytes>,
}

impl ConfigArgs {
    /// Config file first, then flags on top
    fn resolve(self) -> Result<Config> {
        let base = match &self.config_file {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let flags = Config {
            key: HexBytes::take(self.key),
            personal: HexBytes::take(self.personal),
            public_key: HexBytes::take(self.public_key),
            key_id: HexBytes::take(self.key_id),
            nonce: HexBytes::take(self.nonce),
        };
        Ok(base.merge(flags))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print Skein-256 checksums
    #[command(alias = "s")]
    Sum {
        /// Digest size in bytes
        #[arg(long, default_value_t = 32)]
        size: usize,

        #[command(flatten)]
        config: ConfigArgs,

        /// Files to hash ("-" or none for standard input)
        files: Vec<PathBuf>,
    },

    /// Verify checksums from a list produced by `sum`
    #[command(alias = "c")]
    Check {
        #[command(flatten)]
        config: ConfigArgs,

        /// Checksum list
        list: PathBuf,
    },

    /// Print the resolved configuration as JSON
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn parse_hex(s: &str) -> std::result::Result<HexBytes, String> {
    hex::decode(s).map(HexBytes).map_err(|e| format!("{}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("skein256 {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Sum {
            size,
            config,
            files,
        } => config.resolve().and_then(|config| {
            let options = SumOptions { size, config };
            let stdin = [Path::new(skein256::cli::STDIN_NAME)];
            let owned: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
            let paths: &[&Path] = if owned.is_empty() { &stdin } else { &owned };

            sum_files(paths, &options).map(|output| {
                print!("{}", output);
                true
            })
        }),

        Commands::Check { config, list } => config.resolve().and_then(|config| {
            check_file(&list, &config).map(|report| {
                print!("{}", report);
                report.all_passed()
            })
        }),

        Commands::Config { config } => config
            .resolve()
            .and_then(|config| config.to_json())
            .map(|json| {
                println!("{}", json);
                true
            }),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
