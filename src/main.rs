use clap::{Parser, Subcommand};
use fbscrypt::cli::{
    convert_batch, convert_value, format_digest, hash_file, hash_text, show_key, show_password,
    ConvertOptions, HashOptions, KeyOptions, KeySource,
};
use fbscrypt::field::FieldKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("FBSCRYPT_VERSION");
const BUILD: &str = env!("FBSCRYPT_BUILD");
const PROFILE: &str = env!("FBSCRYPT_PROFILE");
const GIT_HASH: &str = env!("FBSCRYPT_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH)
    })
}

#[derive(Parser)]
#[command(name = "fbscrypt")]
#[command(author, about = "Table key derivation and field decoding for obfuscated FlatBuffers tables", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the xxHash32 digest of a string or file
    #[command(alias = "h")]
    Hash {
        /// Text to hash (ignored with --file)
        #[arg(required_unless_present = "file")]
        text: Option<String>,

        /// Hash the contents of this file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Hash seed
        #[arg(long, default_value_t = 0)]
        seed: u32,
    },

    /// Derive the key for a table name
    #[command(alias = "k")]
    Key {
        /// Table name
        name: String,

        /// Key size in bytes (1 to 4096)
        #[arg(long, default_value_t = 8)]
        size: usize,
    },

    /// Derive the password for an archive name
    #[command(alias = "p")]
    Password {
        /// Archive file name
        name: String,
    },

    /// Decode a single field value
    #[command(alias = "c")]
    Convert {
        /// Field kind (int32, int64, uint32, uint64, ubyte, float32, float64, string)
        #[arg(value_parser = parse_kind)]
        kind: FieldKind,

        /// Stored value
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Derive the key from this table name
        #[arg(long, conflicts_with = "key")]
        table: Option<String>,

        /// Use this key (hex)
        #[arg(long)]
        key: Option<String>,
    },

    /// Decode a JSON array of field values
    #[command(alias = "b")]
    Batch {
        /// Input JSON file
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        output: Option<PathBuf>,

        /// Derive the key from this table name
        #[arg(long, conflicts_with = "key")]
        table: Option<String>,

        /// Use this key (hex)
        #[arg(long)]
        key: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<FieldKind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("fbscrypt {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Hash { text, file, seed } => {
            let options = HashOptions { seed };
            let digest = match (file, text) {
                (Some(path), _) => hash_file(&path, &options),
                (None, Some(text)) => hash_text(&text, &options),
                (None, None) => hash_text("", &options),
            };
            digest.map(|d| println!("{}", format_digest(d)))
        }

        Commands::Key { name, size } => {
            let options = KeyOptions { size };
            show_key(&name, &options).map(|key| println!("{}", key))
        }

        Commands::Password { name } => show_password(&name).map(|pw| println!("{}", pw)),

        Commands::Convert {
            kind,
            value,
            table,
            key,
        } => KeySource::from_args(table, key).and_then(|source| {
            let options = ConvertOptions { key: Some(source) };
            convert_value(kind, &value, &options).map(|v| println!("{}", v))
        }),

        Commands::Batch {
            input,
            output,
            table,
            key,
        } => KeySource::from_args(table, key).and_then(|source| {
            let options = ConvertOptions { key: Some(source) };
            match convert_batch(&input, output.as_deref(), &options) {
                Ok(report) => {
                    match &output {
                        Some(path) => {
                            println!("Converted {} values to {}", report.converted, path.display())
                        }
                        None => println!("{}", report.json),
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
