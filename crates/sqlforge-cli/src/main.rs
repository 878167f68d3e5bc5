use anyhow::{Context, Result};
use clap::Parser;
use sqlforge_core::load;
use sqlforge_sql::{ddl, Config};
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sqlforge")]
#[command(about = "sqlforge - compile a JSON schema tree into SQL DDL")]
#[command(version)]
struct Cli {
    /// Schema file (JSON)
    schema: PathBuf,

    /// Target platform: mysql, pgsql, sqlite or sql
    #[arg(short, long, default_value = "mysql")]
    platform: String,

    /// Quote every identifier
    #[arg(long, overrides_with = "no_quote")]
    quote: bool,

    /// Never quote identifiers, even if the schema asks for it
    #[arg(long, overrides_with = "quote")]
    no_quote: bool,

    /// Drop existing tables before creating them
    #[arg(long)]
    drop: bool,

    /// Generator settings (JSON); flags given here win over the file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

impl Cli {
    fn identifier_quoting(&self) -> Option<bool> {
        match (self.quote, self.no_quote) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn load_config(&self) -> Result<Config> {
        let mut config: Config = match &self.config {
            Some(path) => {
                let src = fs::read_to_string(path)
                    .with_context(|| format!("reading config `{}`", path.display()))?;
                serde_json::from_str(&src)
                    .with_context(|| format!("parsing config `{}`", path.display()))?
            }
            None => Config::new(),
        };

        if let Some(enabled) = self.identifier_quoting() {
            config = config.identifier_quoting(enabled);
        }

        if self.drop {
            config = config.drop_tables(true);
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    debug!(?config, "loaded generator config");

    let src = fs::read_to_string(&cli.schema)
        .with_context(|| format!("reading schema `{}`", cli.schema.display()))?;
    let mut db = load::from_str(&src)
        .with_context(|| format!("loading schema `{}`", cli.schema.display()))?;

    let platform = config.platform_for(&cli.platform, &db)?;
    db.finalize_definition(&*platform)?;

    info!(
        database = %db.name,
        platform = platform.database_type(),
        entities = db.entities().len(),
        "generating DDL"
    );

    print!("{}", ddl::generate(&db, &*platform, &config)?);
    Ok(())
}

fn setup_logging(verbosity: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
