use acsplaces::{
    config::{resolve_api_key, ExportConfig, VariableSpec},
    export_places, fips, resolve_state, ApiConfig, CensusClient,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "acsplaces")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export ACS place-level estimates for one state to CSV", long_about = None)]
struct Cli {
    /// API access key (falls back to $CENSUS_API_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    /// YAML export job; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true)]
    host: Option<String>,

    /// Dataset year
    #[arg(long, global = true)]
    year: Option<String>,

    /// Dataset identifier, e.g. acs/acs5
    #[arg(long, global = true)]
    dataset: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch variables for every place in a state and write them as CSV
    Places {
        /// State name (e.g. CALIFORNIA) or two-digit code (e.g. 06)
        #[arg(short, long)]
        state: Option<String>,

        /// Variable code, optionally renamed: B01001_001E=total_population
        #[arg(short = 'v', long = "var", value_name = "CODE[=NAME]")]
        vars: Vec<String>,

        /// Output CSV path (default: <state>_places.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the dataset's variable groups document
    Groups,

    /// List known state names and codes
    States,
}

impl Cli {
    fn api_config(&self, base: ApiConfig) -> ApiConfig {
        ApiConfig {
            host: self.host.clone().unwrap_or(base.host),
            year: self.year.clone().unwrap_or(base.year),
            dataset: self.dataset.clone().unwrap_or(base.dataset),
            timeout_secs: self.timeout.unwrap_or(base.timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        error!("{:#}", err);
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let job = match &cli.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExportConfig::default(),
    };
    let api = cli.api_config(job.api.clone());

    match cli.command {
        Commands::States => {
            for (name, code) in fips::all_states() {
                println!("{}\t{}", code, name);
            }
        }

        Commands::Groups => {
            let client = CensusClient::anonymous(api)?;
            let groups = client
                .get_variable_groups()
                .await
                .context("fetching variable groups")?;
            println!("{}", groups);
        }

        Commands::Places {
            state,
            vars,
            output,
        } => {
            let Some(state) = state.or(job.state.clone()) else {
                bail!("no state given (use --state or `state:` in the config)");
            };
            let state = resolve_state(&state)?;

            let mut variables = job.variables.clone();
            for raw in &vars {
                variables.push(VariableSpec::parse(raw)?);
            }
            let job = ExportConfig {
                variables,
                ..job
            };
            let codes = job.codes();
            if codes.is_empty() {
                bail!("no variables given (use --var or `variables:` in the config)");
            }

            let output = output.or(job.output.clone()).unwrap_or_else(|| {
                PathBuf::from(format!(
                    "{}_places.csv",
                    state.name().to_lowercase().replace(' ', "_")
                ))
            });

            let client = CensusClient::new(resolve_api_key(cli.key)?, api)?;
            let table = export_places(&client, &state, &codes, &job.rename_map(), &output)
                .await
                .with_context(|| format!("exporting places for {}", state.name()))?;
            info!(rows = table.len(), path = %output.display(), "done");
            println!(
                "Data successfully retrieved and saved to {}",
                output.display()
            );
        }
    }

    Ok(())
}
