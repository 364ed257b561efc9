use anyhow::Result;
use clap::{Parser, Subcommand};
use pygmy::cli::{render, resolve};
use pygmy::domain::Platform;
use pygmy::infra::config::{default_config_path, expand_path};
use pygmy::services::ValidationError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pygmy",
    version,
    about = "Resolve a configuração dos serviços auxiliares do pygmy"
)]
struct Cli {
    /// Arquivo de configuração (default: ~/.pygmy.yml)
    #[arg(long, env = "PYGMY_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Sistema operacional usado para os resolvers (default: o atual)
    #[arg(long, env = "PYGMY_PLATFORM")]
    platform: Option<String>,

    /// Logs detalhados
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mostra a configuração resolvida em YAML
    Config,
    /// Lista os serviços na ordem de inicialização
    Order,
    /// Lista os resolvers de DNS configurados
    Resolvers,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ValidationError>() {
            Some(invalid) => {
                println!("{invalid}");
                ExitCode::from(ValidationError::EXIT_CODE)
            }
            None => {
                eprintln!("Erro: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let platform = cli
        .platform
        .as_deref()
        .map(Platform::from_os)
        .unwrap_or_else(Platform::current);
    let config = resolve(&expand_path(&cli.config), platform)?;

    match cli.command {
        Commands::Config => print!("{}", render::config_yaml(&config)?),
        Commands::Order => print!("{}", render::start_order(&config)),
        Commands::Resolvers => print!("{}", render::resolvers(&config)),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "pygmy=debug,info" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
