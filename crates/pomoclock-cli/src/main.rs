use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pomoclock_core::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomoclock", version, about = "Session/break countdown clock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive clock in this terminal
    Run(commands::run::RunArgs),
    /// Print the initial clock state as JSON
    Status,
    /// Format a number of seconds as MM:SS
    Format {
        /// Remaining seconds
        seconds: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.log.level;
        EnvFilter::new(format!("pomoclock_core={level},pomoclock={level}"))
    });
    // Logs go to stderr so the clock line on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Reading never creates the file; only `config` subcommands write it.
    let (config, config_error) = match Config::read() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_error {
        warn!("ignoring invalid config, using defaults: {e}");
    }

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &config),
        Commands::Status => commands::status::run(),
        Commands::Format { seconds } => {
            println!("{}", pomoclock_core::format_clock(seconds));
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomoclock", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
