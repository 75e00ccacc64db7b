use anyhow::Result;
use chordsync::app::{run_show_command, run_sync_command};
use chordsync::cli::{Cli, Commands, ConfigAction};
use chordsync::config::Config;
use chordsync::output::Reporter;
use clap::{CommandFactory, Parser};

fn main() {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.quiet, cli.verbose);

    if let Err(e) = run(cli, reporter) {
        reporter.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, reporter: Reporter) -> Result<()> {
    match cli.command {
        Commands::Sync(args) => {
            let config = load_config(cli.config.as_deref())?;
            reporter.detail(&format!("chordsync {}", chordsync::version_string()));
            run_sync_command(config, args, reporter)?;
        }
        Commands::Show { input, print } => {
            let config = load_config(cli.config.as_deref())?;
            run_show_command(&config, &input, print, reporter)?;
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "chordsync",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/chordsync/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Handle configuration commands.
fn handle_config_command(
    action: ConfigAction,
    custom_path: Option<&std::path::Path>,
) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(custom_path)?;
            println!("{}", config.get_value_by_path(&key)?);
        }
        ConfigAction::List => {
            let config = load_config(custom_path)?;
            print!("{}", config.to_display_toml()?);
        }
        ConfigAction::Path => {
            let path = custom_path
                .map(std::path::PathBuf::from)
                .unwrap_or_else(Config::default_path);
            println!("{}", path.display());
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
    }

    Ok(())
}
