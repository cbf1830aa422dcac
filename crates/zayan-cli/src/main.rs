#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zayan_core::config::{DashboardConfig, load_config};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "zhq: the Zayan HQ team and task dashboard",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides FORMAT and the config file).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file to load instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Interactive",
        about = "Open the dashboard",
        long_about = "Open the interactive dashboard. A login screen comes first; this is the default when no subcommand is given.",
        after_help = "EXAMPLES:\n    # Open the dashboard\n    zhq\n\n    # Prefill another username on the login screen\n    zhq ui --username alice"
    )]
    Ui(cmd::ui::UiArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the task board",
        long_about = "Show the seeded kanban board, one section per column.",
        after_help = "EXAMPLES:\n    # Every project\n    zhq board\n\n    # Only one project\n    zhq board --project signlink\n\n    # Only the review column, urgent tasks\n    zhq board --status review --priority urgent\n\n    # Emit machine-readable output\n    zhq board --json"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Read",
        about = "List agents",
        long_about = "List agents with their status, role and specialties.",
        after_help = "EXAMPLES:\n    # List agents\n    zhq agents\n\n    # Only busy agents\n    zhq agents --status working\n\n    # Emit machine-readable output\n    zhq agents --json"
    )]
    Agents(cmd::agents::AgentsArgs),

    #[command(
        next_help_heading = "Read",
        about = "List projects",
        long_about = "List projects with their task counts.",
        after_help = "EXAMPLES:\n    # List projects\n    zhq projects\n\n    # Emit machine-readable output\n    zhq projects --json"
    )]
    Projects(cmd::projects::ProjectsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show recent activity",
        long_about = "Show the activity feed, newest first.",
        after_help = "EXAMPLES:\n    # Last 20 entries\n    zhq feed\n\n    # Last 5 entries\n    zhq feed -n 5\n\n    # Only deployments\n    zhq feed --type deploy"
    )]
    Feed(cmd::feed::FeedArgs),

    #[command(
        next_help_heading = "Account",
        about = "Check credentials",
        long_about = "Run the credential check without opening the dashboard. The password is read from stdin or ZAYAN_HQ_PASSWORD.",
        after_help = "EXAMPLES:\n    # Password from the environment\n    ZAYAN_HQ_PASSWORD=... zhq login --username clement\n\n    # Password from stdin\n    printf '%s\\n' \"$PW\" | zhq login -u clement --password-stdin"
    )]
    Login(cmd::login::LoginArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for zhq.",
        after_help = "EXAMPLES:\n    # Bash\n    zhq completions bash > ~/.local/share/bash-completion/completions/zhq\n\n    # Zsh\n    zhq completions zsh > ~/.zfunc/_zhq"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Set up the global subscriber. Logs go to stderr so they never mix with
/// command output or the dashboard.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ZAYAN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "zayan=debug,zhq=debug"
        } else {
            "zayan=warn,zhq=warn"
        })
    });

    let format = env::var("ZAYAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load the config, reporting failures in the mode the flags ask for.
fn load_dashboard_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    match load_config(cli.config.as_deref()) {
        Ok(config) => Ok(config),
        Err(e) => {
            let mode = resolve_output_mode(cli.format, cli.json, None);
            render_error(mode, &CliError::coded(e.code(), e.to_string()))?;
            Err(e.into())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = load_dashboard_config(&cli)?;
    let output = resolve_output_mode(cli.format, cli.json, config.output.format.as_deref());

    match cli.command {
        None => cmd::ui::run_ui(&cmd::ui::UiArgs::default(), output, &config),
        Some(Commands::Ui(ref args)) => cmd::ui::run_ui(args, output, &config),
        Some(Commands::Board(ref args)) => cmd::board::run_board(args, output),
        Some(Commands::Agents(ref args)) => cmd::agents::run_agents(args, output),
        Some(Commands::Projects(ref args)) => cmd::projects::run_projects(args, output),
        Some(Commands::Feed(ref args)) => cmd::feed::run_feed(args, output),
        Some(Commands::Login(ref args)) => cmd::login::run_login(args, output, &config.auth),
        Some(Commands::Completions(ref args)) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::parse_from(["zhq"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["zhq", "board", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Board(_))));
    }

    #[test]
    fn format_flag_parses_value_enum() {
        let cli = Cli::parse_from(["zhq", "--format", "text", "agents"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn board_project_filter() {
        let cli = Cli::parse_from(["zhq", "board", "-p", "signlink"]);
        match cli.command {
            Some(Commands::Board(args)) => assert_eq!(args.project.as_deref(), Some("signlink")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn feed_limit_defaults_to_twenty() {
        let cli = Cli::parse_from(["zhq", "feed"]);
        match cli.command {
            Some(Commands::Feed(args)) => assert_eq!(args.limit, 20),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn board_enum_filters_stay_raw_until_run() {
        let cli = Cli::parse_from(["zhq", "board", "-s", "in-progress", "--priority", "nope"]);
        match cli.command {
            Some(Commands::Board(args)) => {
                assert_eq!(args.status.as_deref(), Some("in-progress"));
                assert_eq!(args.priority.as_deref(), Some("nope"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn feed_type_flag() {
        let cli = Cli::parse_from(["zhq", "feed", "-t", "deploy"]);
        match cli.command {
            Some(Commands::Feed(args)) => assert_eq!(args.kind.as_deref(), Some("deploy")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn login_requires_username() {
        assert!(Cli::try_parse_from(["zhq", "login"]).is_err());
        let cli = Cli::parse_from(["zhq", "login", "-u", "clement", "--password-stdin"]);
        match cli.command {
            Some(Commands::Login(args)) => {
                assert_eq!(args.username, "clement");
                assert!(args.password_stdin);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["zhq", "ui", "--config", "/tmp/zhq.toml", "-u", "alice"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/zhq.toml")));
        match cli.command {
            Some(Commands::Ui(args)) => assert_eq!(args.username.as_deref(), Some("alice")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["zhq", "--format", "yaml", "board"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
