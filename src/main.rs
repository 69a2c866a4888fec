use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell as CompShell};
use multispin::Animation;
use std::path::PathBuf;

mod commands;

use commands::*;

#[derive(Parser)]
#[command(name = "multispin")]
#[command(version = "0.1.0")]
#[command(about = "Many concurrent terminal spinners, one render loop")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a set of simulated tasks, one spinner each
    Demo {
        /// Number of spinners
        #[arg(long = "count", default_value = "4")]
        count: usize,
        /// Steps each task goes through before finishing
        #[arg(long = "steps", default_value = "5")]
        steps: u32,
        /// Animation name (see `multispin animations`)
        #[arg(long = "animation")]
        animation: Option<Animation>,
        /// Frame duration in milliseconds
        #[arg(long = "frame-ms")]
        frame_ms: Option<u64>,
        /// 1-based index of a task that should fail (repeatable)
        #[arg(long = "fail", action = clap::ArgAction::Append)]
        fail: Vec<usize>,
        /// Spinner config file (JSON or YAML)
        #[arg(long = "config")]
        config: Option<PathBuf>,
        /// Disable colors
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// List the built-in animations
    Animations,
    /// Generate shell completions (internal)
    #[command(hide = true)]
    Completions {
        /// Shell: bash, zsh, fish
        shell: String,
    },
    /// Generate man page (internal)
    #[command(hide = true)]
    Man,
}

fn init_logging() {
    // Logs go to stderr so they never land inside the spinner block.
    let filter = tracing_subscriber::EnvFilter::try_from_env("MULTISPIN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Demo {
            count,
            steps,
            animation,
            frame_ms,
            fail,
            config,
            no_color,
        } => {
            demo::handle_demo(demo::DemoOptions {
                count,
                steps,
                animation,
                frame_ms,
                fail,
                config,
                no_color,
            })
            .await?;
        }
        Commands::Animations => {
            animations::handle_animations();
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            let sh = match shell.as_str() {
                "bash" => CompShell::Bash,
                "zsh" => CompShell::Zsh,
                "fish" => CompShell::Fish,
                "powershell" | "pwsh" => CompShell::PowerShell,
                "elvish" => CompShell::Elvish,
                other => {
                    eprintln!(
                        "Unsupported shell: {} (use bash|zsh|fish|powershell|elvish)",
                        other
                    );
                    std::process::exit(2);
                }
            };
            generate(sh, &mut cmd, name, &mut std::io::stdout());
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            man.render(&mut std::io::stdout())?;
        }
    }

    Ok(())
}
