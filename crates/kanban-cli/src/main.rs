mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = CliContext::open(cli.storage_dir, cli.config.as_deref());

    match cli.command {
        Commands::Board(board_cmd) => {
            handlers::board::handle(&mut ctx, board_cmd.action).await?;
        }
        Commands::Column(column_cmd) => {
            handlers::column::handle(&mut ctx, column_cmd.action).await?;
        }
        Commands::Task(task_cmd) => {
            handlers::task::handle(&mut ctx, task_cmd.action).await?;
        }
        Commands::Drag(args) => {
            handlers::task::handle_drag(&mut ctx, args).await?;
        }
        Commands::Fetch { if_needed } => {
            handlers::remote::handle_fetch(&mut ctx, if_needed).await?;
        }
        Commands::Theme(theme_cmd) => {
            handlers::ui::handle_theme(&mut ctx, theme_cmd.action).await?;
        }
        Commands::Sidebar(sidebar_cmd) => {
            handlers::ui::handle_sidebar(&mut ctx, sidebar_cmd.action).await?;
        }
        Commands::Login => {
            handlers::ui::handle_login(&mut ctx, true).await?;
        }
        Commands::Logout => {
            handlers::ui::handle_login(&mut ctx, false).await?;
        }
        Commands::Status => {
            handlers::ui::handle_status(&ctx);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
