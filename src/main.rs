use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mcp_skill::call::CallRequest;
use mcp_skill::dispatch::{self, Mode};
use mcp_skill::generate::{self, GenerateOptions};

#[derive(Parser, Debug)]
#[command(
    name = "mcp-skill",
    version,
    about = "Package MCP servers as file-based agent skills"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Introspect MCP server(s) and write one skill package per server.
    Generate {
        /// Path to the MCP server configuration JSON.
        #[arg(long = "mcp-config")]
        mcp_config: PathBuf,

        /// Output directory (defaults to ./skills/<server-name>).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Convert only this server from a multi-server config.
        #[arg(long)]
        server: Option<String>,
    },

    /// Run one operation against the server of a generated skill.
    Exec {
        /// Persisted provider configuration (the package's mcp-config.json).
        #[arg(long, default_value = mcp_skill::config::CONFIG_FILE_NAME)]
        config: PathBuf,

        /// List all tools.
        #[arg(long)]
        list: bool,

        /// Print the full schema of one tool.
        #[arg(long, value_name = "TOOL")]
        describe: Option<String>,

        /// JSON tool call to execute: {"tool": "...", "arguments": {...}}.
        #[arg(long, value_name = "JSON")]
        call: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match (&cli.command, cli.debug) {
        (_, true) => "mcp_skill=debug",
        (Commands::Generate { .. }, false) => "mcp_skill=info",
        (Commands::Exec { .. }, false) => "mcp_skill=warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            mcp_config,
            output_dir,
            server,
        } => {
            cmd_generate(GenerateOptions {
                config_path: mcp_config,
                output_dir,
                server,
            })
            .await
        }
        Commands::Exec {
            config,
            list,
            describe,
            call,
        } => cmd_exec(config, list, describe, call).await,
    }
}

async fn cmd_generate(options: GenerateOptions) -> Result<()> {
    let packages = generate::generate(&options).await?;

    for package in &packages {
        let note = if package.degraded {
            " (placeholder: server could not be introspected)"
        } else {
            ""
        };
        println!(
            "{}: {} tools via {} -> {}{}",
            package.name,
            package.tool_count,
            package.transport,
            package.dir.display(),
            note
        );
    }

    if !packages.is_empty() {
        println!();
        println!("Done. To use a generated skill:");
        println!("  cp -r <skill-dir> ~/.claude/skills/");
    }
    Ok(())
}

async fn cmd_exec(
    config: PathBuf,
    list: bool,
    describe: Option<String>,
    call: Option<String>,
) -> Result<()> {
    let mode = if list {
        Mode::List
    } else if let Some(name) = describe {
        Mode::Describe(name)
    } else if let Some(payload) = call {
        Mode::Call(payload.parse::<CallRequest>()?)
    } else {
        let mut cmd = Cli::command();
        // Propagates "mcp-skill exec" into the subcommand's usage line.
        cmd.build();
        if let Some(exec) = cmd.find_subcommand_mut("exec") {
            exec.print_help()?;
        }
        return Ok(());
    };

    dispatch::dispatch(&config, &mode, &mut std::io::stdout()).await?;
    Ok(())
}
