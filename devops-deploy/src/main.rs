use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use devops_deploy::stack::{DEFAULT_ADMIN_CIDR, DEFAULT_SERVICE_PORT, DEFAULT_SSH_USER};
use devops_deploy::{StackParams, default_stack, load_stack, validate};

#[derive(Parser)]
#[command(name = "devops-deploy")]
#[command(about = "Render and validate the deployment stack for the DevOps info service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the validated default stack as JSON
    Plan {
        /// Availability zone for the subnet
        #[arg(long)]
        zone: String,

        /// Path to the SSH public key injected into the VM
        #[arg(long)]
        ssh_public_key: PathBuf,

        /// Only source CIDR allowed to reach SSH
        #[arg(long, default_value = DEFAULT_ADMIN_CIDR)]
        admin_cidr: String,

        /// Login user for the SSH key
        #[arg(long, default_value = DEFAULT_SSH_USER)]
        ssh_user: String,

        /// Port the service listens on
        #[arg(long, default_value_t = DEFAULT_SERVICE_PORT)]
        app_port: u32,
    },

    /// Validate a stack stored as JSON
    Validate {
        /// Stack file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "devops_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(Cli::parse(), &mut io::stdout().lock())
}

/// Execute one subcommand; rendered stacks are written to `out`.
fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Plan {
            zone,
            ssh_public_key,
            admin_cidr,
            ssh_user,
            app_port,
        } => {
            let key = fs::read_to_string(&ssh_public_key).with_context(|| {
                format!("failed to read SSH public key {}", ssh_public_key.display())
            })?;

            let mut params = StackParams::new(zone, key);
            params.admin_cidr = admin_cidr;
            params.ssh_user = ssh_user;
            params.service_port = app_port;

            let stack = default_stack(&params);
            validate(&stack).context("generated stack is invalid")?;
            info!(
                "Planned {} in zone {} (service port {})",
                stack.instance.name, stack.subnet.zone, stack.service_port
            );
            writeln!(out, "{}", serde_json::to_string_pretty(&stack)?)?;
        }
        Commands::Validate { file } => {
            let stack = load_stack(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            validate(&stack).with_context(|| format!("{} is invalid", file.display()))?;
            info!("{} is valid", file.display());
        }
    }

    Ok(())
}
