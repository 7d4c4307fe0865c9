//! Theta Provider - Main entry point

use clap::Parser;
use log::{debug, info};

use theta_provider::theta::{
    run_create_command, run_delete_command, run_deploy_command, run_login_command,
    run_org_command, run_prj_command, run_tpl_command, run_update_command,
};
use theta_provider::{Cli, ClientConfig, Command, CredentialResolver, GetResource, Provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting theta-provider v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "Endpoints: api={}, controller={}",
        cli.api_url, cli.controller_url
    );

    // Resolve credentials with fallback logic
    let credentials = CredentialResolver::new().resolve(&cli.credential_args())?;

    let config = ClientConfig::with_urls(&cli.api_url, &cli.controller_url);
    let client = Provider::configure(config, &credentials).await?;

    match &cli.command {
        Command::Login => run_login_command(&client, &cli).await,
        Command::Get { resource } => match resource {
            GetResource::Org(args) => run_org_command(&client, args, &cli).await,
            GetResource::Prj(args) => run_prj_command(&client, args, &cli).await,
            GetResource::Tpl(args) => run_tpl_command(&client, args, &cli).await,
            GetResource::Deploy(args) => run_deploy_command(&client, args, &cli).await,
        },
        Command::Create(args) => run_create_command(&client, args, &cli).await,
        Command::Update(args) => run_update_command(&client, args, &cli).await,
        Command::Delete(args) => run_delete_command(&client, args, &cli).await,
    }
}
