use clap::Parser;
use scripts::{
    cli::{Cli, ScriptEnv},
    errors::ScriptError,
    utils::setup_client,
};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        artifacts,
        deployments_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let (client, account) = setup_client(&priv_key, &rpc_url)?;
    let env = ScriptEnv {
        client,
        account,
        artifacts: &artifacts,
        deployments: &deployments_path,
    };

    command.run(env).await
}
