use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};
use rouilletree::core_cli::Cli;
use rouilletree::core_log::init_logger;
use rouilletree::core_transport::TcpConnector;
use rouilletree::core_tree::export::export_json;
use rouilletree::core_tree::render::render_tree;
use rouilletree::{ClientConfig, FtpClient, FtpClientError, FtpResult, Node};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from_file(path)?,
        None => ClientConfig::default(),
    };
    args.apply(&mut config)?;
    let host = config.host.clone().context("No host to connect to")?;

    let connector = Arc::new(TcpConnector::new(Some(config.connect_timeout())));
    let mut ftp = FtpClient::with_options(connector, config.client_options());

    ftp.connect(&host, config.port)
        .await
        .with_context(|| format!("Cannot connect to {}:{}", host, config.port))?;

    if !ftp.login(&config.user, &config.password).await? {
        let reply = ftp.response_text().to_string();
        let _ = ftp.disconnect().await;
        bail!("Login as {} failed: {}", config.user, reply);
    }

    let (root, complete) = build_tree(&mut ftp, &config, &host).await?;
    print!("{}", render_tree(&root));
    if !complete {
        warn!("The control connection was lost, the tree above is partial");
    }
    info!("{} entries found under {}", root.descendant_count(), root.pathname());

    if let Some(path) = &config.json_output {
        let written = export_json(&root, path)?;
        info!("Tree written to {}", written.display());
    }

    if ftp.is_connected() && !ftp.logout().await? {
        warn!("Server refused QUIT: {}", ftp.response_text());
    }
    ftp.disconnect().await?;
    Ok(())
}

/// Builds the tree and reports whether it is complete.
async fn build_tree(ftp: &mut FtpClient, config: &ClientConfig, host: &str) -> Result<(Node, bool)> {
    if let Some(dir) = &config.start_dir {
        ftp.change_working_directory(dir)
            .await
            .with_context(|| format!("Cannot enter {}", dir))?;
    }
    let mut root = Node::root(&ftp.working_directory_name().await?);

    let outcome = match config.start_dir {
        Some(_) => list_one_level(ftp, &mut root).await,
        None => ftp.explore_depth(&mut root, config.max_depth).await,
    };

    match outcome {
        Ok(()) => Ok((root, true)),
        Err(FtpClientError::ControlChannelClosed(reason)) => {
            warn!("Control channel closed: {}", reason);
            match ftp.reconnect(host, config.port).await {
                Ok(()) => {
                    if !ftp.login(&config.user, &config.password).await? {
                        warn!("Login refused after reconnecting");
                    }
                }
                Err(e) => error!("{}", e),
            }
            Ok((root, false))
        }
        Err(e) => Err(e).context("Tree discovery failed"),
    }
}

async fn list_one_level(ftp: &mut FtpClient, root: &mut Node) -> FtpResult<()> {
    let current = ftp.working_directory_name().await?;
    let children = ftp.list(Some(&current), root).await?;
    root.append_children(children);
    Ok(())
}
