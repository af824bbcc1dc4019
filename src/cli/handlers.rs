//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on failure.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info};

use super::commands::{CheckArgs, LanguagesArgs, ServeArgs};
use super::output::OutputFormatter;
use crate::config::LingoConfig;
use crate::service::CheckService;

pub async fn handle_serve(args: &ServeArgs, mut config: LingoConfig) -> i32 {
    if let Some(bind) = &args.bind {
        config.bind = bind.clone();
    }

    match serve(&config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Server failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn serve(config: &LingoConfig) -> Result<()> {
    let service = CheckService::from_config(config).context("Failed to initialize check service")?;
    let addr: SocketAddr = config.bind_addr()?;

    info!(
        addr = %addr,
        max_text_chars = config.max_text_chars,
        adapter_timeout_secs = config.adapter_timeout_secs,
        "Starting lingocheck server"
    );

    crate::server::serve(service, addr).await?;
    Ok(())
}

pub async fn handle_check(args: &CheckArgs, config: &LingoConfig) -> i32 {
    match check(args, config).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Check failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn check(args: &CheckArgs, config: &LingoConfig) -> Result<String> {
    let service = CheckService::from_config(config).context("Failed to initialize check service")?;

    let text = if args.text == "-" {
        read_stdin().await?
    } else {
        args.text.clone()
    };
    debug!(chars = text.chars().count(), language = %args.language, "Checking text");

    let report = service.handle_check(&text, &args.language).await?;
    OutputFormatter::new(args.format.into()).format_report(&report)
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read text from stdin")?;
    Ok(text)
}

pub async fn handle_languages(args: &LanguagesArgs, config: &LingoConfig) -> i32 {
    let result = CheckService::from_config(config)
        .context("Failed to load language table")
        .and_then(|service| {
            OutputFormatter::new(args.format.into()).format_languages(service.registry().profiles())
        });

    match result {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
