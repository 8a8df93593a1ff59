mod cli;
mod config;
mod error;
mod package_manager;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use package_manager::{available_backends, PackageManager};
use std::fs::OpenOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        list_providers();
        return Ok(());
    }

    // 配置文件解析失败同样属于启动错误
    let config = Config::load_or_default().context("failed to load configuration")?;
    init_logging(&config)?;

    let requested = cli.provider.as_deref().or(config.provider.as_deref());
    let selected = match requested {
        Some(name) => PackageManager::select(name),
        None => PackageManager::detect(),
    };
    let provider = match selected {
        Ok(pm) => pm,
        Err(e) => {
            log::error!("startup failed: {}", e);
            eprintln!("Error: {e}");
            eprintln!("Run 'paclook --list' to see available providers");
            std::process::exit(1);
        }
    };

    tui::run(&provider, &config)
}

fn list_providers() {
    let backends = available_backends();
    if backends.is_empty() {
        println!("No supported package managers found on this system.");
        return;
    }
    println!("Available providers:");
    for backend in backends {
        println!("  {:<8} {}", backend.name(), backend.summary());
    }
}

/// 有日志文件时默认 info 级别写入文件，否则默认关闭，避免覆盖界面
fn init_logging(config: &Config) -> Result<()> {
    let default_filter = if config.log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
