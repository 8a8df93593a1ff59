mod debounce;
pub mod input;
mod install;
mod render;
mod selection;
pub mod state;
mod terminal;
mod theme;

use crate::config::Config;
use crate::package_manager::Provider;
use anyhow::{Context, Result};
use render::RenderOptions;
use state::{Action, SessionState};
use std::time::{Duration, Instant};
use terminal::Terminal;

/// 每次读键的最长等待
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(provider: &dyn Provider, config: &Config) -> Result<()> {
    terminal::install_signal_handlers();
    terminal::install_panic_hook();

    let mut term = Terminal::new();
    term.enter().context("failed to enter raw mode")?;

    let mut state = SessionState::new(config.page_size, config.debounce());
    let color = config.color_enabled();
    log::info!("session started with provider {}", provider.name());

    let result = event_loop(&mut term, provider, &mut state, config, color);

    // 无论循环如何结束都恢复终端
    let _ = term.clear();
    term.leave().context("failed to restore terminal")?;
    result
}

fn event_loop(
    term: &mut Terminal,
    provider: &dyn Provider,
    state: &mut SessionState,
    config: &Config,
    color: bool,
) -> Result<()> {
    loop {
        if terminal::termination_requested() {
            log::info!("terminated by signal");
            return Ok(());
        }

        state.tick(provider, Instant::now());

        let (_, cols) = term.dimensions();
        let opts = RenderOptions {
            color,
            width: usize::from(cols),
            description_width: config.description_width,
        };
        term.render(&render::frame(state, provider, &opts))?;

        if let Some(key) = term.read_key(POLL_INTERVAL) {
            if state.handle_key(key, Instant::now()) == Action::Install {
                install::install_selected(term, provider, state, color)
                    .context("install step failed")?;
            }
        }

        if state.should_quit {
            log::info!("session ended by user");
            return Ok(());
        }
    }
}
