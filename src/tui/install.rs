//! 安装：挂起界面 → 在终端前台运行安装命令 → 恢复界面

use super::state::SessionState;
use super::terminal::{self, Terminal};
use super::theme::{style, Style};
use crate::package_manager::command;
use crate::package_manager::Provider;
use std::io::{self, Write};

/// 安装当前选中的软件包，结果写回会话状态
pub fn install_selected(
    term: &mut Terminal,
    provider: &dyn Provider,
    state: &mut SessionState,
    color: bool,
) -> io::Result<()> {
    let Some(pkg) = state.selected_package().cloned() else {
        return Ok(());
    };

    term.clear()?;
    term.leave()?;

    let mut stdout = io::stdout();
    writeln!(stdout, "\nInstalling {} from {}...\n", pkg.name, pkg.source)?;
    stdout.flush()?;

    let cmd = provider.install_command(&pkg);
    log::info!("running install command: {}", cmd);
    let success = match command::run_interactive(&cmd) {
        Ok(status) => {
            log::info!("install of {} exited with {}", pkg.name, status);
            status.success()
        }
        Err(e) => {
            log::error!("failed to start install of {}: {}", pkg.name, e);
            false
        }
    };
    // 安装过程中的 Ctrl-C 只属于安装命令
    terminal::clear_interrupt();

    write!(
        stdout,
        "\n{}Press Enter to continue...{}",
        style(Style::Dim, color),
        style(Style::Reset, color)
    )?;
    stdout.flush()?;
    let mut line = String::new();
    if let Err(e) = io::stdin().read_line(&mut line) {
        log::warn!("failed to read from stdin: {}", e);
    }

    state.finish_install(success);
    term.enter()
}
