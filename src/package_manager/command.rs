//! 外部命令执行（搜索 / 探测 / 安装）

use std::process::ExitStatus;

/// 捕获后的命令输出
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// 运行命令并捕获 stdout / stderr，非零退出码不视为错误。
///
/// 命令无法启动时返回 `None`，调用方按"无输出"处理。
pub fn capture(program: &str, args: &[&str]) -> Option<CommandOutput> {
    let output = duct::cmd(program, args)
        .stdin_null()
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run();

    match output {
        Ok(o) => Some(CommandOutput {
            stdout: String::from_utf8_lossy(&o.stdout).to_string(),
            stderr: String::from_utf8_lossy(&o.stderr).to_string(),
            success: o.status.success(),
        }),
        Err(e) => {
            log::warn!("failed to run {program}: {e}");
            None
        }
    }
}

/// 仅在命令成功时返回 stdout
pub fn stdout_if_success(program: &str, args: &[&str]) -> Option<String> {
    capture(program, args)
        .filter(|o| o.success)
        .map(|o| o.stdout)
}

/// `which <binary>` 判断命令是否存在
pub fn command_exists(binary: &str) -> bool {
    duct::cmd("which", [binary])
        .stdin_null()
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// 通过 `sh -c` 同步执行一整行命令，继承当前终端的输入输出。
pub fn run_interactive(command_line: &str) -> std::io::Result<ExitStatus> {
    duct::cmd("sh", ["-c", command_line])
        .unchecked()
        .run()
        .map(|o| o.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_keeps_both_streams_on_failure() {
        let out = capture("sh", &["-c", "echo out; echo err >&2; exit 3"]).unwrap();
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
        assert!(!out.success);
        assert!(out.combined_output().contains("err"));
    }

    #[test]
    fn missing_program_is_none() {
        assert!(capture("paclook-definitely-missing-binary", &[]).is_none());
        assert!(!command_exists("paclook-definitely-missing-binary"));
    }

    #[test]
    fn stdout_only_on_success() {
        assert_eq!(stdout_if_success("sh", &["-c", "echo ok"]).as_deref(), Some("ok\n"));
        assert!(stdout_if_success("sh", &["-c", "echo no; exit 1"]).is_none());
    }

    #[test]
    fn interactive_reports_exit_status() {
        assert!(run_interactive("true").unwrap().success());
        assert!(!run_interactive("exit 7").unwrap().success());
    }
}
