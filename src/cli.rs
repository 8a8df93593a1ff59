//! 命令行参数

use clap::{ArgAction, Parser};

const AFTER_HELP: &str = "\
Providers (in detection order):
  paru, yay, pacman, xbps, brew, dnf, apk, apt

Controls:
  type            search as you type
  Up/Down         move selection
  PgUp/PgDn       move one page
  Home/End        jump to top/bottom
  Enter           install selected package
  Esc             clear search
  Ctrl+C/Q/X      quit";

#[derive(Parser, Debug)]
#[command(
    name = "paclook",
    version,
    about = "Interactive package search and install",
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Use this provider instead of auto-detecting one
    #[arg(short = 'p', long = "provider", value_name = "NAME")]
    pub provider: Option<String>,

    /// List providers available on this system and exit
    #[arg(short = 'l', long = "list")]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["paclook"]).unwrap();
        assert!(cli.provider.is_none());
        assert!(!cli.list);
    }

    #[test]
    fn provider_short_and_long() {
        let cli = Cli::try_parse_from(["paclook", "-p", "yay"]).unwrap();
        assert_eq!(cli.provider.as_deref(), Some("yay"));
        let cli = Cli::try_parse_from(["paclook", "--provider", "apt", "--list"]).unwrap();
        assert_eq!(cli.provider.as_deref(), Some("apt"));
        assert!(cli.list);
    }

    #[test]
    fn help_lists_providers_and_keys() {
        let err = Cli::try_parse_from(["paclook", "--help"]).unwrap_err();
        let help = err.to_string();
        assert!(help.contains("xbps"));
        assert!(help.contains("Ctrl+C/Q/X"));
    }

    #[test]
    fn lowercase_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["paclook", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
            assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
        }
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["paclook", "--frobnicate"]).is_err());
    }
}
