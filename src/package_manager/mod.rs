//! 包管理器模块 — 对 paru / yay / pacman / xbps / brew / dnf / apk / apt 的封装
//!
//! 交互会话只通过 [`Provider`] 与后端打交道，从不直接解析任何包管理器的输出。

pub mod command;
pub mod parser;
pub mod types;

pub use types::{Package, SearchResult};

use crate::error::Error;
use crossterm::style::Color;
use parser::{
    is_too_many_results, package_from_detail, parse_apk_search, parse_apt_search,
    parse_brew_search, parse_dnf_search, parse_name_list, parse_package_detail,
    parse_sync_search, parse_xbps_search, sort_by_relevance,
};
use std::collections::HashSet;

/// AUR 助手查询过宽时展示给用户的提示
pub const TOO_MANY_RESULTS: &str = "Too many results! Try a more specific search.";

/// 包来源后端的能力接口
pub trait Provider {
    /// 后端名称，如 "paru"
    fn name(&self) -> &str;

    /// 本地检查后端是否可用（不访问网络）
    fn is_available(&self) -> bool;

    /// 搜索软件包
    fn search(&self, query: &str) -> SearchResult;

    /// 安装命令行，由会话原样交给 `sh -c` 执行
    fn install_command(&self, pkg: &Package) -> String;

    /// 仓库标签的显示颜色
    fn source_color(&self, source: &str) -> Color {
        default_source_color(source)
    }
}

/// Arch 系仓库的默认配色
pub fn default_source_color(source: &str) -> Color {
    match source {
        "core" => Color::DarkCyan,
        "extra" => Color::DarkGreen,
        "community" => Color::DarkYellow,
        "multilib" => Color::DarkMagenta,
        "aur" => Color::Blue,
        _ => Color::Grey,
    }
}

/// 已知后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Paru,
    Yay,
    Pacman,
    Xbps,
    Brew,
    Dnf,
    Apk,
    Apt,
}

impl Backend {
    /// 自动探测时的优先顺序
    pub const PREFERENCE: [Backend; 8] = [
        Backend::Paru,
        Backend::Yay,
        Backend::Pacman,
        Backend::Xbps,
        Backend::Brew,
        Backend::Dnf,
        Backend::Apk,
        Backend::Apt,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PREFERENCE.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Paru => "paru",
            Backend::Yay => "yay",
            Backend::Pacman => "pacman",
            Backend::Xbps => "xbps",
            Backend::Brew => "brew",
            Backend::Dnf => "dnf",
            Backend::Apk => "apk",
            Backend::Apt => "apt",
        }
    }

    /// 帮助信息里的一句话说明
    pub fn summary(self) -> &'static str {
        match self {
            Backend::Paru => "AUR helper (includes official repos + AUR)",
            Backend::Yay => "AUR helper (includes official repos + AUR)",
            Backend::Pacman => "Official Arch Linux repos only",
            Backend::Xbps => "Void Linux package manager",
            Backend::Brew => "Homebrew (macOS/Linux)",
            Backend::Dnf => "Fedora/RHEL package manager",
            Backend::Apk => "Alpine Linux package manager",
            Backend::Apt => "Debian/Ubuntu package manager",
        }
    }

    /// 用于可用性探测的可执行文件
    fn probe_binary(self) -> &'static str {
        match self {
            Backend::Xbps => "xbps-query",
            Backend::Apt => "apt-cache",
            other => other.name(),
        }
    }
}

/// 基于外部命令的后端实现
#[derive(Debug, Clone)]
pub struct PackageManager {
    backend: Backend,
}

impl PackageManager {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// 按名字选择后端，未知或不可用时报错
    pub fn select(name: &str) -> Result<Self, Error> {
        let available: Vec<Backend> = Backend::from_name(name)
            .filter(|b| Self::new(*b).is_available())
            .into_iter()
            .collect();
        pick_backend(Some(name), &available).map(Self::new)
    }

    /// 按优先顺序探测第一个可用后端
    pub fn detect() -> Result<Self, Error> {
        pick_backend(None, &available_backends()).map(Self::new)
    }

    fn search_sync_db(&self, binary: &str, query: &str) -> SearchResult {
        let Some(output) = command::capture(binary, &["-Ss", query]) else {
            return SearchResult::default();
        };
        if is_too_many_results(&output.combined_output()) {
            return SearchResult::failed(TOO_MANY_RESULTS);
        }
        SearchResult::found(parse_sync_search(&output.stdout))
    }

    fn search_pacman(&self, query: &str) -> SearchResult {
        // -Ss 有时漏掉完全同名的包，先用 -Si 精确查一次
        let exact = command::stdout_if_success("pacman", &["-Si", query])
            .and_then(|raw| package_from_detail(&parse_package_detail(&raw)))
            .map(|mut pkg| {
                pkg.installed = command::stdout_if_success("pacman", &["-Q", query]).is_some();
                pkg
            });

        let mut packages = command::stdout_if_success("pacman", &["-Ss", query])
            .map(|out| parse_sync_search(&out))
            .unwrap_or_default();

        if let Some(exact) = exact {
            if !packages.iter().any(|p| p.same_identity(&exact)) {
                packages.insert(0, exact);
            }
        }

        sort_by_relevance(&mut packages, query);
        SearchResult::found(packages)
    }

    fn installed_set(&self) -> HashSet<String> {
        let raw = match self.backend {
            Backend::Brew => {
                let mut names = command::stdout_if_success("brew", &["list", "--formula", "-1"]).unwrap_or_default();
                names.push('\n');
                names.push_str(&command::stdout_if_success("brew", &["list", "--cask", "-1"]).unwrap_or_default());
                Some(names)
            }
            Backend::Dnf => command::stdout_if_success("rpm", &["-qa", "--qf", "%{NAME}\\n"]),
            Backend::Apk => command::stdout_if_success("apk", &["info"]),
            Backend::Apt => command::stdout_if_success("dpkg-query", &["-W", "-f=${Package}\\n"]),
            _ => None,
        };
        raw.map(|r| parse_name_list(&r)).unwrap_or_default()
    }
}

impl Provider for PackageManager {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn is_available(&self) -> bool {
        command::command_exists(self.backend.probe_binary())
    }

    fn search(&self, query: &str) -> SearchResult {
        if query.is_empty() {
            return SearchResult::default();
        }

        let result = match self.backend {
            Backend::Paru => self.search_sync_db("paru", query),
            Backend::Yay => self.search_sync_db("yay", query),
            Backend::Pacman => self.search_pacman(query),
            Backend::Xbps => command::stdout_if_success("xbps-query", &["-Rs", query])
                .map(|out| SearchResult::found(parse_xbps_search(&out)))
                .unwrap_or_default(),
            Backend::Brew | Backend::Dnf | Backend::Apk | Backend::Apt => {
                let output = match self.backend {
                    Backend::Brew => command::stdout_if_success("brew", &["search", "--desc", query]),
                    Backend::Dnf => command::stdout_if_success("dnf", &["search", query]),
                    Backend::Apk => command::stdout_if_success("apk", &["search", "-v", query]),
                    _ => command::stdout_if_success("apt-cache", &["search", query]),
                };
                let Some(output) = output.filter(|o| !o.trim().is_empty()) else {
                    return SearchResult::default();
                };
                let installed = self.installed_set();
                let mut packages = match self.backend {
                    Backend::Brew => parse_brew_search(&output, &installed),
                    Backend::Dnf => parse_dnf_search(&output, &installed),
                    Backend::Apk => parse_apk_search(&output, &installed),
                    _ => parse_apt_search(&output, &installed),
                };
                sort_by_relevance(&mut packages, query);
                SearchResult::found(packages)
            }
        };

        log::debug!(
            "{} search {:?}: {} packages, error={:?}",
            self.name(),
            query,
            result.packages.len(),
            result.error
        );
        result
    }

    fn install_command(&self, pkg: &Package) -> String {
        match self.backend {
            Backend::Paru => format!("paru -S {}", pkg.name),
            Backend::Yay => format!("yay -S {}", pkg.name),
            Backend::Pacman => format!("sudo pacman -S {}", pkg.name),
            Backend::Xbps => format!("sudo xbps-install {}", pkg.name),
            Backend::Brew if pkg.source == "cask" => format!("brew install --cask {}", pkg.name),
            Backend::Brew => format!("brew install {}", pkg.name),
            Backend::Dnf => format!("sudo dnf install {}", pkg.name),
            Backend::Apk => format!("sudo apk add {}", pkg.name),
            Backend::Apt => format!("sudo apt install {}", pkg.name),
        }
    }

    fn source_color(&self, source: &str) -> Color {
        match self.backend {
            Backend::Brew => match source {
                "cask" => Color::DarkMagenta,
                _ => Color::DarkYellow,
            },
            Backend::Dnf => match source {
                "fedora" => Color::DarkBlue,
                "updates" => Color::DarkGreen,
                "@System" => Color::DarkCyan,
                _ => Color::DarkYellow,
            },
            Backend::Apk => match source {
                "community" => Color::DarkYellow,
                _ => Color::DarkBlue,
            },
            Backend::Xbps => Color::DarkGreen,
            _ => default_source_color(source),
        }
    }
}

/// 在可用后端中选择：指定名字时必须可用，否则取第一个
pub fn pick_backend(requested: Option<&str>, available: &[Backend]) -> Result<Backend, Error> {
    match requested {
        Some(name) => {
            let backend =
                Backend::from_name(name).ok_or_else(|| Error::UnknownProvider(name.to_string()))?;
            if available.contains(&backend) {
                Ok(backend)
            } else {
                Err(Error::ProviderUnavailable(name.to_string()))
            }
        }
        None => available.first().copied().ok_or(Error::NoProvider),
    }
}

/// 当前系统上可用的后端（按优先顺序）
pub fn available_backends() -> Vec<Backend> {
    Backend::PREFERENCE
        .into_iter()
        .filter(|b| PackageManager::new(*b).is_available())
        .collect()
}
