use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 用户配置，所有字段均可省略
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 固定使用的后端，None 时自动探测
    pub provider: Option<String>,
    pub debounce_ms: u64,
    pub page_size: usize,
    pub description_width: usize,
    pub color: bool,
    /// 日志文件路径，未设置时日志默认关闭
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            debounce_ms: 400,
            page_size: 10,
            description_width: 62,
            color: true,
            log_file: None,
        }
    }
}

impl Config {
    /// 默认配置文件位置: ~/.config/paclook/config.toml
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/paclook/config.toml")
    }

    pub fn load_or_default() -> Result<Self, Error> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// 把不合理的数值拉回可用范围
    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.description_width = self.description_width.max(4);
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// 配置开启且未设置 NO_COLOR 时才输出颜色
    pub fn color_enabled(&self) -> bool {
        self.color && std::env::var_os("NO_COLOR").is_none()
    }
}
