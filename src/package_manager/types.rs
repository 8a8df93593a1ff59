//! 包管理器相关数据类型定义

/// 搜索结果条目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub description: String,
    /// 仓库 / 来源标签，如 "core"、"aur"、"cask"
    pub source: String,
    pub installed: bool,
}

impl Package {
    /// 去重用的身份：(name, source)
    pub fn same_identity(&self, other: &Package) -> bool {
        self.name == other.name && self.source == other.source
    }
}

/// 一次搜索的返回值
///
/// `error` 存在时 `packages` 按约定为空，但两者并不互斥，
/// 会话层在出错时整体忽略 `packages`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub packages: Vec<Package>,
    pub error: Option<String>,
}

impl SearchResult {
    pub fn found(packages: Vec<Package>) -> Self {
        Self {
            packages,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            packages: Vec::new(),
            error: Some(message.into()),
        }
    }
}
