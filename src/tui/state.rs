use super::debounce::{Debouncer, Tick};
use super::input::{is_printable, Key};
use super::selection::{Navigation, Selection};
use super::theme::Style;
use crate::package_manager::{Package, Provider, SearchResult};
use std::time::{Duration, Instant};

// ========== 状态栏 ==========

pub const PROMPT_TEXT: &str = "Start typing to search.";
pub const SEARCHING_TEXT: &str = "Searching...";
pub const NO_RESULTS_TEXT: &str = "No results found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Prompt,
    Searching,
    Found(usize),
    NoResults,
    /// 后端返回的错误，原样显示
    Failed(String),
    Installed(String),
    InstallFailed(String),
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Prompt => PROMPT_TEXT.to_string(),
            Status::Searching => SEARCHING_TEXT.to_string(),
            Status::Found(1) => "Found 1 result.".to_string(),
            Status::Found(n) => format!("Found {n} results."),
            Status::NoResults => NO_RESULTS_TEXT.to_string(),
            Status::Failed(msg) => msg.clone(),
            Status::Installed(name) => format!("Successfully installed {name}"),
            Status::InstallFailed(name) => format!("Installation of {name} may have failed"),
        }
    }

    /// 状态栏着色
    pub fn tone(&self) -> Style {
        match self {
            Status::Found(_) => Style::Success,
            Status::Searching => Style::Pending,
            Status::Failed(_) | Status::NoResults | Status::InstallFailed(_) => Style::Failure,
            Status::Prompt | Status::Installed(_) => Style::Dim,
        }
    }
}

// ========== 会话状态 ==========

/// 按键处理后需要主循环执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Install,
}

pub struct SessionState {
    pub query: String,
    pub results: Vec<Package>,
    pub selection: Selection,
    pub status: Status,
    pub debounce: Debouncer,
    pub should_quit: bool,
}

impl SessionState {
    pub fn new(page_size: usize, debounce_window: Duration) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            selection: Selection::new(page_size),
            status: Status::Prompt,
            debounce: Debouncer::new(debounce_window),
            should_quit: false,
        }
    }

    pub fn selected_package(&self) -> Option<&Package> {
        self.results.get(self.selection.selected())
    }

    /// 处理一次按键
    pub fn handle_key(&mut self, key: Key, now: Instant) -> Action {
        match key {
            Key::Quit => self.should_quit = true,
            Key::Enter => {
                if !self.results.is_empty() {
                    return Action::Install;
                }
            }
            Key::Up => self.navigate(Navigation::Up),
            Key::Down => self.navigate(Navigation::Down),
            Key::PageUp => self.navigate(Navigation::PageUp),
            Key::PageDown => self.navigate(Navigation::PageDown),
            Key::Home => self.navigate(Navigation::Home),
            Key::End => self.navigate(Navigation::End),
            Key::Backspace => self.delete_back(now),
            Key::Escape => self.clear_query(),
            Key::Char(c) => self.insert_char(c, now),
            Key::Delete => {}
        }
        Action::None
    }

    fn navigate(&mut self, nav: Navigation) {
        self.selection.apply(nav, self.results.len());
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        if is_printable(c) {
            self.query.push(c);
            self.debounce.mark(now);
        }
    }

    pub fn delete_back(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.debounce.mark(now);
        }
    }

    /// Esc：立即清空，不经过防抖
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.debounce.cancel();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.results.clear();
        self.selection.reset();
        self.status = Status::Prompt;
    }

    /// 每个循环周期调用一次；触发时同步执行搜索，返回是否执行了搜索
    pub fn tick(&mut self, provider: &dyn Provider, now: Instant) -> bool {
        match self.debounce.poll(now) {
            Tick::Idle => false,
            Tick::Waiting => {
                self.status = Status::Searching;
                false
            }
            Tick::Fire => {
                self.run_search(provider);
                true
            }
        }
    }

    pub fn run_search(&mut self, provider: &dyn Provider) {
        if self.query.is_empty() {
            self.reset_results();
            return;
        }
        log::info!("searching {} for {:?}", provider.name(), self.query);
        let result = provider.search(&self.query);
        self.apply_search_result(result);
    }

    /// 出错时保留上一次的列表和选中位置，只更新状态栏
    pub fn apply_search_result(&mut self, result: SearchResult) {
        if let Some(error) = result.error {
            log::warn!("search for {:?} failed: {}", self.query, error);
            self.status = Status::Failed(error);
            return;
        }

        self.results = result.packages;
        self.selection.reset();
        self.status = if self.results.is_empty() {
            Status::NoResults
        } else {
            Status::Found(self.results.len())
        };
        log::info!("{} results for {:?}", self.results.len(), self.query);
    }

    /// 安装结束后更新当前选中项
    pub fn finish_install(&mut self, success: bool) {
        let index = self.selection.selected();
        let Some(pkg) = self.results.get_mut(index) else {
            return;
        };
        if success {
            pkg.installed = true;
            self.status = Status::Installed(pkg.name.clone());
        } else {
            self.status = Status::InstallFailed(pkg.name.clone());
        }
    }
}
