//! 帧渲染：会话状态 → 一整帧终端输出
//!
//! 纯函数，不做任何 I/O。

use super::state::SessionState;
use super::theme::{fg, style, Style, ERASE_LINE, HOME_AND_CLEAR};
use crate::package_manager::{Package, Provider};

const SEPARATOR_WIDTH: usize = 66;
const DESCRIPTION_INDENT: &str = "         ";
const LEGEND_TAIL: &str = "↑↓: navigate  |  Enter: install  |  Ctrl+X: quit";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    /// 终端列数
    pub width: usize,
    pub description_width: usize,
}

/// 按字符截断，超长时以 "..." 结尾
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

struct Line<'a> {
    out: &'a mut String,
    reset: String,
    /// 每段样式重置后需要恢复的底色（选中行为反色）
    base: String,
}

impl Line<'_> {
    fn push(&mut self, prefix: &str, text: &str) {
        self.out.push_str(&self.base);
        self.out.push_str(prefix);
        self.out.push_str(text);
        self.out.push_str(&self.reset);
    }

    fn end(self) {
        self.out.push_str(&self.reset);
        self.out.push_str(ERASE_LINE);
        self.out.push_str("\r\n");
    }
}

fn entry(out: &mut String, pkg: &Package, selected: bool, provider: &dyn Provider, opts: &RenderOptions) {
    let base = if selected {
        style(Style::Reverse, opts.color)
    } else {
        String::new()
    };
    let reset = style(Style::Reset, opts.color);
    let bold = style(Style::Bold, opts.color);

    let mut line = Line {
        out: &mut *out,
        reset: reset.clone(),
        base: base.clone(),
    };
    line.push(&fg(provider.source_color(&pkg.source), opts.color), &format!("[{}]", pkg.source));
    if pkg.installed {
        line.push(&style(Style::Installed, opts.color), " *");
    } else {
        line.push("", "  ");
    }
    line.push(&bold, &format!(" {}", pkg.name));
    line.push("", &format!(" {}", pkg.version));
    line.end();

    let mut line = Line { out, reset, base };
    line.push(
        "",
        &format!("{DESCRIPTION_INDENT}{}", truncate(&pkg.description, opts.description_width)),
    );
    line.end();
}

/// 生成完整的一帧
pub fn frame(state: &SessionState, provider: &dyn Provider, opts: &RenderOptions) -> String {
    let mut out = String::from(HOME_AND_CLEAR);
    let reset = style(Style::Reset, opts.color);
    let dim = style(Style::Dim, opts.color);

    // 下标大的在上方，选中项 0 紧挨状态栏
    let visible = state.selection.visible_range(state.results.len());
    for index in visible.rev() {
        let selected = index == state.selection.selected();
        entry(&mut out, &state.results[index], selected, provider, opts);
    }

    let mut line = Line {
        out: &mut out,
        reset: reset.clone(),
        base: String::new(),
    };
    line.push(&dim, &format!("[{}]", provider.name()));
    line.push(&style(state.status.tone(), opts.color), &format!(" {}", state.status.text()));
    line.end();

    let mut line = Line {
        out: &mut out,
        reset: reset.clone(),
        base: String::new(),
    };
    line.push(&dim, &"─".repeat(SEPARATOR_WIDTH.min(opts.width)));
    line.end();

    let mut line = Line {
        out: &mut out,
        reset: reset.clone(),
        base: String::new(),
    };
    line.push("", &format!("Results: {}  |  {LEGEND_TAIL}", state.results.len()));
    line.end();

    // 输入行不换行，光标停在行尾
    out.push_str(&style(Style::Bold, opts.color));
    out.push_str("Search: ");
    out.push_str(&reset);
    out.push_str(&state.query);
    out.push_str(&reset);
    out.push_str(ERASE_LINE);
    out
}
