//! 样式查询：语义样式 → ANSI 转义序列
//!
//! 颜色类样式在关闭颜色时返回空串；粗体、暗淡、反色等属性始终输出。

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::Command;

/// 语义样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Reset,
    Bold,
    Dim,
    /// 选中行
    Reverse,
    /// 已安装标记
    Installed,
    /// 搜索成功
    Success,
    /// 搜索等待中
    Pending,
    /// 出错 / 无结果 / 安装失败
    Failure,
}

/// 清除到行尾
pub const ERASE_LINE: &str = "\x1b[K";
/// 光标归位并清屏
pub const HOME_AND_CLEAR: &str = "\x1b[H\x1b[J";

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = command.write_ansi(&mut out);
    out
}

pub fn style(style: Style, color: bool) -> String {
    match style {
        Style::Reset => ansi(SetAttribute(Attribute::Reset)),
        Style::Bold => ansi(SetAttribute(Attribute::Bold)),
        Style::Dim => ansi(SetAttribute(Attribute::Dim)),
        Style::Reverse => ansi(SetAttribute(Attribute::Reverse)),
        Style::Installed | Style::Success => fg(Color::DarkGreen, color),
        Style::Pending => fg(Color::DarkYellow, color),
        Style::Failure => fg(Color::DarkRed, color),
    }
}

/// 前景色，关闭颜色时为空
pub fn fg(color: Color, enabled: bool) -> String {
    if enabled {
        ansi(SetForegroundColor(color))
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_survive_without_color() {
        assert_eq!(style(Style::Reset, false), "\x1b[0m");
        assert_eq!(style(Style::Bold, false), "\x1b[1m");
        assert_eq!(style(Style::Reverse, false), "\x1b[7m");
        assert!(!style(Style::Dim, false).is_empty());
    }

    #[test]
    fn colors_vanish_without_color() {
        for s in [Style::Installed, Style::Success, Style::Pending, Style::Failure] {
            assert!(style(s, false).is_empty());
            assert!(style(s, true).starts_with("\x1b["));
        }
        assert!(fg(Color::Blue, false).is_empty());
    }

    #[test]
    fn tones_are_distinct() {
        let success = style(Style::Success, true);
        let pending = style(Style::Pending, true);
        let failure = style(Style::Failure, true);
        assert_ne!(success, pending);
        assert_ne!(pending, failure);
        assert_ne!(success, failure);
    }
}
