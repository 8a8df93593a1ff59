//! 反向列表的选中 / 滚动状态机
//!
//! 下标 0 显示在最下方（紧挨输入行），下标越大越靠上。
//! 因此 Up 让下标增大，Down 让下标减小。

use std::ops::Range;

/// 导航事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Down,
    PageUp,
    PageDown,
    /// 跳到视觉最上方（最大下标）
    Home,
    /// 跳到视觉最下方（下标 0）
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    selected: usize,
    scroll: usize,
    page_size: usize,
}

impl Selection {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected: 0,
            scroll: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    /// 在长度为 `len` 的列表上应用一次导航，空列表时不做任何事
    pub fn apply(&mut self, nav: Navigation, len: usize) {
        if len == 0 {
            return;
        }
        match nav {
            Navigation::Up => self.up(len),
            Navigation::Down => self.down(),
            Navigation::PageUp => self.page_up(len),
            Navigation::PageDown => self.page_down(),
            Navigation::Home => self.home(len),
            Navigation::End => self.reset(),
        }
    }

    fn up(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
            if self.selected >= self.scroll + self.page_size {
                self.scroll = self.selected + 1 - self.page_size;
            }
        }
    }

    fn down(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll {
                self.scroll = self.selected;
            }
        }
    }

    // 选中和滚动分别钳制，起始状态满足可见性时结果仍然可见
    fn page_up(&mut self, len: usize) {
        self.selected = (self.selected + self.page_size).min(len - 1);
        self.scroll = (self.scroll + self.page_size).min(max_scroll(len, self.page_size));
    }

    fn page_down(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size);
        self.scroll = self.scroll.saturating_sub(self.page_size);
    }

    fn home(&mut self, len: usize) {
        self.selected = len - 1;
        self.scroll = max_scroll(len, self.page_size);
    }

    /// 当前页覆盖的下标区间（升序）
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.scroll.min(len);
        let end = (self.scroll + self.page_size).min(len);
        start..end
    }
}

fn max_scroll(len: usize, page_size: usize) -> usize {
    len.saturating_sub(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: usize = 10;

    fn at(selected: usize, scroll: usize) -> Selection {
        Selection {
            selected,
            scroll,
            page_size: PAGE,
        }
    }

    fn assert_visible(sel: &Selection, len: usize) {
        assert!(sel.selected < len, "selected {} out of {}", sel.selected, len);
        assert!(sel.scroll <= sel.selected, "{:?}", sel);
        assert!(sel.selected < sel.scroll + sel.page_size, "{:?}", sel);
        assert!(sel.scroll <= max_scroll(len, sel.page_size), "{:?}", sel);
    }

    #[test]
    fn up_saturates_at_top() {
        for len in 1..30 {
            let mut sel = Selection::new(PAGE);
            sel.apply(Navigation::Home, len);
            let before = sel;
            sel.apply(Navigation::Up, len);
            assert_eq!(sel, before);
        }
    }

    #[test]
    fn down_saturates_at_bottom() {
        let mut sel = Selection::new(PAGE);
        sel.apply(Navigation::Down, 5);
        assert_eq!(sel, at(0, 0));
    }

    #[test]
    fn up_scrolls_once_past_the_page() {
        let mut sel = Selection::new(PAGE);
        for _ in 0..9 {
            sel.apply(Navigation::Up, 25);
        }
        assert_eq!(sel, at(9, 0));
        sel.apply(Navigation::Up, 25);
        assert_eq!(sel, at(10, 1));
    }

    #[test]
    fn down_pulls_scroll_with_it() {
        let mut sel = at(15, 15);
        sel.apply(Navigation::Down, 25);
        assert_eq!(sel, at(14, 14));
    }

    #[test]
    fn home_on_25_results() {
        let mut sel = Selection::new(PAGE);
        sel.apply(Navigation::Home, 25);
        assert_eq!((sel.selected(), sel.scroll()), (24, 15));
    }

    #[test]
    fn home_end_are_idempotent() {
        for len in [1, 3, 10, 11, 25] {
            let mut sel = at(0, 0);
            for _ in 0..3 {
                sel.apply(Navigation::Home, len);
                assert_eq!(sel, at(len - 1, len.saturating_sub(PAGE)));
                sel.apply(Navigation::End, len);
                assert_eq!(sel, at(0, 0));
            }
        }
    }

    #[test]
    fn page_moves_clamp_independently() {
        let mut sel = at(3, 0);
        sel.apply(Navigation::PageUp, 25);
        assert_eq!(sel, at(13, 10));
        sel.apply(Navigation::PageUp, 25);
        assert_eq!(sel, at(23, 15));
        sel.apply(Navigation::PageUp, 25);
        assert_eq!(sel, at(24, 15));
        sel.apply(Navigation::PageDown, 25);
        assert_eq!(sel, at(14, 5));
        sel.apply(Navigation::PageDown, 25);
        assert_eq!(sel, at(4, 0));
        sel.apply(Navigation::PageDown, 25);
        assert_eq!(sel, at(0, 0));
    }

    #[test]
    fn short_list_never_scrolls() {
        let mut sel = Selection::new(PAGE);
        sel.apply(Navigation::PageUp, 4);
        assert_eq!(sel, at(3, 0));
        sel.apply(Navigation::Home, 4);
        assert_eq!(sel, at(3, 0));
    }

    #[test]
    fn empty_list_is_a_no_op() {
        for nav in [
            Navigation::Up,
            Navigation::Down,
            Navigation::PageUp,
            Navigation::PageDown,
            Navigation::Home,
            Navigation::End,
        ] {
            let mut sel = Selection::new(PAGE);
            sel.apply(nav, 0);
            assert_eq!(sel, at(0, 0));
        }
    }

    #[test]
    fn selection_stays_on_the_visible_page() {
        let navs = [
            Navigation::Up,
            Navigation::Down,
            Navigation::PageUp,
            Navigation::PageDown,
            Navigation::Home,
            Navigation::End,
        ];
        // 线性同余序列，保证可重复
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for len in 1..40 {
            let mut sel = Selection::new(PAGE);
            for _ in 0..500 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let nav = navs[(seed >> 33) as usize % navs.len()];
                sel.apply(nav, len);
                assert_visible(&sel, len);
            }
        }
    }

    #[test]
    fn visible_range_tracks_scroll() {
        assert_eq!(at(0, 0).visible_range(3), 0..3);
        assert_eq!(at(24, 15).visible_range(25), 15..25);
        assert_eq!(at(12, 5).visible_range(25), 5..15);
        assert_eq!(Selection::new(PAGE).visible_range(0), 0..0);
    }
}
