use std::time::{Duration, Instant};

/// 每个循环周期的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 没有待执行的搜索
    Idle,
    /// 有待执行的搜索，但静默时间还不够
    Waiting,
    /// 现在执行搜索
    Fire,
}

/// 防抖：最后一次编辑后静默 `window` 才触发搜索
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_edit: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_edit: None,
        }
    }

    /// 记录一次查询编辑
    pub fn mark(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    pub fn cancel(&mut self) {
        self.last_edit = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> Tick {
        match self.last_edit {
            None => Tick::Idle,
            Some(at) if now.saturating_duration_since(at) >= self.window => {
                self.last_edit = None;
                Tick::Fire
            }
            Some(_) => Tick::Waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(400);

    #[test]
    fn idle_without_edits() {
        let mut d = Debouncer::new(WINDOW);
        assert_eq!(d.poll(Instant::now()), Tick::Idle);
        assert!(!d.is_pending());
    }

    #[test]
    fn fires_once_after_quiet_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.mark(t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(399)), Tick::Waiting);
        assert_eq!(d.poll(t0 + WINDOW), Tick::Fire);
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), Tick::Idle);
    }

    #[test]
    fn burst_of_edits_fires_once_timed_from_last() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        let mut fired = 0;
        let mut last = t0;
        // 5 次按键，每次间隔 300ms，每 100ms 轮询一次
        for i in 0..5u64 {
            last = t0 + Duration::from_millis(300 * i);
            d.mark(last);
            for step in 1..3u64 {
                if d.poll(last + Duration::from_millis(100 * step)) == Tick::Fire {
                    fired += 1;
                }
            }
        }
        assert_eq!(fired, 0);
        assert_eq!(d.poll(last + Duration::from_millis(399)), Tick::Waiting);
        assert_eq!(d.poll(last + WINDOW), Tick::Fire);
        assert_eq!(d.poll(last + WINDOW * 2), Tick::Idle);
    }

    #[test]
    fn cancel_drops_pending_search() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.mark(t0);
        d.cancel();
        assert_eq!(d.poll(t0 + WINDOW), Tick::Idle);
    }

    #[test]
    fn clock_skew_does_not_panic() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.mark(t0 + Duration::from_secs(1));
        assert_eq!(d.poll(t0), Tick::Waiting);
    }
}
