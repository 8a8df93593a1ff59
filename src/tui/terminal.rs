//! 终端适配层：原始模式、按键读取、整帧输出、信号

use super::input::Key;
use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};
use std::io::{self, BufWriter, Stdout, Write};
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

/// 尺寸查询失败时的默认值 (rows, cols)
pub const DEFAULT_DIMENSIONS: (u16, u16) = (24, 80);

/// 持有原始模式的终端句柄，析构时恢复终端
pub struct Terminal<W: Write = BufWriter<Stdout>> {
    out: W,
    raw: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self::with_writer(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> Terminal<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out, raw: false }
    }

    /// 进入原始模式并隐藏光标，重复调用无副作用
    pub fn enter(&mut self) -> io::Result<()> {
        if self.raw {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.raw = true;
        self.out.execute(cursor::Hide)?;
        Ok(())
    }

    /// 恢复终端，未进入时调用也安全。
    ///
    /// 先恢复终端模式再显示光标，输出失败不会让终端停留在原始模式。
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        self.raw = false;
        self.out.execute(cursor::Show)?;
        Ok(())
    }

    /// 最多等待 `timeout` 读取一个按键；读取失败视为没有按键
    pub fn read_key(&mut self, timeout: Duration) -> Option<Key> {
        match event::poll(timeout) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                log::debug!("poll failed: {}", e);
                return None;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => Key::from_event(key),
            Ok(_) => None,
            Err(e) => {
                log::debug!("read failed: {}", e);
                None
            }
        }
    }

    /// 一次写入整帧并刷新
    pub fn render(&mut self, frame: &str) -> io::Result<()> {
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.render(super::theme::HOME_AND_CLEAR)
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (u16, u16) {
        terminal::size()
            .map(|(cols, rows)| (rows, cols))
            .unwrap_or(DEFAULT_DIMENSIONS)
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.out.flush();
        let _ = self.leave();
    }
}

// ========== 信号 ==========

/// 最近收到的终止类信号，0 表示没有
static PENDING_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_signal(signal: libc::c_int) {
    PENDING_SIGNAL.store(signal, Ordering::SeqCst);
}

/// 安装 SIGTERM / SIGHUP / SIGINT 处理函数，只记录信号，由主循环退出
pub fn install_signal_handlers() {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGTERM, libc::SIGHUP, libc::SIGINT] {
        // SAFETY: 处理函数只做一次原子写入，是异步信号安全的
        let previous = unsafe { libc::signal(signal, handler) };
        if previous == libc::SIG_ERR {
            log::warn!("failed to install handler for signal {}", signal);
        }
    }
}

pub fn termination_requested() -> bool {
    PENDING_SIGNAL.load(Ordering::SeqCst) != 0
}

/// 清除安装期间由 Ctrl-C 产生的 SIGINT，其他信号保留
pub fn clear_interrupt() {
    let _ = PENDING_SIGNAL.compare_exchange(libc::SIGINT, 0, Ordering::SeqCst, Ordering::SeqCst);
}

/// panic 时先恢复终端再打印信息
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = io::stdout().execute(cursor::Show);
        let _ = terminal::disable_raw_mode();
        previous(info);
    }));
}
