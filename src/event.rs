use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, MouseEvent};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// The alien spawn timer fired.
    SpawnAlien,
    Tick,
}

/// Where terminal input comes from.
pub trait InputSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<event::Event>;
}

/// The real terminal, through crossterm.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<event::Event> {
        event::read()
    }
}

/// Recurring timer, checked by the poll loop rather than run on its own
/// thread.
struct Timer {
    period: Duration,
    next: Instant,
}

impl Timer {
    fn new(period: Duration, now: Instant) -> Self {
        Self { period, next: now + period }
    }

    fn fire_if_due(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next = now + self.period;
            true
        } else {
            false
        }
    }
}

/// Single-threaded event source: terminal input, frame ticks and the alien
/// spawn timer.
pub struct EventHandler<S = TerminalInput> {
    source: S,
    tick: Timer,
    spawn: Timer,
}

impl EventHandler<TerminalInput> {
    pub fn new(tick_rate_ms: u64, spawn_interval: Duration) -> Self {
        Self::with_source(TerminalInput, tick_rate_ms, spawn_interval)
    }
}

impl<S: InputSource> EventHandler<S> {
    pub fn with_source(source: S, tick_rate_ms: u64, spawn_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            source,
            tick: Timer::new(Duration::from_millis(tick_rate_ms.max(1)), now),
            spawn: Timer::new(spawn_interval, now),
        }
    }

    /// Restart the spawn timer with a new period.
    pub fn set_spawn_interval(&mut self, interval: Duration) {
        self.spawn = Timer::new(interval, Instant::now());
    }

    pub fn next(&mut self) -> io::Result<Event> {
        loop {
            // Input already queued goes first, so a slow frame cannot
            // starve it behind overdue timers.
            if self.source.poll(Duration::ZERO)? {
                if let Some(event) = self.read_input()? {
                    return Ok(event);
                }
                continue;
            }

            let now = Instant::now();
            if self.spawn.fire_if_due(now) {
                return Ok(Event::SpawnAlien);
            }
            if self.tick.fire_if_due(now) {
                return Ok(Event::Tick);
            }

            let deadline = self.tick.next.min(self.spawn.next);
            if self.source.poll(deadline.saturating_duration_since(now))? {
                if let Some(event) = self.read_input()? {
                    return Ok(event);
                }
            }
        }
    }

    fn read_input(&mut self) -> io::Result<Option<Event>> {
        Ok(match self.source.read()? {
            event::Event::Key(key) => Some(Event::Key(key)),
            event::Event::Mouse(mouse) => Some(Event::Mouse(mouse)),
            event::Event::Resize(_, _) => Some(Event::Resize),
            _ => None,
        })
    }
}
