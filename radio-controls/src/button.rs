//! Power button that shuts the host down when held
//!
//! The button is wired between a GPIO pin and ground with the internal
//! pull-up enabled, so a pressed button reads low.

use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rppal::gpio::Gpio;
use tracing::{debug, error, info, warn};

use crate::error::Result;

/// How long the button must be held before the host shuts down
pub const DEFAULT_HOLD_TIME: Duration = Duration::from_secs(5);

/// How often the watcher thread samples the pin
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Released,
    Held { since: Instant, fired: bool },
}

/// Press/hold/release state machine
///
/// Fires at most once per hold episode; releasing the button re-arms it.
#[derive(Debug, Clone)]
pub struct HoldDetector {
    hold_time: Duration,
    state: ButtonState,
}

impl HoldDetector {
    pub fn new(hold_time: Duration) -> Self {
        Self {
            hold_time,
            state: ButtonState::Released,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn hold_time(&self) -> Duration {
        self.hold_time
    }

    /// Feed one sample of the button. Returns `true` when the hold
    /// threshold has just been crossed.
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        match (self.state, pressed) {
            (ButtonState::Released, false) => false,
            (ButtonState::Released, true) => {
                self.state = ButtonState::Held {
                    since: now,
                    fired: false,
                };
                self.check_hold(now)
            }
            (ButtonState::Held { .. }, false) => {
                self.state = ButtonState::Released;
                false
            }
            (ButtonState::Held { .. }, true) => self.check_hold(now),
        }
    }

    fn check_hold(&mut self, now: Instant) -> bool {
        match self.state {
            ButtonState::Held {
                since,
                fired: false,
            } if now.saturating_duration_since(since) >= self.hold_time => {
                self.state = ButtonState::Held { since, fired: true };
                true
            }
            _ => false,
        }
    }
}

/// What to do once the button has been held long enough
pub trait ShutdownAction: Send + 'static {
    fn shutdown(&mut self);
}

/// Host command run on shutdown, `sudo shutdown -h now` by default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownCommand {
    program: String,
    args: Vec<String>,
}

impl ShutdownCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(Self::new(program, words))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for ShutdownCommand {
    fn default() -> Self {
        Self::new("sudo", ["shutdown", "-h", "now"])
    }
}

impl ShutdownAction for ShutdownCommand {
    // Fire and forget: the outcome of the command is not consulted.
    fn shutdown(&mut self) {
        info!(program = %self.program, args = ?self.args, "Running shutdown command");
        match Command::new(&self.program).args(&self.args).spawn() {
            Ok(child) => debug!(pid = child.id(), "Shutdown command started"),
            Err(e) => error!("Failed to run shutdown command: {}", e),
        }
    }
}

/// Background watcher for the power button
#[derive(Debug)]
pub struct PowerButton {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PowerButton {
    /// Watch BCM pin `bcm_pin` and run `action` after `hold_time`
    pub fn watch<A: ShutdownAction>(bcm_pin: u8, hold_time: Duration, action: A) -> Result<Self> {
        let pin = Gpio::new()?.get(bcm_pin)?.into_input_pullup();
        info!(pin = bcm_pin, hold_secs = hold_time.as_secs_f32(), "Power button armed");
        Self::spawn(move || pin.is_low(), hold_time, action)
    }

    /// Watch an arbitrary pressed-state source
    pub fn spawn<P, A>(mut is_pressed: P, hold_time: Duration, mut action: A) -> Result<Self>
    where
        P: FnMut() -> bool + Send + 'static,
        A: ShutdownAction,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("power-button".to_string())
            .spawn(move || {
                let mut detector = HoldDetector::new(hold_time);
                while !stop_flag.load(Ordering::Relaxed) {
                    if detector.update(is_pressed(), Instant::now()) {
                        warn!("Power button held for {:?}, shutting down", hold_time);
                        action.shutdown();
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                debug!("Power button watcher stopped");
            })?;

        Ok(Self { stop, handle })
    }

    /// Stop watching and wait for the watcher thread to exit
    pub fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            error!("Power button watcher panicked");
        }
    }
}
