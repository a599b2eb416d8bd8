use std::time::{Duration, Instant};

use chip_core::Cpu;
use log::{error, info, warn};
use winit::keyboard::KeyCode;

use crate::{audio::Device, clock::Clock, keymap::key_index};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostState {
    /// Nothing loaded yet.
    Idle,
    Running,
    /// The rom is loaded again on the next update.
    ReloadRequested,
    /// The cpu faulted, or the rom would not load. Only a reload leaves this.
    Halted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    RomLoaded,
    LoadFailed,
    ReloadPressed,
    Faulted,
}

impl HostState {
    pub fn next(self, event: HostEvent) -> HostState {
        match (self, event) {
            (HostState::Idle | HostState::ReloadRequested, HostEvent::RomLoaded) => HostState::Running,
            (_, HostEvent::LoadFailed) => HostState::Halted,
            (HostState::Running | HostState::Halted, HostEvent::ReloadPressed) => HostState::ReloadRequested,
            (HostState::Running, HostEvent::Faulted) => HostState::Halted,
            (state, _) => state,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Drives the cpu from wall-clock time and forwards host input to it.
pub struct Emulator {
    cpu: Cpu,
    rom: Vec<u8>,
    state: HostState,
    clock: Clock,
    last_update: Instant,
    tone: Option<Device>,
}
impl Emulator {
    pub fn new(cpu: Cpu, rom: Vec<u8>, clock: Clock, tone: Option<Device>) -> Self {
        Emulator {
            cpu,
            rom,
            state: HostState::Idle,
            clock,
            last_update: Instant::now(),
            tone,
        }
    }
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
    pub fn state(&self) -> HostState {
        self.state
    }
    fn transition(&mut self, event: HostEvent) {
        let next = self.state.next(event);
        if next != self.state {
            info!("{:?} -> {:?} ({:?})", self.state, next, event);
            self.state = next;
        }
    }
    /// Runs whatever the elapsed time calls for.
    /// Returns true when the frame needs repainting.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.run_for(elapsed);
        self.cpu.take_redraw()
    }
    fn run_for(&mut self, elapsed: Duration) {
        match self.state {
            HostState::Idle | HostState::ReloadRequested => self.load(),
            HostState::Running => {
                let (steps, ticks) = self.clock.advance(elapsed);
                for _ in 0..steps {
                    if self.cpu.step().is_err() {
                        self.transition(HostEvent::Faulted);
                        break;
                    }
                }
                for _ in 0..ticks {
                    self.cpu.tick_timers();
                }
            },
            HostState::Halted => (),
        }
        self.update_tone();
    }
    fn load(&mut self) {
        match self.cpu.load_rom(&self.rom) {
            Ok(()) => {
                self.clock.reset();
                self.transition(HostEvent::RomLoaded);
            },
            Err(e) => {
                error!("{}", e);
                self.transition(HostEvent::LoadFailed);
            }
        }
    }
    fn update_tone(&mut self) {
        let active = self.state == HostState::Running && self.cpu.sound_active();
        let Some(tone) = self.tone.as_mut() else { return };
        if active && !tone.is_playing() {
            tone.beep();
        } else if !active && tone.is_playing() {
            tone.stop();
        }
    }
    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) -> Control {
        match code {
            KeyCode::Escape if pressed => return Control::Exit,
            KeyCode::F1 if pressed => self.transition(HostEvent::ReloadPressed),
            _ => {
                if let Some(key) = key_index(code) {
                    if let Err(e) = self.cpu.set_key(key, pressed) {
                        warn!("{}", e);
                    }
                }
            }
        }
        Control::Continue
    }
}
