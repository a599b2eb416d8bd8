use log::{debug, error, trace, warn};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    display::Display,
    errors::{ChipError, LoadError},
    font::FONT,
    globals::{
        ADDR_MASK, FONT_START, GLYPH_SIZE, KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START, RAM_SIZE,
        REG_COUNT, SCREEN_BUFFER_SIZE, STACK_SIZE,
    },
    instruction::{decode, Instruction},
    utils::{bcd, u16_from_two},
};

const DEFAULT_SEED: u64 = 0xC8C8_5EED;
const FLAG: usize = 0xF;

/// Interpreter behaviours that differ between deployed CHIP-8 implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// FX55 / FX65 leave `I` pointing past the last register transferred.
    /// Off by default: `I` is left unchanged.
    pub increment_index: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    /// FX0A found no key down. PC stays on the instruction.
    WaitingForKey,
    /// The word was not a known instruction. It was skipped.
    UnknownOpcode(u16),
}

pub struct Cpu {
    memory: [u8; RAM_SIZE],
    display: Display,
    v: [u8; REG_COUNT],
    pc: u16,
    i: u16,
    sp: usize,
    stack: [u16; STACK_SIZE],
    delay_timer: u8,
    sound_timer: u8,
    keys: [bool; KEY_COUNT],
    redraw: bool,
    waiting_for_key: bool,
    fault: Option<ChipError>,
    quirks: Quirks,
    seed: u64,
    rng: SmallRng,
}
impl Cpu {
    pub fn new() -> Self {
        Cpu::with_seed(DEFAULT_SEED)
    }
    /// Creates a cpu whose `CXNN` random source is seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut cpu = Cpu {
            memory: [0; RAM_SIZE],
            display: Display::new(),
            v: [0; REG_COUNT],
            pc: PROGRAM_START,
            i: 0,
            sp: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            keys: [false; KEY_COUNT],
            redraw: false,
            waiting_for_key: false,
            fault: None,
            quirks: Quirks::default(),
            seed,
            rng: SmallRng::seed_from_u64(seed),
        };
        cpu.reset();
        cpu
    }
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }
    /// Resets the whole machine and copies `data` to the program area.
    /// On error the machine is left reset, holding only the font.
    pub fn load_rom(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.reset();
        if data.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge { size: data.len(), max: MAX_ROM_SIZE });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
        debug!("loaded {} byte rom at {:#05x}", data.len(), PROGRAM_START);
        Ok(())
    }
    fn reset(&mut self) {
        self.memory = [0; RAM_SIZE];
        let font = FONT_START as usize;
        self.memory[font..font + FONT.len()].copy_from_slice(&FONT);
        self.display.clear();
        self.v = [0; REG_COUNT];
        self.pc = PROGRAM_START;
        self.i = 0;
        self.sp = 0;
        self.stack = [0; STACK_SIZE];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.keys = [false; KEY_COUNT];
        self.redraw = true;
        self.waiting_for_key = false;
        self.fault = None;
        self.rng = SmallRng::seed_from_u64(self.seed);
    }
    pub fn get_display_buffer(&self) -> &[u8; SCREEN_BUFFER_SIZE] {
        self.display.get_buffer()
    }
    /// Checks and clears the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        if self.redraw {
            self.redraw = false;
            return true;
        }
        false
    }
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), ChipError> {
        let slot = self.keys.get_mut(key as usize).ok_or(ChipError::IllegalKey(key))?;
        *slot = pressed;
        Ok(())
    }
    /// Keys outside 0..=F are never down.
    pub fn is_key_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }
    /// Counts both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
    /// The host should emit a tone while this is true.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }
    pub fn pc(&self) -> u16 {
        self.pc
    }
    pub fn i(&self) -> u16 {
        self.i
    }
    pub fn sp(&self) -> usize {
        self.sp
    }
    pub fn v(&self) -> &[u8; REG_COUNT] {
        &self.v
    }
    pub fn memory(&self) -> &[u8; RAM_SIZE] {
        &self.memory
    }
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }
    /// The fault that halted the cpu, if any.
    pub fn fault(&self) -> Option<ChipError> {
        self.fault
    }
    /// Fetches, decodes and executes a single instruction.
    /// After a fault every call returns the same error and changes nothing.
    pub fn step(&mut self) -> Result<StepOutcome, ChipError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        let outcome = self.get_current_opcode().and_then(|word| self.execute(word));
        if let Err(e) = outcome {
            error!("cpu halted at {:#05x}: {}", self.pc, e);
            self.fault = Some(e);
        }
        outcome
    }
    fn get_current_opcode(&self) -> Result<u16, ChipError> {
        let addr = self.pc as usize;
        if addr > RAM_SIZE - 2 {
            return Err(ChipError::IllegalAddr(self.pc))
        }
        Ok(u16_from_two(self.memory[addr], self.memory[addr + 1]))
    }
    /// Every check that can fail runs before any state is written,
    /// so a faulting instruction leaves the machine untouched.
    fn execute(&mut self, word: u16) -> Result<StepOutcome, ChipError> {
        let instruction = decode(word);
        trace!("{:#05x}: {:04x} {:?}", self.pc, word, instruction);

        let mut next = self.pc + 2;
        let mut outcome = StepOutcome::Executed;
        match instruction {
            Instruction::Clear => {
                self.display.clear();
                self.redraw = true;
            },
            // the stack holds call sites, so step past the call
            Instruction::Return => next = self.pop_stack()? + 2,
            Instruction::Jump(nnn) => next = nnn,
            Instruction::Call(nnn) => {
                self.push_stack(self.pc)?;
                next = nnn;
            },
            Instruction::SkipEqImm { x, nn } => {
                if self.v[x as usize] == nn { next += 2 }
            },
            Instruction::SkipNeImm { x, nn } => {
                if self.v[x as usize] != nn { next += 2 }
            },
            Instruction::SkipEqReg { x, y } => {
                if self.v[x as usize] == self.v[y as usize] { next += 2 }
            },
            Instruction::SkipNeReg { x, y } => {
                if self.v[x as usize] != self.v[y as usize] { next += 2 }
            },
            Instruction::SetImm { x, nn } => self.v[x as usize] = nn,
            Instruction::AddImm { x, nn } => {
                self.v[x as usize] = self.v[x as usize].wrapping_add(nn);
            },
            Instruction::Copy { x, y } => self.v[x as usize] = self.v[y as usize],
            Instruction::Or { x, y } => self.v[x as usize] |= self.v[y as usize],
            Instruction::And { x, y } => self.v[x as usize] &= self.v[y as usize],
            Instruction::Xor { x, y } => self.v[x as usize] ^= self.v[y as usize],
            Instruction::AddReg { x, y } => {
                let (sum, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
                self.set_with_flag(x, sum, carry);
            },
            Instruction::Sub { x, y } => {
                let (vx, vy) = (self.v[x as usize], self.v[y as usize]);
                self.set_with_flag(x, vx.wrapping_sub(vy), vy > vx);
            },
            Instruction::SubRev { x, y } => {
                let (vx, vy) = (self.v[x as usize], self.v[y as usize]);
                self.set_with_flag(x, vy.wrapping_sub(vx), vx > vy);
            },
            Instruction::ShiftRight { x } => {
                let vx = self.v[x as usize];
                self.set_with_flag(x, vx >> 1, vx & 0x01 != 0);
            },
            Instruction::ShiftLeft { x } => {
                let vx = self.v[x as usize];
                self.set_with_flag(x, vx << 1, vx & 0x80 != 0);
            },
            Instruction::SetIndex(nnn) => self.i = nnn,
            Instruction::JumpOffset(nnn) => next = nnn + self.v[0] as u16,
            Instruction::Random { x, nn } => {
                self.v[x as usize] = self.rng.gen::<u8>() & nn;
            },
            Instruction::Draw { x, y, n } => {
                let start = self.check_range(self.i, n as usize)?;
                let collision = self.display.blit_sprite(
                    self.v[x as usize] as usize,
                    self.v[y as usize] as usize,
                    &self.memory[start..start + n as usize],
                );
                self.v[FLAG] = collision as u8;
                self.redraw = true;
            },
            Instruction::SkipKeyDown { x } => {
                if self.is_key_down(self.v[x as usize]) { next += 2 }
            },
            Instruction::SkipKeyUp { x } => {
                if !self.is_key_down(self.v[x as usize]) { next += 2 }
            },
            Instruction::GetDelay { x } => self.v[x as usize] = self.delay_timer,
            Instruction::WaitKey { x } => match self.keys.iter().position(|down| *down) {
                Some(key) => {
                    if self.waiting_for_key {
                        debug!("key {:x} released wait at {:#05x}", key, self.pc);
                    }
                    self.v[x as usize] = key as u8;
                    self.waiting_for_key = false;
                },
                None => {
                    next = self.pc;
                    self.waiting_for_key = true;
                    outcome = StepOutcome::WaitingForKey;
                },
            },
            Instruction::SetDelay { x } => self.delay_timer = self.v[x as usize],
            Instruction::SetSound { x } => self.sound_timer = self.v[x as usize],
            Instruction::AddIndex { x } => {
                let vx = self.v[x as usize] as u16;
                let overflow = (self.i as u32 + vx as u32) > ADDR_MASK as u32;
                self.i = self.i.wrapping_add(vx);
                self.v[FLAG] = overflow as u8;
            },
            Instruction::Glyph { x } => {
                self.i = FONT_START + GLYPH_SIZE * self.v[x as usize] as u16;
            },
            Instruction::StoreBcd { x } => {
                let start = self.check_range(self.i, 3)?;
                self.memory[start..start + 3].copy_from_slice(&bcd(self.v[x as usize]));
            },
            Instruction::StoreRegs { x } => {
                let len = x as usize + 1;
                let start = self.check_range(self.i, len)?;
                self.memory[start..start + len].copy_from_slice(&self.v[..len]);
                self.advance_index(len);
            },
            Instruction::LoadRegs { x } => {
                let len = x as usize + 1;
                let start = self.check_range(self.i, len)?;
                self.v[..len].copy_from_slice(&self.memory[start..start + len]);
                self.advance_index(len);
            },
            Instruction::Unknown(word) => {
                warn!("unknown opcode {:04x} at {:#05x}", word, self.pc);
                outcome = StepOutcome::UnknownOpcode(word);
            },
        };
        self.pc = next;
        Ok(outcome)
    }
    /// Writes the result first and the flag last, so VF as a destination
    /// ends up holding the flag.
    fn set_with_flag(&mut self, x: u8, val: u8, flag: bool) {
        self.v[x as usize] = val;
        self.v[FLAG] = flag as u8;
    }
    fn advance_index(&mut self, len: usize) {
        if self.quirks.increment_index {
            self.i = self.i.wrapping_add(len as u16);
        }
    }
    /// Returns `addr` as an index if `addr..addr + len` lies inside memory.
    fn check_range(&self, addr: u16, len: usize) -> Result<usize, ChipError> {
        let start = addr as usize;
        if start + len > RAM_SIZE {
            let first_bad = start.max(RAM_SIZE);
            return Err(ChipError::IllegalAddr(first_bad as u16));
        }
        Ok(start)
    }
    fn push_stack(&mut self, val: u16) -> Result<(), ChipError> {
        if self.sp >= STACK_SIZE { return Err(ChipError::StackOverflow) };
        self.stack[self.sp] = val;
        self.sp += 1;
        Ok(())
    }
    fn pop_stack(&mut self) -> Result<u16, ChipError> {
        if self.sp == 0 { return Err(ChipError::StackUnderflow) }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }
}
