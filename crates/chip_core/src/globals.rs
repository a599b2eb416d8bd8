pub const RAM_SIZE: usize = 4096;
pub const STACK_SIZE: usize = 16;
pub const REG_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// First address available to programs. Everything below is reserved
/// for the interpreter (font sprites).
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = RAM_SIZE - PROGRAM_START as usize;

pub const FONT_START: u16 = 0x000;
pub const GLYPH_SIZE: u16 = 5;

/// Largest value `I` may reach through `FX1E` before VF reports overflow.
pub const ADDR_MASK: u16 = 0x0FFF;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
