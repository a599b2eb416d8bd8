use crate::utils::nibble;

/// The standard operand fields of an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields {
    pub class: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}
impl Fields {
    pub fn from_word(word: u16) -> Self {
        Fields {
            class: nibble(word, 0),
            x: nibble(word, 1),
            y: nibble(word, 2),
            n: nibble(word, 3),
            nn: (word & 0x00FF) as u8,
            nnn: word & 0x0FFF,
        }
    }
}

/// One decoded instruction. Register operands are indices 0..=0xF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    SetImm { x: u8, nn: u8 },
    /// 7XNN
    AddImm { x: u8, nn: u8 },
    /// 8XY0
    Copy { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8 },
    /// 8XY7
    SubRev { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8 },
    /// 9XY0
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    SetIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipKeyDown { x: u8 },
    /// EXA1
    SkipKeyUp { x: u8 },
    /// FX07
    GetDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddIndex { x: u8 },
    /// FX29
    Glyph { x: u8 },
    /// FX33
    StoreBcd { x: u8 },
    /// FX55
    StoreRegs { x: u8 },
    /// FX65
    LoadRegs { x: u8 },
    Unknown(u16),
}

pub fn decode(word: u16) -> Instruction {
    let Fields { class, x, y, n, nn, nnn } = Fields::from_word(word);
    match (class, n) {
        (0x0, _) => match nnn {
            0x0E0 => Instruction::Clear,
            0x0EE => Instruction::Return,
            // machine routines (0NNN) are not supported
            _ => Instruction::Unknown(word),
        },
        (0x1, _) => Instruction::Jump(nnn),
        (0x2, _) => Instruction::Call(nnn),
        (0x3, _) => Instruction::SkipEqImm { x, nn },
        (0x4, _) => Instruction::SkipNeImm { x, nn },
        (0x5, 0x0) => Instruction::SkipEqReg { x, y },
        (0x6, _) => Instruction::SetImm { x, nn },
        (0x7, _) => Instruction::AddImm { x, nn },
        (0x8, 0x0) => Instruction::Copy { x, y },
        (0x8, 0x1) => Instruction::Or { x, y },
        (0x8, 0x2) => Instruction::And { x, y },
        (0x8, 0x3) => Instruction::Xor { x, y },
        (0x8, 0x4) => Instruction::AddReg { x, y },
        (0x8, 0x5) => Instruction::Sub { x, y },
        (0x8, 0x6) => Instruction::ShiftRight { x },
        (0x8, 0x7) => Instruction::SubRev { x, y },
        (0x8, 0xE) => Instruction::ShiftLeft { x },
        (0x9, 0x0) => Instruction::SkipNeReg { x, y },
        (0xA, _) => Instruction::SetIndex(nnn),
        (0xB, _) => Instruction::JumpOffset(nnn),
        (0xC, _) => Instruction::Random { x, nn },
        (0xD, _) => Instruction::Draw { x, y, n },
        (0xE, _) => match nn {
            0x9E => Instruction::SkipKeyDown { x },
            0xA1 => Instruction::SkipKeyUp { x },
            _ => Instruction::Unknown(word),
        },
        (0xF, _) => match nn {
            0x07 => Instruction::GetDelay { x },
            0x0A => Instruction::WaitKey { x },
            0x15 => Instruction::SetDelay { x },
            0x18 => Instruction::SetSound { x },
            0x1E => Instruction::AddIndex { x },
            0x29 => Instruction::Glyph { x },
            0x33 => Instruction::StoreBcd { x },
            0x55 => Instruction::StoreRegs { x },
            0x65 => Instruction::LoadRegs { x },
            _ => Instruction::Unknown(word),
        },
        _ => Instruction::Unknown(word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fields() {
        let f = Fields::from_word(0xD12F);
        assert_eq!(f.class, 0xD);
        assert_eq!(f.x, 0x1);
        assert_eq!(f.y, 0x2);
        assert_eq!(f.n, 0xF);
        assert_eq!(f.nn, 0x2F);
        assert_eq!(f.nnn, 0x12F);
    }
    #[test]
    fn decode_control_flow() {
        assert_eq!(decode(0x00E0), Instruction::Clear);
        assert_eq!(decode(0x00EE), Instruction::Return);
        assert_eq!(decode(0x1A5F), Instruction::Jump(0xA5F));
        assert_eq!(decode(0x2A5F), Instruction::Call(0xA5F));
        assert_eq!(decode(0xB123), Instruction::JumpOffset(0x123));
    }
    #[test]
    fn decode_alu() {
        assert_eq!(decode(0x8120), Instruction::Copy { x: 1, y: 2 });
        assert_eq!(decode(0x8124), Instruction::AddReg { x: 1, y: 2 });
        assert_eq!(decode(0x8125), Instruction::Sub { x: 1, y: 2 });
        assert_eq!(decode(0x8126), Instruction::ShiftRight { x: 1 });
        assert_eq!(decode(0x8127), Instruction::SubRev { x: 1, y: 2 });
        assert_eq!(decode(0x812E), Instruction::ShiftLeft { x: 1 });
    }
    #[test]
    fn decode_misc() {
        assert_eq!(decode(0xD125), Instruction::Draw { x: 1, y: 2, n: 5 });
        assert_eq!(decode(0xE39E), Instruction::SkipKeyDown { x: 3 });
        assert_eq!(decode(0xE3A1), Instruction::SkipKeyUp { x: 3 });
        assert_eq!(decode(0xF40A), Instruction::WaitKey { x: 4 });
        assert_eq!(decode(0xF433), Instruction::StoreBcd { x: 4 });
        assert_eq!(decode(0xF465), Instruction::LoadRegs { x: 4 });
    }
    #[test]
    fn decode_unknown() {
        assert_eq!(decode(0x0123), Instruction::Unknown(0x0123));
        assert_eq!(decode(0x5121), Instruction::Unknown(0x5121));
        assert_eq!(decode(0x8128), Instruction::Unknown(0x8128));
        assert_eq!(decode(0x9121), Instruction::Unknown(0x9121));
        assert_eq!(decode(0xE100), Instruction::Unknown(0xE100));
        assert_eq!(decode(0xF1FF), Instruction::Unknown(0xF1FF));
    }
}
