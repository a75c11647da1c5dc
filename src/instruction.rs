use std::fmt;

use crate::opcode::Opcode;

/// # Instruction
/// A decoded opcode. Register operands are indices into V0..VF, `nn` is an
/// 8-bit immediate and `addr` a 12-bit address.
///
/// Anything outside the base instruction set decodes to `Unknown` so that the
/// machine can decide what to do with it rather than the decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 0NNN, executed as a plain jump
    Sys { addr: u16 },
    /// 1NNN
    Jp { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SeByte { x: u8, nn: u8 },
    /// 4XNN
    SneByte { x: u8, nn: u8 },
    /// 5XY0
    SeReg { x: u8, y: u8 },
    /// 6XNN
    LdByte { x: u8, nn: u8 },
    /// 7XNN
    AddByte { x: u8, nn: u8 },
    /// 8XY0
    LdReg { x: u8, y: u8 },
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
    Shr { x: u8 },
    /// 8XY7
    Subn { x: u8, y: u8 },
    /// 8XYE
    Shl { x: u8 },
    /// 9XY0
    SneReg { x: u8, y: u8 },
    /// ANNN
    LdI { addr: u16 },
    /// BNNN
    JpV0 { addr: u16 },
    /// CXNN
    Rnd { x: u8, nn: u8 },
    /// DXYN
    Drw { x: u8, y: u8, n: u8 },
    /// EX9E
    Skp { x: u8 },
    /// EXA1
    Sknp { x: u8 },
    /// FX07
    LdVxDt { x: u8 },
    /// FX0A
    LdVxKey { x: u8 },
    /// FX15
    LdDtVx { x: u8 },
    /// FX18
    LdStVx { x: u8 },
    /// FX1E
    AddI { x: u8 },
    /// FX29
    LdFont { x: u8 },
    /// FX33
    LdBcd { x: u8 },
    /// FX55
    Store { x: u8 },
    /// FX65
    Load { x: u8 },
    Unknown(u16),
}

impl Instruction {
    /// Decodes a raw opcode. Decoding is total: every word maps to exactly one variant.
    pub fn decode(op: u16) -> Self {
        use crate::instruction::Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            // native routines live above the interpreter page, 00NN is never one
            (0x0, 0x0, ..) => Unknown(op),
            (0x0, ..) => Sys { addr },
            (0x1, ..) => Jp { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SeByte { x, nn },
            (0x4, ..) => SneByte { x, nn },
            (0x5, .., 0x0) => SeReg { x, y },
            (0x6, ..) => LdByte { x, nn },
            (0x7, ..) => AddByte { x, nn },
            (0x8, .., 0x0) => LdReg { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x },
            (0x9, .., 0x0) => SneReg { x, y },
            (0xA, ..) => LdI { addr },
            (0xB, ..) => JpV0 { addr },
            (0xC, ..) => Rnd { x, nn },
            (0xD, ..) => Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skp { x },
            (0xE, _, 0xA, 0x1) => Sknp { x },
            (0xF, _, 0x0, 0x7) => LdVxDt { x },
            (0xF, _, 0x0, 0xA) => LdVxKey { x },
            (0xF, _, 0x1, 0x5) => LdDtVx { x },
            (0xF, _, 0x1, 0x8) => LdStVx { x },
            (0xF, _, 0x1, 0xE) => AddI { x },
            (0xF, _, 0x2, 0x9) => LdFont { x },
            (0xF, _, 0x3, 0x3) => LdBcd { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Load { x },
            _ => Unknown(op),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::instruction::Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Jp { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SeByte { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SneByte { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdByte { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddByte { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x } => write!(f, "SHR V{:X}", x),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x } => write!(f, "SHL V{:X}", x),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { addr } => write!(f, "LD I, {:#05X}", addr),
            JpV0 { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rnd { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            LdVxKey { x } => write!(f, "LD V{:X}, K", x),
            LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdFont { x } => write!(f, "LD F, V{:X}", x),
            LdBcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Load { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {:04X}", op),
        }
    }
}
