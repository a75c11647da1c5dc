/// # Opcodes
///
/// Every instruction is a single big-endian 16-bit word. Reading it as four nibbles:
/// - `[o___]` the family, always part of the decode
/// - `[_x__]` a register index Vx, or the upper bound of the range V0..=Vx
/// - `[__y_]` a second register index Vy
/// - `[___n]` a 4-bit immediate (sprite height) or a sub-operation selector
/// - `[__nn]` an 8-bit immediate, or a sub-operation selector for E and F
/// - `[_nnn]` a 12-bit address
pub trait Opcode {
    /// Assembles an opcode from the two bytes at PC and PC + 1.
    fn from_bytes(hi: u8, lo: u8) -> Self;

    /// The opcode split into `(o, x, y, n)`.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    fn x(&self) -> u8;

    fn y(&self) -> u8;

    fn n(&self) -> u8;

    fn nn(&self) -> u8;

    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn from_bytes(hi: u8, lo: u8) -> Self {
        u16::from(hi) << 8 | u16::from(lo)
    }

    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
