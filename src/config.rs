/// What 8XYE leaves in VF
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShiftFlag {
    /// VF = 1 if the most significant bit was shifted out, else 0
    Carry,
    /// VF = Vx & 0x80; matches ROMs written against interpreters that never normalised it
    RawHighBit,
}

/// Behavioural switches for the interpreter
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub shl_flag: ShiftFlag,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shl_flag: ShiftFlag::Carry,
        }
    }
}
