use rand::Rng;

use crate::config::{Config, ShiftFlag};
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START};
use crate::error::MachineError;
use crate::instruction::Instruction;
use crate::state::{Flow, Keypad, Mode, State};

/// Runs a single decoded instruction against `state`.
///
/// The returned `Flow` says where the program counter goes next; the caller
/// applies it. On error the state is left exactly as it was.
pub fn execute<R: Rng>(
    instruction: Instruction,
    state: &mut State,
    keys: &Keypad,
    config: &Config,
    rng: &mut R,
) -> Result<Flow, MachineError> {
    use crate::instruction::Instruction::*;

    let flow = match instruction {
        Cls => cls(state),
        Ret => ret(state)?,
        Sys { addr } | Jp { addr } => Flow::Jump(addr),
        Call { addr } => call(state, addr)?,
        SeByte { x, nn } => skip_if(state.v[x as usize] == nn),
        SneByte { x, nn } => skip_if(state.v[x as usize] != nn),
        SeReg { x, y } => skip_if(state.v[x as usize] == state.v[y as usize]),
        LdByte { x, nn } => {
            state.v[x as usize] = nn;
            Flow::Next
        }
        AddByte { x, nn } => {
            state.v[x as usize] = state.v[x as usize].wrapping_add(nn);
            Flow::Next
        }
        LdReg { x, y } => {
            state.v[x as usize] = state.v[y as usize];
            Flow::Next
        }
        Or { x, y } => {
            state.v[x as usize] |= state.v[y as usize];
            Flow::Next
        }
        And { x, y } => {
            state.v[x as usize] &= state.v[y as usize];
            Flow::Next
        }
        Xor { x, y } => {
            state.v[x as usize] ^= state.v[y as usize];
            Flow::Next
        }
        AddReg { x, y } => add(state, x, y),
        Sub { x, y } => sub(state, x, y),
        Shr { x } => shr(state, x),
        Subn { x, y } => subn(state, x, y),
        Shl { x } => shl(state, x, config.shl_flag),
        SneReg { x, y } => skip_if(state.v[x as usize] != state.v[y as usize]),
        LdI { addr } => {
            state.i = addr;
            Flow::Next
        }
        JpV0 { addr } => Flow::Jump(addr + u16::from(state.v[0x0])),
        Rnd { x, nn } => {
            state.v[x as usize] = rng.gen::<u8>() & nn;
            Flow::Next
        }
        Drw { x, y, n } => draw(state, x, y, n),
        Skp { x } => skip_if(keys[key_index(state, x)]),
        Sknp { x } => skip_if(!keys[key_index(state, x)]),
        LdVxDt { x } => {
            state.v[x as usize] = state.delay_timer;
            Flow::Next
        }
        LdVxKey { x } => {
            state.mode = Mode::AwaitingKey { register: x };
            Flow::Wait
        }
        LdDtVx { x } => {
            state.delay_timer = state.v[x as usize];
            Flow::Next
        }
        LdStVx { x } => {
            state.sound_timer = state.v[x as usize];
            Flow::Next
        }
        AddI { x } => {
            state.i = (state.i + u16::from(state.v[x as usize])) & 0x0FFF;
            Flow::Next
        }
        LdFont { x } => {
            state.i = FONT_START + u16::from(state.v[x as usize]) * FONT_GLYPH_SIZE;
            Flow::Next
        }
        LdBcd { x } => bcd(state, x),
        Store { x } => store(state, x),
        Load { x } => load(state, x),
        Unknown(_) => Flow::Wait,
    };
    Ok(flow)
}

fn skip_if(condition: bool) -> Flow {
    if condition {
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// Only the low nibble of Vx names a key
fn key_index(state: &State, x: u8) -> usize {
    (state.v[x as usize] & 0xF) as usize
}

/// clear the frame buffer
fn cls(state: &mut State) -> Flow {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Flow::Next
}

/// PC = STACK.pop(), then on past the CALL
fn ret(state: &mut State) -> Result<Flow, MachineError> {
    state.pc = state.pop()?;
    Ok(Flow::Next)
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Flow, MachineError> {
    state.push(state.pc)?;
    Ok(Flow::Jump(addr))
}

/// Vx += Vy; VF = carry
fn add(state: &mut State, x: u8, y: u8) -> Flow {
    let (sum, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.set_flag(carry);
    state.v[x as usize] = sum;
    Flow::Next
}

/// VF = !borrow; Vx -= Vy
/// VF is written first, so with x or y = F the subtraction reads the new flag.
fn sub(state: &mut State, x: u8, y: u8) -> Flow {
    state.set_flag(state.v[x as usize] >= state.v[y as usize]);
    state.v[x as usize] = state.v[x as usize].wrapping_sub(state.v[y as usize]);
    Flow::Next
}

/// VF = lsb; Vx >>= 1
fn shr(state: &mut State, x: u8) -> Flow {
    state.v[0xF] = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    Flow::Next
}

/// VF = !borrow; Vx = Vy - Vx
/// As with `sub`, the new flag is the operand when x or y = F.
fn subn(state: &mut State, x: u8, y: u8) -> Flow {
    state.set_flag(state.v[x as usize] <= state.v[y as usize]);
    state.v[x as usize] = state.v[y as usize].wrapping_sub(state.v[x as usize]);
    Flow::Next
}

/// VF = msb; Vx <<= 1
fn shl(state: &mut State, x: u8, flag: ShiftFlag) -> Flow {
    let msb = state.v[x as usize] & 0x80;
    match flag {
        ShiftFlag::Carry => state.set_flag(msb != 0),
        ShiftFlag::RawHighBit => state.v[0xF] = msb,
    }
    state.v[x as usize] <<= 1;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy height=n)
/// XORs an 8xN sprite from memory I.. onto the frame buffer at (Vx, Vy).
/// Pixels falling off the right or bottom edge are dropped rather than wrapped.
/// VF = 1 if any lit pixel was turned off.
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Flow {
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;
    let mut collision = false;

    for row in 0..n as usize {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        let sprite = state.read(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if sprite & (0x80 >> bit) != 0 {
                let pixel = &mut state.frame_buffer[py][px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
    }

    state.set_flag(collision);
    state.draw_flag = true;
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Flow {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write(state.i.wrapping_add(offset as u16), *digit);
    }
    Flow::Next
}

/// mem[I..=I+x] = V0..=Vx
fn store(state: &mut State, x: u8) -> Flow {
    for r in 0..=x as usize {
        state.write(state.i.wrapping_add(r as u16), state.v[r]);
    }
    Flow::Next
}

/// V0..=Vx = mem[I..=I+x]
fn load(state: &mut State, x: u8) -> Flow {
    for r in 0..=x as usize {
        state.v[r] = state.read(state.i.wrapping_add(r as u16));
    }
    Flow::Next
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::constants::SPRITE_SHEET;

    fn run_with(state: &mut State, op: u16, keys: Keypad, config: Config) -> Flow {
        let mut rng = StdRng::seed_from_u64(8);
        let flow = execute(Instruction::decode(op), state, &keys, &config, &mut rng).unwrap();
        state.advance(flow);
        flow
    }

    fn run(state: &mut State, op: u16) -> Flow {
        run_with(state, op, [false; 16], Config::default())
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer[3][7] = 1;
        state.draw_flag = false;
        run(&mut state, 0x00E0);
        assert!(state.frame_buffer.iter().all(|row| row.iter().all(|&p| p == 0)));
        assert!(state.draw_flag);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_call_then_ret_returns_past_the_call() {
        let mut state = State::new();
        state.pc = 0x204;
        run(&mut state, 0x2ABC);
        assert_eq!(state.pc, 0xABC);
        assert_eq!(state.sp, 1);
        run(&mut state, 0x00EE);
        assert_eq!(state.pc, 0x206);
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_ret_on_empty_stack_is_an_error() {
        let mut state = State::new();
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute(
            Instruction::Ret,
            &mut state,
            &[false; 16],
            &Config::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(MachineError::StackUnderflow { .. })));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_1nnn_jp_lands_on_target() {
        let mut state = State::new();
        run(&mut state, 0x1ABC);
        assert_eq!(state.pc, 0xABC);
    }

    #[test]
    fn test_0nnn_sys_jumps() {
        let mut state = State::new();
        run(&mut state, 0x0456);
        assert_eq!(state.pc, 0x456);
    }

    #[test]
    fn test_skips_advance_by_four_or_two() {
        let cases: &[(u16, bool)] = &[
            (0x3111, true),
            (0x3112, false),
            (0x4112, true),
            (0x4111, false),
            (0x5120, true),
            (0x5130, false),
            (0x9130, true),
            (0x9120, false),
        ];
        for &(op, skips) in cases {
            let mut state = State::new();
            state.v[0x1] = 0x11;
            state.v[0x2] = 0x11;
            state.v[0x3] = 0x12;
            run(&mut state, op);
            let expected = if skips { 0x204 } else { 0x202 };
            assert_eq!(state.pc, expected, "{:04X}", op);
        }
    }

    #[test]
    fn test_6xnn_ld() {
        let mut state = State::new();
        run(&mut state, 0x6122);
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xnn_add_wraps_without_touching_vf() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(&mut state, 0x7102);
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_to_8xy3_bitwise() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(&mut state, 0x8121);
        assert_eq!(state.v[0x1], 0x7);
        run(&mut state, 0x8122);
        assert_eq!(state.v[0x1], 0x3);
        run(&mut state, 0x8123);
        assert_eq!(state.v[0x1], 0x0);
        run(&mut state, 0x8120);
        assert_eq!(state.v[0x1], 0x3);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[0x2] = 0x01;
        run(&mut state, 0x8124);
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        state.v[0xF] = 0x1;
        run(&mut state, 0x8124);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8fy4_result_overwrites_flag() {
        let mut state = State::new();
        state.v[0xF] = 0xF0;
        state.v[0x2] = 0x20;
        run(&mut state, 0x8F24);
        // carry would be 1, the wrapped sum is 0x10
        assert_eq!(state.v[0xF], 0x10);
    }

    #[test]
    fn test_8fy5_subtracts_from_the_new_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x5;
        state.v[0x2] = 0x2;
        run(&mut state, 0x8F25);
        // no borrow sets VF = 1, then 1 - 2
        assert_eq!(state.v[0xF], 0xFF);
    }

    #[test]
    fn test_8fy7_subtracts_the_new_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x2;
        state.v[0x2] = 0x5;
        run(&mut state, 0x8F27);
        // no borrow sets VF = 1, then 5 - 1
        assert_eq!(state.v[0xF], 0x4);
    }

    #[test]
    fn test_8fy6_shifts_the_new_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x5;
        run(&mut state, 0x8F06);
        // lsb 1 lands in VF, then 1 >> 1
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8fye_shifts_the_new_flag() {
        let mut state = State::new();
        state.v[0xF] = 0x81;
        run(&mut state, 0x8F0E);
        // msb 1 lands in VF, then 1 << 1
        assert_eq!(state.v[0xF], 0x2);

        let config = Config {
            shl_flag: ShiftFlag::RawHighBit,
        };
        state.v[0xF] = 0x81;
        run_with(&mut state, 0x8F0E, [false; 16], config);
        // 0x80 << 1 wraps to 0
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8125);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0x1] = 0x11;
        state.v[0x2] = 0x12;
        run(&mut state, 0x8125);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_equal_operands_set_no_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x42;
        state.v[0x2] = 0x42;
        run(&mut state, 0x8125);
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        run(&mut state, 0x8106);
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
        run(&mut state, 0x8106);
        assert_eq!(state.v[0x1], 0x1);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(&mut state, 0x8127);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(&mut state, 0x8127);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_normalises_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(&mut state, 0x810E);
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0x1] = 0x4;
        run(&mut state, 0x810E);
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_raw_high_bit() {
        let mut state = State::new();
        state.v[0x1] = 0x81;
        let config = Config {
            shl_flag: ShiftFlag::RawHighBit,
        };
        run_with(&mut state, 0x810E, [false; 16], config);
        assert_eq!(state.v[0x1], 0x02);
        assert_eq!(state.v[0xF], 0x80);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(&mut state, 0xAABC);
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp_offset() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        run(&mut state, 0xBABC);
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_wraps_past_end_of_memory() {
        let mut state = State::new();
        state.v[0x0] = 0x10;
        run(&mut state, 0xBFF8);
        assert_eq!(state.pc, 0x008);
    }

    #[test]
    fn test_cxnn_rnd_is_masked() {
        let mut state = State::new();
        for _ in 0..32 {
            run(&mut state, 0xC10F);
            assert!(state.v[0x1] <= 0x0F);
        }
        run(&mut state, 0xC100);
        assert_eq!(state.v[0x1], 0x00);
    }

    #[test]
    fn test_dxyn_drw_draws_font_glyph() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // the 0 glyph at (1, 1)
        run(&mut state, 0xD005);
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert!(state
            .frame_buffer
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a[..] == b[..]));
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_twice_restores_and_collides() {
        let mut state = State::new();
        state.frame_buffer[0][2..6].copy_from_slice(&[0, 1, 0, 1]);
        let before = state.frame_buffer;
        state.v[0x1] = 0x2;

        run(&mut state, 0xD105);
        // 1 1 1 1 xor 0 1 0 1
        assert_eq!(state.frame_buffer[0][2..6], [1, 0, 1, 0]);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0xF] = 0x0;
        run(&mut state, 0xD105);
        assert!(state
            .frame_buffer
            .iter()
            .zip(before.iter())
            .all(|(a, b)| a[..] == b[..]));
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_dxyn_drw_clips_instead_of_wrapping() {
        let mut state = State::new();
        state.v[0x1] = 62;
        state.v[0x2] = 30;
        state.i = 0x300;
        state.memory[0x300..0x304].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        run(&mut state, 0xD124);
        let lit: usize = state
            .frame_buffer
            .iter()
            .map(|row| row.iter().filter(|&&p| p == 1).count())
            .sum();
        assert_eq!(lit, 4);
        assert_eq!(state.frame_buffer[30][62..], [1, 1]);
        assert_eq!(state.frame_buffer[31][62..], [1, 1]);
        assert_eq!(state.frame_buffer[0][0], 0);
    }

    #[test]
    fn test_dxyn_drw_origin_off_screen_draws_nothing() {
        for &(vx, vy) in &[(64, 0), (0, 32), (0xFF, 0xFF)] {
            let mut state = State::new();
            state.v[0x1] = vx;
            state.v[0x2] = vy;
            state.v[0xF] = 0x1;
            run(&mut state, 0xD125);
            assert!(
                state.frame_buffer.iter().all(|row| row.iter().all(|&p| p == 0)),
                "({}, {})",
                vx,
                vy
            );
            assert_eq!(state.v[0xF], 0x0);
        }
    }

    #[test]
    fn test_ex9e_and_exa1_use_the_low_nibble_of_vx() {
        let mut keys = [false; 16];
        keys[0xE] = true;

        let mut state = State::new();
        state.v[0x1] = 0x1E;
        run_with(&mut state, 0xE19E, keys, Config::default());
        assert_eq!(state.pc, 0x204);

        let mut state = State::new();
        state.v[0x1] = 0x1E;
        run_with(&mut state, 0xE1A1, keys, Config::default());
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_ex9e_and_exa1_read_the_keypad() {
        let mut keys = [false; 16];
        keys[0xE] = true;

        let mut state = State::new();
        state.v[0x1] = 0xE;
        run_with(&mut state, 0xE19E, keys, Config::default());
        assert_eq!(state.pc, 0x204);

        let mut state = State::new();
        state.v[0x1] = 0xE;
        run_with(&mut state, 0xE1A1, keys, Config::default());
        assert_eq!(state.pc, 0x202);

        let mut state = State::new();
        run(&mut state, 0xE1A1);
        assert_eq!(state.pc, 0x204);
    }

    #[test]
    fn test_fx07_and_fx15_and_fx18_timers() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(&mut state, 0xF115);
        run(&mut state, 0xF118);
        assert_eq!(state.delay_timer, 0xF);
        assert_eq!(state.sound_timer, 0xF);
        state.delay_timer = 0x3;
        run(&mut state, 0xF207);
        assert_eq!(state.v[0x2], 0x3);
    }

    #[test]
    fn test_fx0a_parks_on_the_instruction() {
        let mut state = State::new();
        let flow = run(&mut state, 0xF30A);
        assert_eq!(flow, Flow::Wait);
        assert_eq!(state.mode, Mode::AwaitingKey { register: 0x3 });
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fx1e_add_i() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        run(&mut state, 0xF11E);
        assert_eq!(state.i, 0x2);
    }

    #[test]
    fn test_fx29_points_at_glyph() {
        let mut state = State::new();
        state.v[0x1] = 0xA;
        run(&mut state, 0xF129);
        assert_eq!(state.i, 0x32);
        assert_eq!(state.memory[0x32..0x37], SPRITE_SHEET[50..55]);
    }

    #[test]
    fn test_fx33_bcd() {
        let mut state = State::new();
        state.v[0x1] = 234;
        state.i = 0x300;
        run(&mut state, 0xF133);
        assert_eq!(state.memory[0x300..0x303], [2, 3, 4]);
    }

    #[test]
    fn test_fx55_then_fx65_round_trip() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x4].copy_from_slice(&[0x1, 0x2, 0x3, 0x4]);
        state.v[0x4] = 0x5;
        run(&mut state, 0xF355);
        assert_eq!(state.memory[0x300..0x305], [0x1, 0x2, 0x3, 0x4, 0x0]);

        state.v[0x0..0x4].copy_from_slice(&[0xAA; 4]);
        run(&mut state, 0xF365);
        assert_eq!(state.v[0x0..0x5], [0x1, 0x2, 0x3, 0x4, 0x5]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx55_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x0..0x3].copy_from_slice(&[0x7, 0x8, 0x9]);
        run(&mut state, 0xF255);
        assert_eq!(state.memory[0xFFE..], [0x7, 0x8]);
        assert_eq!(state.memory[0x000], 0x9);
    }

    #[test]
    fn test_unknown_opcode_stalls() {
        let mut state = State::new();
        let flow = run(&mut state, 0x8128);
        assert_eq!(flow, Flow::Wait);
        assert_eq!(state.pc, 0x200);
    }
}
