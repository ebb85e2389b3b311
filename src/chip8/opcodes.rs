use crate::{
    config::ShiftSource,
    definitions::{cpu, display},
    opcode::{
        Address, Arithmetic, ArithmeticOpcode, ChipOpcodes, KeySkip, Misc, MiscOpcode, Operation,
        ProgramCounterStep, RegisterConstant, SkipConst, SkipRegister, Sprite, System,
    },
    ProcessError,
};

use super::ChipSet;

/// The width of a sprite row
const BYTE: usize = 8;

impl ChipSet {
    /// The register the shift opcodes read from.
    fn shift_source(&self, x: usize, y: usize) -> u8 {
        match self.quirks.shift_source {
            ShiftSource::Vy => self.registers[y],
            ShiftSource::Vx => self.registers[x],
        }
    }

    /// Moves `I` forward after a register dump or load.
    fn increment_index(&mut self, x: usize) {
        let offset = self.quirks.index_increment.offset(x);
        self.index_register = (self.index_register + offset) & cpu::INDEX_MASK;
    }
}

impl ChipOpcodes for ChipSet {
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            System::Clear => {
                // 00E0
                self.clear_display();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
            System::MachineCall(Address { nnn }) => {
                // 0NNN
                // There is no machine code to run, so this is consumed as is.
                log::warn!("Ignoring machine code call to {:#06X}", nnn);
                Ok((ProgramCounterStep::Next, Operation::None))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        log::debug!("jump to {:#06X}", opcode.nnn);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // the return address is the opcode after the call
        self.push_stack(self.program_counter + ProgramCounterStep::Next.step())?;
        log::debug!(
            "call {:#06X} from {:#06X} (depth {})",
            opcode.nnn,
            self.program_counter,
            self.stack.len()
        );
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_const(&self, opcode: &SkipConst) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN / 4XNN
        let SkipConst { cond, x, nn } = *opcode;
        Ok(ProgramCounterStep::cond(cond.holds(self.registers[x], nn)))
    }

    fn skip_register(&self, opcode: &SkipRegister) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0 / 9XY0
        let SkipRegister { cond, x, y } = *opcode;
        Ok(ProgramCounterStep::cond(
            cond.holds(self.registers[x], self.registers[y]),
        ))
    }

    fn load_const(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        let RegisterConstant { x, nn } = *opcode;
        self.registers[x] = self.registers[x].wrapping_add(nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];

        // the flag is written after the result, so it wins if X is F
        let (result, flag) = match ops {
            ArithmeticOpcode::Assign => (vy, None),
            ArithmeticOpcode::Or => (vx | vy, self.quirks.vf_reset.then(|| 0)),
            ArithmeticOpcode::And => (vx & vy, self.quirks.vf_reset.then(|| 0)),
            ArithmeticOpcode::Xor => (vx ^ vy, self.quirks.vf_reset.then(|| 0)),
            ArithmeticOpcode::Add => {
                let (sum, carry) = vx.overflowing_add(vy);
                (sum, Some(carry as u8))
            }
            ArithmeticOpcode::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            ArithmeticOpcode::ShiftRight => {
                let source = self.shift_source(x, y);
                (source >> 1, Some(source & 0x01))
            }
            ArithmeticOpcode::SubReverse => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            ArithmeticOpcode::ShiftLeft => {
                let source = self.shift_source(x, y);
                (source << 1, Some(source >> 7))
            }
        };

        self.registers[x] = result;
        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        Ok(ProgramCounterStep::Next)
    }

    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = opcode.nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn random(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let Sprite { x: reg_x, y: reg_y, n } = *opcode;

        // only the starting point wraps, the sprite itself is clipped
        let coorx = self.registers[reg_x] as usize % display::WIDTH;
        let coory = self.registers[reg_y] as usize % display::HEIGHT;

        // rows below the bottom edge are never read
        let rows = n.min(display::HEIGHT - coory);
        let sprite = self.memory_range(self.index_register, rows)?;
        let mut collision = false;

        for (i, row) in sprite.enumerate() {
            let y = coory + i;
            let data = self.memory[row];
            for j in 0..BYTE {
                let x = coorx + j;
                if x >= display::WIDTH {
                    break;
                }

                // the most significant bit is the leftmost pixel
                if data & (0x80 >> j) == 0 {
                    continue;
                }

                collision |= self.toggle_pixel(x, y);
            }
        }

        self.registers[cpu::register::LAST] = collision as u8;
        log::debug!(
            "draw {} rows at ({}, {}), collision {}",
            n,
            coorx,
            coory,
            collision
        );

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &KeySkip) -> Result<ProgramCounterStep, ProcessError> {
        // EX9E / EXA1
        let pressed = self.keyboard.is_pressed(self.registers[opcode.x]);
        Ok(ProgramCounterStep::cond(opcode.cond.holds(pressed, true)))
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let Misc { ops, x } = *opcode;
        let mut op = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match ops {
            MiscOpcode::GetDelayTimer => {
                // FX07
                self.registers[x] = self.delay_timer.get_value();
            }
            MiscOpcode::AwaitKeyPress => {
                // FX0A
                // the same opcode runs again until a key is down
                match self.keyboard.first_pressed() {
                    Some(key) => {
                        log::debug!("key {:#X} pressed, stored in V{:X}", key, x);
                        self.registers[x] = key as u8;
                    }
                    None => {
                        op = Operation::Wait;
                        pcs = ProgramCounterStep::None;
                    }
                }
            }
            MiscOpcode::SetDelayTimer => {
                // FX15
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                // FX18
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                // FX1E
                // VF is not affected
                let vx = self.registers[x] as usize;
                self.index_register = (self.index_register + vx) & cpu::INDEX_MASK;
            }
            MiscOpcode::SetIToSprite => {
                // FX29
                let glyph = (self.registers[x] & 0xF) as usize;
                self.index_register =
                    display::fontset::LOCATION + display::fontset::GLYPH_SIZE * glyph;
            }
            MiscOpcode::StoreBCD => {
                // FX33
                let range = self.memory_range(self.index_register, 3)?;
                let r = self.registers[x];

                self.memory[range].copy_from_slice(&[
                    r / 100,      // 246u8 / 100 => 2
                    r / 10 % 10,  // 246u8 / 10 => 24 % 10 => 4
                    r % 10,       // 246u8 % 10 => 6
                ]);
            }
            MiscOpcode::StoreV0ToVx => {
                // FX55
                let range = self.memory_range(self.index_register, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
                self.increment_index(x);
            }
            MiscOpcode::FillV0ToVx => {
                // FX65
                let range = self.memory_range(self.index_register, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
                self.increment_index(x);
            }
        }
        Ok((pcs, op))
    }
}
