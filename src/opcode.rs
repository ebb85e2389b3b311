//! Opcode abstractions, functionality and constants.
use crate::{definitions::memory, MemoryError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::MemoryError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let err = MemoryError::OutOfBounds { address: 4, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, 3));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, MemoryError> {
    // controlling that there is no illegal access here
    let low = pointer.checked_add(1).and_then(|low| data.get(low));
    match (data.get(pointer), low) {
        (Some(high), Some(low)) => Ok(Opcode::from_be_bytes([*high, *low])),
        (None, _) => Err(MemoryError::OutOfBounds {
            address: pointer,
            len: data.len(),
        }),
        (Some(_), None) => Err(MemoryError::OutOfBounds {
            address: pointer + 1,
            len: data.len(),
        }),
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// instruction family (top nibble) of any opcode
    fn t(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `NNN` is an address
    fn nnn(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a constant or a sub opcode
    fn xyn(&self) -> (usize, usize, usize);

    /// this is an opcode extractor for the opcode type `TXYT`
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        const SHIFT: u16 = 3 * BYTE_SIZE / 2;
        ((self & OPCODE_MASK_F000) >> SHIFT) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        let x = self.x();
        let nn = (self & OPCODE_MASK_00FF) as u8;
        (x, nn)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        let (x, y) = self.xy();
        let n = (self & OPCODE_MASK_000F) as usize;
        (x, y, n)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        let x = self.x();
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        const NIBBLE: u16 = BYTE_SIZE / 2;
        let y = ((self & MASK) >> NIBBLE) as usize;
        (x, y)
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter, the instruction is executed again
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    /// The location is validated once the next opcode is fetched.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the [`ProgramCounterStep`](ProgramCounterStep) to the corresponding movement distance,
    /// or for a jump to the target.
    #[inline]
    pub fn step(&self) -> usize {
        match *self {
            ProgramCounterStep::Next => memory::opcodes::SIZE,
            ProgramCounterStep::Skip => 2 * memory::opcodes::SIZE,
            ProgramCounterStep::None => 0,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Generates the `From<Opcode>` conversion for an operand layout.
macro_rules! implFromOpcode {
    ($type_name:ident : | $value:ident | $body:expr) => {
        impl From<Opcode> for $type_name {
            #[inline]
            fn from($value: Opcode) -> Self {
                $body
            }
        }
    };
}

/// Generates the lookup from a sub opcode field into its enum, any value not
/// listed maps to `None`.
macro_rules! implSubOpcode {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl $type_name {
            #[inline]
            fn decode(value: $type_from) -> Option<Self> {
                match value {
                    $(
                        $key => Some($val),
                    )+
                    _ => None,
                }
            }
        }
    };
}

/// Operand layout `TNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub nnn: usize,
}

implFromOpcode!(Address: |value| Address { nnn: value.nnn() });

/// Operand layout `TXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConstant {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(RegisterConstant: |value| {
    let (x, nn) = value.xnn();
    RegisterConstant { x, nn }
});

/// Operand layout `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: usize,
}

implFromOpcode!(Sprite: |value| {
    let (x, y, n) = value.xyn();
    Sprite { x, y, n }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// `00E0` clears the display
    Clear,
    /// `00EE` returns from the subroutine
    Return,
    /// `0NNN` calls a machine code routine, executed as a no-op
    MachineCall(Address),
}

/// The comparison used by the conditional skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equal,
    NotEqual,
}

impl Condition {
    #[inline]
    pub fn holds<T: PartialEq>(self, left: T, right: T) -> bool {
        match self {
            Condition::Equal => left == right,
            Condition::NotEqual => left != right,
        }
    }
}

/// `3XNN` and `4XNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipConst {
    pub cond: Condition,
    pub x: usize,
    pub nn: u8,
}

/// `5XY0` and `9XY0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRegister {
    pub cond: Condition,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implSubOpcode!(ArithmeticOpcode : usize :
    // 8XY0
    // Sets VX to the value of VY.
    0x0 => ArithmeticOpcode::Assign,
    // 8XY1
    // Sets VX to VX or VY. (Bitwise OR operation)
    0x1 => ArithmeticOpcode::Or,
    // 8XY2
    // Sets VX to VX and VY. (Bitwise AND operation)
    0x2 => ArithmeticOpcode::And,
    // 8XY3
    // Sets VX to VX xor VY.
    0x3 => ArithmeticOpcode::Xor,
    // 8XY4
    // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there isn't.
    0x4 => ArithmeticOpcode::Add,
    // 8XY5
    // VY is subtracted from VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x5 => ArithmeticOpcode::Sub,
    // 8XY6
    // Shifts the source right by 1, VF receives the shifted out bit.
    0x6 => ArithmeticOpcode::ShiftRight,
    // 8XY7
    // Sets VX to VY minus VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x7 => ArithmeticOpcode::SubReverse,
    // 8XYE
    // Shifts the source left by 1, VF receives the shifted out bit.
    0xE => ArithmeticOpcode::ShiftLeft,
);

/// `8XYT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

implSubOpcode!(Condition : u8 :
    // EX9E
    // Skips the next instruction if the key stored in VX is pressed.
    0x9E => Condition::Equal,
    // EXA1
    // Skips the next instruction if the key stored in VX isn't pressed.
    0xA1 => Condition::NotEqual,
);

/// `EX9E` and `EXA1`, `Equal` skips on a pressed key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySkip {
    pub cond: Condition,
    pub x: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implSubOpcode!(MiscOpcode : u8 :
    0x07 => MiscOpcode::GetDelayTimer,
    0x0A => MiscOpcode::AwaitKeyPress,
    0x15 => MiscOpcode::SetDelayTimer,
    0x18 => MiscOpcode::SetSoundTimer,
    0x1E => MiscOpcode::AddVxToI,
    0x29 => MiscOpcode::SetIToSprite,
    0x33 => MiscOpcode::StoreBCD,
    0x55 => MiscOpcode::StoreV0ToVx,
    0x65 => MiscOpcode::FillV0ToVx,
);

/// `FXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    System(System),
    Jump(Address),
    Call(Address),
    SkipConst(SkipConst),
    SkipRegister(SkipRegister),
    LoadConst(RegisterConstant),
    AddConst(RegisterConstant),
    Arithmetic(Arithmetic),
    SetIndex(Address),
    JumpOffset(Address),
    Random(RegisterConstant),
    Draw(Sprite),
    Key(KeySkip),
    Misc(Misc),
    /// A sub opcode the family does not define, consumed as a no-op.
    Unknown(Opcode),
}

impl From<Opcode> for Opcodes {
    /// Decoding is total, every word maps to an instruction.
    fn from(value: Opcode) -> Self {
        let unknown = Opcodes::Unknown(value);
        match value.t() {
            0x0 => Opcodes::System(match value {
                0x00E0 => System::Clear,
                0x00EE => System::Return,
                _ => System::MachineCall(value.into()),
            }),
            0x1 => Opcodes::Jump(value.into()),
            0x2 => Opcodes::Call(value.into()),
            0x3 | 0x4 => {
                let RegisterConstant { x, nn } = value.into();
                let cond = if value.t() == 0x3 {
                    Condition::Equal
                } else {
                    Condition::NotEqual
                };
                Opcodes::SkipConst(SkipConst { cond, x, nn })
            }
            0x5 | 0x9 => match value.xyn() {
                (x, y, 0) => {
                    let cond = if value.t() == 0x5 {
                        Condition::Equal
                    } else {
                        Condition::NotEqual
                    };
                    Opcodes::SkipRegister(SkipRegister { cond, x, y })
                }
                _ => unknown,
            },
            0x6 => Opcodes::LoadConst(value.into()),
            0x7 => Opcodes::AddConst(value.into()),
            0x8 => {
                let (x, y, n) = value.xyn();
                ArithmeticOpcode::decode(n)
                    .map(|ops| Opcodes::Arithmetic(Arithmetic { ops, x, y }))
                    .unwrap_or(unknown)
            }
            0xA => Opcodes::SetIndex(value.into()),
            0xB => Opcodes::JumpOffset(value.into()),
            0xC => Opcodes::Random(value.into()),
            0xD => Opcodes::Draw(value.into()),
            0xE => {
                let (x, nn) = value.xnn();
                Condition::decode(nn)
                    .map(|cond| Opcodes::Key(KeySkip { cond, x }))
                    .unwrap_or(unknown)
            }
            _ => {
                let (x, nn) = value.xnn();
                MiscOpcode::decode(nn)
                    .map(|ops| Opcodes::Misc(Misc { ops, x }))
                    .unwrap_or(unknown)
            }
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by the given step.
    fn advance(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The machine waits for the next key press
    Wait,
    /// The framebuffer changed and should be redrawn
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// every handler only reports how the program counter shall move.
pub trait ChipOpcodes: ProgramCounter {
    /// will decode and execute a single opcode
    fn calc(&mut self, opcode: Opcode) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match Opcodes::from(opcode) {
            Opcodes::System(op) => self.system(&op).map(step_op),
            Opcodes::Jump(op) => self.jump(&op),
            Opcodes::Call(op) => self.call(&op),
            Opcodes::SkipConst(op) => self.skip_const(&op),
            Opcodes::SkipRegister(op) => self.skip_register(&op),
            Opcodes::LoadConst(op) => self.load_const(&op),
            Opcodes::AddConst(op) => self.add_const(&op),
            Opcodes::Arithmetic(op) => self.arithmetic(&op),
            Opcodes::SetIndex(op) => self.set_index(&op),
            Opcodes::JumpOffset(op) => self.jump_offset(&op),
            Opcodes::Random(op) => self.random(&op),
            Opcodes::Draw(op) => self.draw(&op).map(step_op),
            Opcodes::Key(op) => self.key(&op),
            Opcodes::Misc(op) => self.misc(&op).map(step_op),
            Opcodes::Unknown(opcode) => Ok(self.unknown(opcode)),
        }?;

        self.advance(step);
        Ok(operation)
    }

    /// - `0NNN` - Call     -                       - Calls machine code routine at address `NNN`, a no-op here.
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_const(&self, opcode: &SkipConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_register(&self, opcode: &SkipRegister) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load_const(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx=Vy>>1`            - Shifts the source right by `1`, the shifted out bit goes into `VF`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx=Vy<<1`            - Shifts the source left by `1`, the shifted out bit goes into `VF`.
    ///
    /// `VF` is always written last, so the flag wins when `X` is `F`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte masked with `NN`.
    fn random(&mut self, opcode: &RegisterConstant) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &KeySkip) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for the low nibble of `VX`.
    /// - `FX33` - BCD      - `246 => 2, 4, 6`      - Stores the [binary-coded decimal](https://en.wikipedia.org/wiki/Binary-coded_decimal) representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// Any sub opcode a family doesn't define, consumed without effect.
    fn unknown(&self, opcode: Opcode) -> ProgramCounterStep {
        log::warn!("Unsupported opcode {:#06X} executed as no-op", opcode);
        ProgramCounterStep::Next
    }
}
