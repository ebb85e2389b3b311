use std::ops::Range;

use {
    crate::{
        config::Quirks,
        definitions::{
            cpu,
            display::{self, Frame},
            memory,
        },
        devices::Keyboard,
        opcode::{self, ChipOpcodes, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        resources::Rom,
        timer::Timer,
        MemoryError, ProcessError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instance of the
/// Chip8 CPU.
pub struct ChipSet {
    /// the loaded rom, kept for resets
    pub(super) rom: Rom,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x09F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index register `I`, it may point past the memory, but any
    /// access through it is checked.
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row.
    pub(super) display: Box<Frame>,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) quirks: Quirks,
    /// The fault that halted the machine
    pub(super) fault: Option<ProcessError>,
}

impl ChipSet {
    /// will create a new chipset object
    pub fn new(rom: Rom) -> Self {
        Self::with_quirks(rom, Quirks::default())
    }

    /// will create a new chipset object running with the given quirks
    pub fn with_quirks(rom: Rom, quirks: Quirks) -> Self {
        Self {
            memory: Self::load_memory(&rom),
            rom,
            opcode: 0,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: Box::new([[false; display::WIDTH]; display::HEIGHT]),
            keyboard: Keyboard::new(),
            rng: Box::new(rand::rngs::OsRng),
            quirks,
            fault: None,
        }
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    fn load_memory(rom: &Rom) -> Vec<u8> {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        let font = display::fontset::LOCATION..(display::fontset::LOCATION + display::fontset::FONTSET.len());
        ram[font].copy_from_slice(&display::fontset::FONTSET);

        // write the rom data into memory, the rom guarantees it fits
        let data = rom.get_data();
        ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())].copy_from_slice(data);

        ram
    }

    /// Restores the state right after the rom was loaded, this clears a fault.
    pub fn reset(&mut self) {
        log::info!("Resetting chip running '{}'", self.rom.get_name());
        self.memory = Self::load_memory(&self.rom);
        self.opcode = 0;
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.clear_display();
        self.keyboard.reset();
        self.fault = None;
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), MemoryError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        Ok(())
    }

    /// The opcode the next [`step`](ChipSet::step) will execute
    pub fn next_opcode(&self) -> Result<Opcode, MemoryError> {
        opcode::build_opcode(&self.memory, self.program_counter)
    }

    /// will advance the program by a single step
    ///
    /// Any error halts the machine, every following call returns the
    /// same error until [`reset`](ChipSet::reset).
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let result = self.execute();
        if let Err(err) = &result {
            log::error!(
                "Halting '{}' at {:#06X} (opcode {:#06X}): {}",
                self.rom.get_name(),
                self.program_counter,
                self.opcode,
                err
            );
            self.fault = Some(err.clone());
        }
        result
    }

    fn execute(&mut self) -> Result<Operation, ProcessError> {
        self.set_opcode()?;
        log::trace!("{:#06X}: {:#06X}", self.program_counter, self.opcode);
        self.calc(self.opcode)
    }

    /// Decrements both timers by one if nonzero, call this at 60Hz.
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Will write keyboard data into internal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool]) {
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will toggle the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer.set_value(value)
    }

    /// A host should beep while this is true.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer.set_value(value)
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Frame {
        &self.display
    }

    /// The state of the pixel, anything outside of the display is off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.display
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the pixel and returns its previous state.
    pub(super) fn toggle_pixel(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.display[y][x];
        let previous = *pixel;
        *pixel = !previous;
        previous
    }

    pub(super) fn clear_display(&mut self) {
        for row in self.display.iter_mut() {
            row.fill(false);
        }
    }

    /// The value of the register `V0` to `VF`, only the low nibble of the index is used.
    pub fn register(&self, index: usize) -> u8 {
        self.registers[index & 0xF]
    }

    pub fn set_register(&mut self, index: usize, value: u8) {
        self.registers[index & 0xF] = value;
    }

    pub fn index_register(&self) -> usize {
        self.index_register
    }

    pub fn set_index_register(&mut self, value: usize) {
        self.index_register = value & cpu::INDEX_MASK;
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    /// The last fetched opcode
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    /// The name of the running rom
    pub fn name(&self) -> &str {
        self.rom.get_name()
    }

    /// The fault that halted the machine, if any.
    pub fn fault(&self) -> Option<&ProcessError> {
        self.fault.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    /// The range `from..from + len`, if all of it is inside of the memory.
    pub(super) fn memory_range(&self, from: usize, len: usize) -> Result<Range<usize>, MemoryError> {
        match from.checked_add(len).filter(|to| *to <= self.memory.len()) {
            Some(to) => Ok(from..to),
            None => Err(MemoryError::OutOfBounds {
                address: from.max(self.memory.len()),
                len: self.memory.len(),
            }),
        }
    }

    pub fn read_memory(&self, address: usize) -> Result<u8, MemoryError> {
        let range = self.memory_range(address, 1)?;
        Ok(self.memory[range.start])
    }

    pub fn write_memory(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let range = self.memory_range(address, 1)?;
        self.memory[range.start] = value;
        Ok(())
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Full),
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

impl ProgramCounter for ChipSet {
    fn advance(&mut self, step: ProgramCounterStep) {
        self.program_counter = if let ProgramCounterStep::Jump(_) = step {
            step.step()
        } else {
            self.program_counter + step.step()
        }
    }
}
