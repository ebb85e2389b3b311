use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::{
    chip8::ChipSet,
    config::Config,
    definitions::timer,
    devices::{DisplayCommands, KeyboardCommands},
    opcode::{Opcode, OpcodeTrait, Operation},
    resources::Rom,
    timer::TimedWorker,
    MemoryError, ProcessError,
};

/// What happened during a single frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// instructions that ran to completion
    pub executed: usize,
    /// the framebuffer changed and was handed to the display
    pub drawn: bool,
    /// the machine is blocked on `FX0A`
    pub waiting: bool,
}

/// Runs a single 60Hz frame.
///
/// The keys are sampled once, then up to `config.instructions_per_frame`
/// instructions are executed. The frame ends early on `FX0A` without a
/// key. With `config.display_wait` set it also ends right before a second
/// sprite draw. A changed framebuffer is sent to the display once and the
/// timers tick once.
pub fn run_frame<D, K>(
    chip: &mut ChipSet,
    display: &mut D,
    keyboard: &K,
    config: &Config,
) -> Result<FrameReport, ProcessError>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    chip.set_keyboard(&keyboard.get_keyboard());

    let mut report = FrameReport::default();
    let mut sprite_drawn = false;
    for _ in 0..config.instructions_per_frame {
        if sprite_drawn && config.display_wait && is_sprite(chip.next_opcode()) {
            break;
        }

        match chip.step()? {
            Operation::None => {}
            Operation::Draw => {
                report.drawn = true;
                sprite_drawn |= is_sprite(Ok(chip.opcode()));
            }
            Operation::Wait => {
                report.waiting = true;
                break;
            }
        }
        report.executed += 1;
    }

    if report.drawn {
        display.display(chip.get_display());
    }
    chip.tick_timers();

    log::trace!("{:?}", report);
    Ok(report)
}

/// `DXYN`, a failed fetch is left for the step to report.
fn is_sprite(opcode: Result<Opcode, MemoryError>) -> bool {
    matches!(opcode, Ok(opcode) if opcode.t() == 0xD)
}

/// A chip running on a worker, see [`run`].
pub struct Runner<W: TimedWorker> {
    worker: W,
    chip: Arc<Mutex<ChipSet>>,
}

impl<W: TimedWorker> Runner<W> {
    /// Locks the chip, the worker blocks until the guard is dropped.
    pub fn chip(&self) -> MutexGuard<'_, ChipSet> {
        self.chip.lock()
    }

    /// A handle to the chip, e.g. for a host forwarding key events.
    pub fn shared(&self) -> Arc<Mutex<ChipSet>> {
        self.chip.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.worker.is_alive()
    }

    pub fn stop(&mut self) {
        self.worker.stop();
    }
}

/// Starts running the rom, a frame every 1/60 of a second.
///
/// A fault halts the chip, it is logged once and all the following frames
/// are skipped. The display is cleared before the first frame, the worker
/// keeps running until [`Runner::stop`].
pub fn run<D, K, W>(mut display: D, keyboard: K, rom: Rom, config: Config) -> Runner<W>
where
    D: DisplayCommands + Send + 'static,
    K: KeyboardCommands + Send + 'static,
    W: TimedWorker,
{
    log::info!(
        "Running '{}' at {}Hz with {:?}",
        rom.get_name(),
        config.hertz(),
        config.quirks
    );

    let chip = Arc::new(Mutex::new(ChipSet::with_quirks(rom, config.quirks)));
    let shared = chip.clone();

    display.clear_display();

    let frame = move || {
        let mut chip = shared.lock();
        if chip.is_halted() {
            return;
        }
        if let Err(err) = run_frame(&mut chip, &mut display, &keyboard, &config) {
            log::error!("'{}' stopped: {}", chip.name(), err);
        }
    };

    let mut worker = W::new();
    worker.start(frame, timer::interval());

    Runner { worker, chip }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;
    use crate::{
        definitions::keyboard,
        devices::{MockDisplayCommands, MockKeyboardCommands},
        timer::Worker,
        StackError,
    };

    fn rom(program: &[Opcode]) -> Rom {
        let data: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
        Rom::new("RUNNER", data).expect("The test program is valid.")
    }

    fn released() -> MockKeyboardCommands {
        let mut keys = MockKeyboardCommands::new();
        keys.expect_get_keyboard()
            .return_const([false; keyboard::SIZE]);
        keys
    }

    #[test]
    fn test_frame_without_draw() {
        // V0 += 1 forever
        let mut chip = ChipSet::new(rom(&[0x7001, 0x1200]));
        let mut display = MockDisplayCommands::new();
        display.expect_display().times(0);

        let report = run_frame(&mut chip, &mut display, &released(), &Config::default()).unwrap();

        assert_eq!(
            report,
            FrameReport {
                executed: 10,
                drawn: false,
                waiting: false
            }
        );
        assert_eq!(chip.register(0), 5);
    }

    #[test]
    fn test_frame_draws_once() {
        let mut chip = ChipSet::new(rom(&[0x00E0, 0x1200]));
        let mut display = MockDisplayCommands::new();
        display.expect_display().times(1).return_const(());

        let report = run_frame(&mut chip, &mut display, &released(), &Config::default()).unwrap();

        assert_eq!(report.executed, 10);
        assert!(report.drawn);
    }

    #[test]
    fn test_frame_display_wait() {
        // clear, draw, V0 += 1, draw again
        let mut chip = ChipSet::new(rom(&[0x00E0, 0xD010, 0x7001, 0xD010, 0x1200]));
        let mut display = MockDisplayCommands::new();
        display.expect_display().times(2).return_const(());
        let config = Config::default().with_display_wait(true);

        let report = run_frame(&mut chip, &mut display, &released(), &config).unwrap();

        // stops right before the second sprite
        assert_eq!(report.executed, 3);
        assert!(report.drawn);
        assert_eq!(chip.register(0), 1);
        assert_eq!(chip.program_counter(), 0x206);

        // the next frame starts with it and loops back onto the first one
        let report = run_frame(&mut chip, &mut display, &released(), &config).unwrap();
        assert_eq!(report.executed, 3);
        assert_eq!(chip.register(0), 1);
        assert_eq!(chip.program_counter(), 0x202);
    }

    #[test]
    fn test_frame_display_wait_keeps_running() {
        // a single sprite, then V0 += 1 three times and spin
        let mut chip = ChipSet::new(rom(&[0xD010, 0x7001, 0x7001, 0x7001, 0x1208]));
        let mut display = MockDisplayCommands::new();
        display.expect_display().times(1).return_const(());
        let config = Config::default().with_display_wait(true);

        let report = run_frame(&mut chip, &mut display, &released(), &config).unwrap();

        assert_eq!(report.executed, 10);
        assert!(report.drawn);
        assert_eq!(chip.register(0), 3);
    }

    #[test]
    fn test_frame_ticks_timers() {
        let mut chip = ChipSet::new(rom(&[0x1200]));
        chip.set_delay_timer(5);
        chip.set_sound_timer(1);
        let mut display = MockDisplayCommands::new();

        run_frame(&mut chip, &mut display, &released(), &Config::default()).unwrap();

        assert_eq!(chip.get_delay_timer(), 4);
        assert!(!chip.is_sound_active());
    }

    #[test]
    fn test_frame_waits_for_key() {
        let mut chip = ChipSet::new(rom(&[0xF30A, 0x1202]));
        let mut display = MockDisplayCommands::new();
        let config = Config::default();

        let report = run_frame(&mut chip, &mut display, &released(), &config).unwrap();
        assert_eq!(
            report,
            FrameReport {
                executed: 0,
                drawn: false,
                waiting: true
            }
        );
        assert_eq!(chip.program_counter(), 0x200);

        let mut pressed = MockKeyboardCommands::new();
        pressed.expect_get_keyboard().returning(|| {
            let mut keys = [false; keyboard::SIZE];
            keys[0xB] = true;
            keys
        });

        let report = run_frame(&mut chip, &mut display, &pressed, &config).unwrap();
        assert!(!report.waiting);
        assert_eq!(report.executed, 10);
        assert_eq!(chip.register(3), 0xB);
        assert!(chip.get_keyboard()[0xB]);
    }

    #[test]
    fn test_frame_fault() {
        let mut chip = ChipSet::new(rom(&[0x6005, 0x00EE]));
        chip.set_delay_timer(5);
        let mut display = MockDisplayCommands::new();
        display.expect_display().times(0);

        let result = run_frame(&mut chip, &mut display, &released(), &Config::default());

        assert_eq!(result, Err(ProcessError::Stack(StackError::Empty)));
        assert!(chip.is_halted());
        assert_eq!(chip.get_delay_timer(), 5);
    }

    #[test]
    fn test_run() {
        // draw the glyph of 5, then spin
        let program = [0x6005, 0xF029, 0xD125, 0x1206];
        let mut display = MockDisplayCommands::new();
        display.expect_clear_display().times(1).return_const(());
        display.expect_display().return_const(());

        let mut runner: Runner<Worker> = run(display, released(), rom(&program), Config::default());
        thread::sleep(Duration::from_millis(100));
        runner.stop();

        assert!(!runner.is_alive());
        let chip = runner.chip();
        assert!(!chip.is_halted());
        assert_eq!(chip.register(0), 5);
        assert_eq!(chip.index_register(), 0x50 + 5 * 5);
        assert!(chip.get_display().iter().flatten().any(|pixel| *pixel));
    }

    #[test]
    fn test_run_halts_on_fault() {
        let mut display = MockDisplayCommands::new();
        display.expect_clear_display().times(1).return_const(());
        display.expect_display().times(0);

        let mut runner: Runner<Worker> =
            run(display, released(), rom(&[0x00EE]), Config::default());
        thread::sleep(Duration::from_millis(100));

        assert!(runner.is_alive());
        assert_eq!(
            runner.chip().fault(),
            Some(&ProcessError::Stack(StackError::Empty))
        );
        runner.stop();
    }
}
