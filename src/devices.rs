use hashbrown::HashMap;

use crate::definitions::{display::Frame, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will clear the display
    fn clear_display(&mut self);
    /// Will display all from the pixels
    fn display(&mut self, pixels: &Frame);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// The current state of all the keys, sampled once per frame
    fn get_keyboard(&self) -> [bool; keyboard::SIZE];
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    pub fn toggle_key(&mut self, key: usize) {
        self.set_key(key, !self.keys[key & 0xF])
    }

    /// Keys outside of `0-F` are mapped onto their low nibble.
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keys[key & 0xF] = to;
    }

    /// Overrides the state of all the keys, missing entries count as released.
    pub fn set_mult(&mut self, keys: &[bool]) {
        if keys.len() != keyboard::SIZE {
            log::warn!(
                "Expected {} keys, got {}; the rest are released.",
                keyboard::SIZE,
                keys.len()
            );
        }
        self.reset();
        for (key, state) in self.keys.iter_mut().zip(keys) {
            *key = *state;
        }
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    /// Is the given key down, only the low nibble of the key is used.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest key that is currently pressed.
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|pressed| *pressed)
    }
}

/// Maps the host keyboard characters onto the hex keypad.
///
/// The default uses the conventional layout, with the left hand block of a
/// QWERTY keyboard:
/// ```text
/// 1 2 3 4        1 2 3 C
/// q w e r   =>   4 5 6 D
/// a s d f        7 8 9 E
/// z x c v        A 0 B F
/// ```
#[derive(Debug, Clone)]
pub struct Keymap {
    keys: HashMap<char, usize>,
}

impl Default for Keymap {
    fn default() -> Self {
        let keys = keyboard::HOST_LAYOUT
            .iter()
            .flatten()
            .zip(keyboard::LAYOUT.iter().flatten())
            .map(|(host, key)| (*host, *key))
            .collect();
        Self { keys }
    }
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides or adds a mapping.
    pub fn bind(&mut self, host: char, key: usize) {
        debug_assert!(key < keyboard::SIZE);
        self.keys.insert(host.to_ascii_lowercase(), key & 0xF);
    }

    /// The hex key for the given host character, case insensitive.
    pub fn key(&self, host: char) -> Option<usize> {
        self.keys.get(&host.to_ascii_lowercase()).copied()
    }

    /// Builds the keypad state from all the currently held host characters.
    pub fn keys_from<I>(&self, held: I) -> [bool; keyboard::SIZE]
    where
        I: IntoIterator<Item = char>,
    {
        let mut keys = [false; keyboard::SIZE];
        for key in held.into_iter().filter_map(|host| self.key(host)) {
            keys[key] = true;
        }
        keys
    }
}
