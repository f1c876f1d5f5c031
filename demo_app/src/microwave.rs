//! Microwave oven state machine
//!
//! Door, keypad buffer, countdown and light. Ticks arrive once per simulated
//! second from the scene.

use std::fmt;

/// Most digits the keypad buffer accepts
pub const MAX_INPUT_DIGITS: usize = 4;

/// Operating state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicrowaveState {
    /// Waiting for input or a start
    Idle,
    /// Counting down
    Cooking,
    /// Countdown reached zero
    CookingComplete,
    /// Out of order until repaired
    Broken,
}

impl fmt::Display for MicrowaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::Cooking => "COOKING",
            Self::CookingComplete => "COOKING_COMPLETE",
            Self::Broken => "BROKEN",
        };
        f.write_str(name)
    }
}

/// Door position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    /// Swung open; cooking cannot run
    Open,
    /// Shut
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        })
    }
}

/// Minutes and seconds shown on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CookTime {
    /// Whole minutes
    pub minutes: u32,
    /// Seconds past the minute
    pub seconds: u32,
}

impl CookTime {
    /// Split a second count into minutes and seconds
    pub fn from_total_seconds(total: u32) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for CookTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Oven with a door, keypad timer and interior light
#[derive(Debug, Clone)]
pub struct Microwave {
    state: MicrowaveState,
    door: DoorState,
    light_on: bool,
    remaining_seconds: u32,
    input_buffer: Vec<u8>,
}

impl Default for Microwave {
    fn default() -> Self {
        Self::new()
    }
}

impl Microwave {
    /// Idle oven, door closed, no time set
    pub fn new() -> Self {
        Self {
            state: MicrowaveState::Idle,
            door: DoorState::Closed,
            light_on: false,
            remaining_seconds: 0,
            input_buffer: Vec::with_capacity(MAX_INPUT_DIGITS),
        }
    }

    /// Operating state
    pub fn state(&self) -> MicrowaveState {
        self.state
    }

    /// Door position
    pub fn door(&self) -> DoorState {
        self.door
    }

    /// Time left on the display; `None` while broken
    pub fn remaining_time(&self) -> Option<CookTime> {
        match self.state {
            MicrowaveState::Broken => None,
            MicrowaveState::Idle | MicrowaveState::Cooking => {
                Some(CookTime::from_total_seconds(self.remaining_seconds))
            }
            MicrowaveState::CookingComplete => Some(CookTime::default()),
        }
    }

    /// Seconds left on the timer
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Interior light, lit only while cooking
    pub fn is_light_on(&self) -> bool {
        self.light_on && self.state != MicrowaveState::Broken
    }

    /// Text for the timer display
    pub fn display_text(&self) -> String {
        match self.remaining_time() {
            Some(time) => time.to_string(),
            None => "ERROR".to_string(),
        }
    }

    /// Push a keypad digit; ignored while cooking, broken or with the door open
    pub fn input_number(&mut self, digit: u8) {
        if matches!(self.state, MicrowaveState::Cooking | MicrowaveState::Broken) || self.door == DoorState::Open {
            return;
        }
        if self.state == MicrowaveState::CookingComplete {
            self.reset_timer();
            self.state = MicrowaveState::Idle;
        }

        if self.input_buffer.len() < MAX_INPUT_DIGITS {
            self.input_buffer.push(digit.min(9));
            self.apply_input_to_timer();
        }
    }

    /// Clear the keypad buffer and timer unless cooking or broken
    pub fn clear_input(&mut self) {
        if matches!(self.state, MicrowaveState::Cooking | MicrowaveState::Broken) {
            return;
        }
        self.reset_timer();
        self.state = MicrowaveState::Idle;
        self.update_light();
    }

    /// Open the door, pausing any cook in progress
    pub fn open_door(&mut self) {
        if self.door == DoorState::Open {
            return;
        }
        self.door = DoorState::Open;
        match self.state {
            MicrowaveState::Cooking => self.state = MicrowaveState::Idle,
            MicrowaveState::CookingComplete => {
                self.state = MicrowaveState::Idle;
                self.reset_timer();
            }
            _ => {}
        }
        self.update_light();
    }

    /// Close the door
    pub fn close_door(&mut self) {
        if self.door == DoorState::Closed {
            return;
        }
        self.door = DoorState::Closed;
        self.update_light();
    }

    /// Open a closed door or close an open one; returns the new position
    pub fn toggle_door(&mut self) -> DoorState {
        match self.door {
            DoorState::Closed => self.open_door(),
            DoorState::Open => self.close_door(),
        }
        self.door
    }

    /// Start cooking when idle, closed and with time on the clock
    pub fn start_cooking(&mut self) -> bool {
        if !self.can_start_cooking() {
            return false;
        }
        self.state = MicrowaveState::Cooking;
        self.input_buffer.clear();
        self.update_light();
        true
    }

    /// Pause cooking, or clear the timer when not cooking
    pub fn stop_cooking(&mut self) {
        match self.state {
            MicrowaveState::Cooking => self.state = MicrowaveState::Idle,
            MicrowaveState::Idle | MicrowaveState::CookingComplete => {
                self.reset_timer();
                self.state = MicrowaveState::Idle;
            }
            MicrowaveState::Broken => self.reset_timer(),
        }
        self.update_light();
    }

    /// One second of cooking
    pub fn tick(&mut self) {
        if self.state == MicrowaveState::Cooking && self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            if self.remaining_seconds == 0 {
                self.state = MicrowaveState::CookingComplete;
                self.update_light();
            }
        }
    }

    /// Put the oven out of order
    pub fn break_down(&mut self) {
        if self.state == MicrowaveState::Broken {
            return;
        }
        self.state = MicrowaveState::Broken;
        self.door = DoorState::Closed;
        self.remaining_seconds = 0;
        self.input_buffer.clear();
        self.light_on = false;
    }

    /// Return a broken oven to idle with a cleared timer
    pub fn repair(&mut self) {
        if self.state != MicrowaveState::Broken {
            return;
        }
        self.state = MicrowaveState::Idle;
        self.door = DoorState::Closed;
        self.remaining_seconds = 0;
        self.input_buffer.clear();
        self.light_on = false;
    }

    fn can_start_cooking(&self) -> bool {
        self.state == MicrowaveState::Idle && self.door == DoorState::Closed && self.remaining_seconds > 0
    }

    fn update_light(&mut self) {
        self.light_on = self.state == MicrowaveState::Cooking;
    }

    fn reset_timer(&mut self) {
        self.remaining_seconds = 0;
        self.input_buffer.clear();
    }

    // The last two digits are seconds, anything before them minutes.
    // Seconds past 59 carry into minutes.
    fn apply_input_to_timer(&mut self) {
        let split = self.input_buffer.len().saturating_sub(2);
        let (minute_digits, second_digits) = self.input_buffer.split_at(split);

        let to_number = |digits: &[u8]| digits.iter().fold(0u32, |acc, d| acc * 10 + u32::from(*d));
        let mut minutes = to_number(minute_digits);
        let mut seconds = to_number(second_digits);

        minutes += seconds / 60;
        seconds %= 60;
        self.remaining_seconds = minutes * 60 + seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_digits(digits: &[u8]) -> Microwave {
        let mut microwave = Microwave::new();
        for digit in digits {
            microwave.input_number(*digit);
        }
        microwave
    }

    #[test]
    fn test_digits_fill_seconds_then_minutes() {
        assert_eq!(with_digits(&[7]).display_text(), "00:07");
        assert_eq!(with_digits(&[4, 5]).display_text(), "00:45");
        assert_eq!(with_digits(&[1, 3, 0]).display_text(), "01:30");
        assert_eq!(with_digits(&[1, 2, 3, 4]).display_text(), "12:34");
    }

    #[test]
    fn test_seconds_overflow_carries() {
        let microwave = with_digits(&[9, 9]);
        assert_eq!(microwave.remaining_seconds(), 99);
        assert_eq!(microwave.display_text(), "01:39");
    }

    #[test]
    fn test_fifth_digit_is_ignored() {
        let microwave = with_digits(&[1, 2, 3, 4, 5]);
        assert_eq!(microwave.display_text(), "12:34");
    }

    #[test]
    fn test_cook_to_completion() {
        let mut microwave = with_digits(&[3]);
        assert!(microwave.start_cooking());
        assert_eq!(microwave.state(), MicrowaveState::Cooking);
        assert!(microwave.is_light_on());

        microwave.tick();
        microwave.tick();
        assert_eq!(microwave.display_text(), "00:01");
        microwave.tick();

        assert_eq!(microwave.state(), MicrowaveState::CookingComplete);
        assert!(!microwave.is_light_on());
        assert_eq!(microwave.display_text(), "00:00");

        // Extra ticks do nothing once complete.
        microwave.tick();
        assert_eq!(microwave.state(), MicrowaveState::CookingComplete);
    }

    #[test]
    fn test_cannot_start_without_time_or_with_open_door() {
        let mut microwave = Microwave::new();
        assert!(!microwave.start_cooking());

        microwave.input_number(5);
        microwave.open_door();
        assert!(!microwave.start_cooking());
        assert_eq!(microwave.state(), MicrowaveState::Idle);
    }

    #[test]
    fn test_digits_ignored_with_open_door_or_while_cooking() {
        let mut microwave = Microwave::new();
        microwave.open_door();
        microwave.input_number(5);
        assert_eq!(microwave.remaining_seconds(), 0);

        microwave.close_door();
        microwave.input_number(5);
        microwave.start_cooking();
        microwave.input_number(9);
        assert_eq!(microwave.remaining_seconds(), 5);
    }

    #[test]
    fn test_opening_door_pauses_cooking() {
        let mut microwave = with_digits(&[1, 0]);
        microwave.start_cooking();
        microwave.tick();

        microwave.open_door();
        assert_eq!(microwave.state(), MicrowaveState::Idle);
        assert_eq!(microwave.remaining_seconds(), 9);
        assert!(!microwave.is_light_on());

        microwave.close_door();
        assert!(microwave.start_cooking());
    }

    #[test]
    fn test_stop_pauses_then_clears() {
        let mut microwave = with_digits(&[2, 0]);
        microwave.start_cooking();
        microwave.tick();

        microwave.stop_cooking();
        assert_eq!(microwave.state(), MicrowaveState::Idle);
        assert_eq!(microwave.remaining_seconds(), 19);

        microwave.stop_cooking();
        assert_eq!(microwave.remaining_seconds(), 0);
    }

    #[test]
    fn test_new_digit_after_completion_starts_fresh() {
        let mut microwave = with_digits(&[1]);
        microwave.start_cooking();
        microwave.tick();
        assert_eq!(microwave.state(), MicrowaveState::CookingComplete);

        microwave.input_number(4);
        assert_eq!(microwave.state(), MicrowaveState::Idle);
        assert_eq!(microwave.display_text(), "00:04");
    }

    #[test]
    fn test_broken_ignores_everything_but_repair() {
        let mut microwave = with_digits(&[3, 0]);
        microwave.open_door();
        microwave.break_down();

        assert_eq!(microwave.state(), MicrowaveState::Broken);
        assert_eq!(microwave.door(), DoorState::Closed);
        assert_eq!(microwave.remaining_time(), None);
        assert_eq!(microwave.display_text(), "ERROR");

        microwave.input_number(1);
        microwave.clear_input();
        assert!(!microwave.start_cooking());
        assert_eq!(microwave.state(), MicrowaveState::Broken);

        microwave.repair();
        assert_eq!(microwave.state(), MicrowaveState::Idle);
        assert_eq!(microwave.display_text(), "00:00");
    }

    #[test]
    fn test_toggle_door() {
        let mut microwave = Microwave::new();
        assert_eq!(microwave.toggle_door(), DoorState::Open);
        assert_eq!(microwave.toggle_door(), DoorState::Closed);
        assert_eq!(microwave.door().to_string(), "CLOSED");
        assert_eq!(microwave.state().to_string(), "IDLE");
    }
}
