use serde::{Deserialize, Serialize};

/// Offset used whenever the speed input can't be read as a number.
pub const DEFAULT_SPEED_OFFSET: f64 = 0.01;

/// Largest offset magnitude that is accepted. Beyond this the revolution
/// angle overflows to infinity within a long session.
pub const MAX_SPEED_OFFSET: f64 = 1.0e6;

/// Everything the frame driver needs to know about the user's playback
/// controls. Only the play/pause triggers and the speed input write to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub paused: bool,
    /// Added to every body's base revolution speed.
    pub speed_offset: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState {
            paused: false,
            speed_offset: DEFAULT_SPEED_OFFSET,
        }
    }
}

/// How self-rotation advances between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SpinMode {
    /// Fixed increment per rendered frame, so spin speed follows the frame rate.
    PerFrame,
    /// Increment scaled by elapsed time, matching `PerFrame` at 60 fps.
    Timed,
}

impl Default for SpinMode {
    fn default() -> Self {
        SpinMode::Timed
    }
}

/// Reads a speed offset the way a browser reads a float out of a text field:
/// the longest leading numeric prefix wins, trailing junk is ignored. Anything
/// that yields no number, or one larger than [`MAX_SPEED_OFFSET`], falls back
/// to [`DEFAULT_SPEED_OFFSET`].
pub fn parse_speed_offset(input: &str) -> f64 {
    parse_float_prefix(input)
        .filter(|x| x.abs() <= MAX_SPEED_OFFSET)
        .unwrap_or(DEFAULT_SPEED_OFFSET)
}

fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let count_digits = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Only take the exponent if it has digits behind it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Pause,
}

/// The pair of play/pause buttons. Exactly one of them is visible at a time,
/// and only the visible one does anything when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayPause {
    play_visible: bool,
    pause_visible: bool,
}

impl PlayPause {
    pub fn new(paused: bool) -> Self {
        PlayPause {
            play_visible: paused,
            pause_visible: !paused,
        }
    }

    pub fn is_visible(&self, button: Button) -> bool {
        match button {
            Button::Play => self.play_visible,
            Button::Pause => self.pause_visible,
        }
    }

    pub fn visible_button(&self) -> Button {
        if self.pause_visible {
            Button::Pause
        } else {
            Button::Play
        }
    }

    /// Returns whether anything changed. Hidden buttons can't be pressed.
    pub fn trigger(&mut self, button: Button, state: &mut AnimationState) -> bool {
        if !self.is_visible(button) {
            return false;
        }

        let paused = button == Button::Pause;
        state.paused = paused;
        self.pause_visible = !paused;
        self.play_visible = paused;
        true
    }

    /// Presses whichever button is showing, and returns it.
    pub fn trigger_visible(&mut self, state: &mut AnimationState) -> Button {
        let button = self.visible_button();
        self.trigger(button, state);
        button
    }
}

/// Text field bound to the global speed offset. Every edit re-parses the
/// whole field.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedInput {
    text: String,
    focused: bool,
}

impl SpeedInput {
    pub fn new(initial: f64) -> Self {
        SpeedInput {
            text: initial.to_string(),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn push(&mut self, c: char, state: &mut AnimationState) {
        if c.is_control() {
            return;
        }
        self.text.push(c);
        self.commit(state);
    }

    pub fn backspace(&mut self, state: &mut AnimationState) {
        if self.text.pop().is_some() {
            self.commit(state);
        }
    }

    fn commit(&self, state: &mut AnimationState) {
        state.speed_offset = parse_speed_offset(&self.text);
    }
}
