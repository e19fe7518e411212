use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};

use super::view::View;
use crate::config::AnimationConfig;
use crate::model::{AnimationState, Button, PlayPause, SpeedInput};

// Key config, all in one place
const KEY_PLAY_PAUSE: Key = Key::Space;
pub(super) const KEY_SPEED_FOCUS: Key = Key::Tab;
pub(super) const KEY_SPEED_DONE: Key = Key::Return;
const KEY_SPEED_DELETE: Key = Key::Back;

pub struct Controller {
    animation: AnimationState,
    buttons: PlayPause,
    speed_input: SpeedInput,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(config: &AnimationConfig) -> Self {
        let animation = AnimationState {
            paused: config.start_paused,
            speed_offset: config.speed_offset,
        };
        Controller {
            animation,
            buttons: PlayPause::new(animation.paused),
            speed_input: SpeedInput::new(animation.speed_offset),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, view: &mut View) {
        let typing = self.speed_input.is_focused();
        match event.value {
            WindowEvent::Key(KEY_SPEED_FOCUS, Action::Press, _) => {
                self.set_typing(!typing, view);
            }
            WindowEvent::Key(KEY_SPEED_DONE, Action::Press, _) if typing => {
                self.set_typing(false, view);
            }
            WindowEvent::Key(KEY_SPEED_DELETE, Action::Press, _) if typing => {
                self.speed_input.backspace(&mut self.animation);
                self.log_speed();
            }
            WindowEvent::Char(c) if typing => {
                self.speed_input.push(c, &mut self.animation);
                self.log_speed();
            }
            WindowEvent::Key(KEY_PLAY_PAUSE, Action::Press, _) if !typing => {
                match self.buttons.trigger_visible(&mut self.animation) {
                    Button::Pause => tracing::info!("Paused"),
                    Button::Play => tracing::info!("Resumed"),
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                tracing::debug!("Viewport resized to {}x{}", w, h);
            }
            _ => {}
        }
    }

    fn set_typing(&mut self, typing: bool, view: &mut View) {
        self.speed_input.set_focused(typing);
        // WASD would otherwise spin the camera while typing
        view.set_camera_keys_enabled(!typing);
    }

    fn log_speed(&self) {
        tracing::debug!(
            "Speed input {:?} gives offset {}",
            self.speed_input.text(),
            self.animation.speed_offset
        );
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn buttons(&self) -> &PlayPause {
        &self.buttons
    }

    pub fn speed_input(&self) -> &SpeedInput {
        &self.speed_input
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
