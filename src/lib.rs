#![no_std]

pub mod effect;
pub mod fade;
pub mod idle;
pub mod pwm;
pub mod random;
pub mod scheduler;
pub mod task;
pub mod twinkle;

pub use effect::{EffectContext, EffectId, EffectSlot};
pub use fade::{FadeControl, FadeSettings, FadeTask, adjust_linear};
pub use idle::{BlockingIdle, Idle, TickCounter, TickIdle};
pub use pwm::{DutyTable, PWM_CYCLE_MS, PwmTask};
pub use random::Random;
pub use scheduler::{RegistryFull, Scheduler};
pub use task::{Cycle, MAX_SLEEP_MS, Task, Wake};
pub use twinkle::{Twinkle, TwinkleLight, light_duty, ring_distance};

/// Abstract digital output pin
///
/// Implement this trait to support different hardware platforms.
/// The PWM task is generic over this trait and never touches registers.
pub trait DigitalOutput {
    /// Drive the pin as a push-pull output
    fn configure_output(&mut self);

    /// Return the pin to its unused (high impedance) state
    fn release(&mut self);

    /// Switch the LED on
    fn set_high(&mut self);

    /// Switch the LED off
    fn set_low(&mut self);
}
