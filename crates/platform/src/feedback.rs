//! Audio feedback

/// Beeper used to confirm or reject user actions.
pub trait Buzzer {
    /// Sound the success tone when `success`, the failure tone otherwise.
    fn feedback(&mut self, success: bool);
}
