//! Persistent storage abstractions

/// Printer settings in non-volatile memory (EEPROM or flash emulation).
///
/// Results are plain booleans: the only consumer turns them into a
/// success or failure tone.
pub trait SettingsStore {
    /// Write the current settings. Returns `true` on success.
    fn save(&mut self) -> bool;

    /// Reload settings from storage. Returns `true` on success.
    fn load(&mut self) -> bool;

    /// Restore factory defaults in memory.
    fn reset(&mut self);
}

/// Power-loss recovery record storage.
///
/// The record is an opaque byte blob owned by the caller; the store only
/// keeps the most recent one.
pub trait RecoveryStore {
    /// Error type
    type Error: core::fmt::Debug;

    /// Replace the stored record.
    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error>;

    /// Copy the stored record into `buf`, returning its length, or `None`
    /// when nothing has been stored.
    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Whether a print was interrupted by power loss and can be resumed.
    fn interrupted_job(&self) -> bool;

    /// Forget the interrupted job (resume or cancel was chosen).
    fn clear_interrupted(&mut self);
}
