/// All possible errors in this crate.
///
/// `E` is the error type of the [`crate::Transport`] in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: core::fmt::Debug> {
    /// The handle has not been initialized with [`crate::Sen5x::init`].
    #[cfg_attr(feature = "thiserror", error("driver is not initialized"))]
    NotInitialized,
    /// Opening, closing, writing to or reading from the bus failed.
    #[cfg_attr(feature = "thiserror", error("transport error: {0:?}"))]
    Transport(E),
    /// A received word did not match its checksum.
    #[cfg_attr(feature = "thiserror", error("crc check failed"))]
    CrcMismatch,
    /// The sensor has no new measurement available yet.
    #[cfg_attr(feature = "thiserror", error("data is not ready"))]
    DataNotReady,
    /// The operation is not available on the selected chip variant.
    #[cfg_attr(feature = "thiserror", error("operation not supported by this variant"))]
    UnsupportedVariant,
    /// A parameter was outside its allowed range, a payload was too long or
    /// the sensor returned an undefined value.
    #[cfg_attr(feature = "thiserror", error("invalid argument"))]
    InvalidArgument,
    /// The transport or delay has not been linked to the handle.
    #[cfg_attr(feature = "thiserror", error("required capability is not linked"))]
    MissingCapability,
    /// The soft reset command could not be sent.
    #[cfg_attr(feature = "thiserror", error("reset failed: {0:?}"))]
    ResetFailed(E),
}