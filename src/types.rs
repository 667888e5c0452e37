//! Platform integer codes and the enums they map to.
//!
//! Every mapping is total: a code the platform does not define lands on the explicit fallback variant.

use num_enum::FromPrimitive;

/// The transport type reported by the platform for a remote device.
#[repr(i32)]
#[derive(Debug, displaydoc::Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    /// unknown
    #[default]
    Unknown = 0,
    /// classic
    Classic = 1,
    /// LE
    Le = 2,
    /// dual mode
    Dual = 3,
}

/// Whether a GATT service is primary or secondary (included by another service).
///
/// The platform reports `0` for primary services; any other code is treated as secondary.
#[repr(i32)]
#[derive(Debug, displaydoc::Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceKind {
    /// primary
    Primary = 0,
    /// secondary
    #[num_enum(default)]
    Secondary = 1,
}

impl ServiceKind {
    /// Returns `true` for [`ServiceKind::Primary`].
    pub fn is_primary(self) -> bool {
        self == ServiceKind::Primary
    }
}

/// Connection state of a remote device, as reported by the platform profile callbacks.
#[repr(i32)]
#[derive(Debug, displaydoc::Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// disconnected
    Disconnected = 0,
    /// connecting
    Connecting = 1,
    /// connected
    Connected = 2,
    /// disconnecting
    Disconnecting = 3,
    /// unknown
    #[default]
    Unknown = -1,
}
