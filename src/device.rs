use crate::DeviceType;

/// A platform-specific device identifier.
///
/// On android it contains the Bluetooth address in the format `AB:CD:EF:01:23:45`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(String);

impl DeviceId {
    /// Wraps the identifier string reported by the platform stack.
    pub fn new(id: impl Into<String>) -> Self {
        DeviceId(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A snapshot of a remote Bluetooth device taken at conversion time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    id: DeviceId,
    name: Option<String>,
    device_type: DeviceType,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.id),
            None => std::fmt::Display::fmt(&self.id, f),
        }
    }
}

impl Device {
    /// Creates a device snapshot.
    pub fn new(id: DeviceId, name: Option<String>, device_type: DeviceType) -> Self {
        Device { id, name, device_type }
    }

    /// Creates a device snapshot from the raw platform type code.
    pub fn from_platform(address: impl Into<String>, name: Option<String>, type_code: i32) -> Self {
        Device::new(DeviceId::new(address), name, DeviceType::from(type_code))
    }

    /// This device's unique identifier
    #[inline]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// The name the platform reports for this device, if any
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The transport type of this device
    #[inline]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
}
