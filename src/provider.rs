//! Collaborator interfaces the compatibility facade calls into.

use thiserror::Error;

use crate::version::RawVersion;

/// Failure raised by the external protocol subsystem.
///
/// The subsystem's own error taxonomy is not known here, so a fault only
/// carries a message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderFault {
    message: String,
}

impl ProviderFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ProviderResult<T> = Result<T, ProviderFault>;

/// Callback invoked with `(previous, current)` when the target version changes.
pub type VersionChangeCallback = Box<dyn Fn(&RawVersion, &RawVersion)>;

/// Handle to a UI surface (screen) owned by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiSurface {
    pub id: u64,
    pub title: String,
}

impl UiSurface {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// The external subsystem that performs version negotiation and translation.
///
/// Implementations may fail on any call, either by returning a fault or by
/// panicking.
pub trait ExternalVersionProvider {
    /// Whether the subsystem has finished its own startup.
    fn is_initialized(&self) -> bool {
        true
    }

    fn current_target(&self) -> ProviderResult<RawVersion>;

    /// Every registered protocol, oldest first.
    fn registered_protocols(&self) -> ProviderResult<Vec<RawVersion>>;

    fn is_registered(&self, id: i32) -> ProviderResult<bool>;

    fn protocol_by_id(&self, id: i32) -> ProviderResult<RawVersion>;

    fn set_current_target(&self, version: RawVersion) -> ProviderResult<()>;

    /// Opens the subsystem's own selection screen on top of `parent`.
    fn open_protocol_selection(&self, parent: &UiSurface) -> ProviderResult<()>;

    fn register_change_callback(&self, _callback: VersionChangeCallback) -> ProviderResult<()> {
        Err(ProviderFault::new("change notifications are not supported"))
    }
}

/// Host UI queries used when opening the selection screen.
pub trait HostUiSystem {
    fn active_surface(&self) -> Option<UiSurface>;

    /// Builds the host's default root surface (its title screen).
    fn create_default_surface(&self) -> UiSurface;
}
