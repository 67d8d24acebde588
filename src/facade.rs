//! Fault-contained access to the optional protocol subsystem.
//!
//! Every call into [`ExternalVersionProvider`] goes through
//! `CompatibilityFacade::guarded`, which is the only place provider
//! failures are observed. Public operations turn those failures into a
//! logged, value-level fallback (`None`, empty list, `false`, or a no-op), so
//! feature and UI code keeps working when the subsystem is missing.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, error, instrument};

use crate::error::{CompatError, CompatResult};
use crate::ordering::{ReferencePoint, VersionOrdering};
use crate::provider::{ExternalVersionProvider, HostUiSystem, ProviderFault};
use crate::version::{RawVersion, VersionHandle};

/// Failure inside a guarded call, before it is tagged with the operation name.
enum CallFault {
    Provider(ProviderFault),
    Rejected(CompatError),
}

impl From<ProviderFault> for CallFault {
    fn from(fault: ProviderFault) -> Self {
        CallFault::Provider(fault)
    }
}

/// Version queries and commands over an optional [`ExternalVersionProvider`].
///
/// Build one per process and hand it to the components that need it. The
/// facade keeps no state of its own: every query asks the provider again.
pub struct CompatibilityFacade {
    provider: Option<Rc<dyn ExternalVersionProvider>>,
    ui: Rc<dyn HostUiSystem>,
    default_version: VersionHandle,
}

impl CompatibilityFacade {
    pub fn new(
        provider: Option<Rc<dyn ExternalVersionProvider>>,
        ui: Rc<dyn HostUiSystem>,
    ) -> Self {
        Self {
            provider,
            ui,
            default_version: crate::config::HostVersion::default().handle(),
        }
    }

    /// Replaces the host-native version reported by the `effective_*` queries.
    pub fn with_default_version(mut self, version: VersionHandle) -> Self {
        self.default_version = version;
        self
    }

    pub fn default_version(&self) -> &VersionHandle {
        &self.default_version
    }

    /// True when a provider is attached and reports itself initialized.
    pub fn is_available(&self) -> bool {
        self.guarded("is_available", |_| Ok(())).is_ok()
    }

    pub fn current_version(&self) -> Option<VersionHandle> {
        let result = self.guarded("current_version", |provider| {
            Ok(VersionHandle::from(provider.current_target()?))
        });
        degrade("current_version", result, None, Some)
    }

    /// Release-channel versions, newest first.
    pub fn list_versions(&self) -> Vec<VersionHandle> {
        let result = self.guarded("list_versions", |provider| {
            let mut versions = provider
                .registered_protocols()?
                .into_iter()
                .filter(|version| version.is_release())
                .map(VersionHandle::from)
                .collect::<Vec<_>>();
            versions.reverse();
            Ok(versions)
        });
        degrade("list_versions", result, Vec::new(), |versions| versions)
    }

    /// [`Self::list_versions`] as a JSON array of `{"name", "id"}` objects, for
    /// UI layers that consume JSON.
    pub fn list_versions_json(&self) -> String {
        serde_json::to_string(&self.list_versions()).unwrap_or_else(|err| {
            error!(error = %err, "failed to encode version list");
            "[]".to_string()
        })
    }

    /// Current version, or the host-native default when none is available.
    pub fn effective_version(&self) -> VersionHandle {
        self.current_version()
            .unwrap_or_else(|| self.default_version.clone())
    }

    /// Selectable versions, or just the host-native default when none are.
    pub fn effective_versions(&self) -> Vec<VersionHandle> {
        let versions = self.list_versions();
        if versions.is_empty() {
            vec![self.default_version.clone()]
        } else {
            versions
        }
    }

    /// Switches the provider's target version. Unregistered ids are rejected.
    #[instrument(skip(self))]
    pub fn select_version(&self, id: i32) {
        let result = self.guarded("select_version", |provider| {
            if !provider.is_registered(id)? {
                return Err(CallFault::Rejected(CompatError::UnregisteredProtocol(id)));
            }
            let version = provider.protocol_by_id(id)?;
            provider.set_current_target(version)?;
            Ok(())
        });
        if result.is_ok() {
            debug!(protocol = id, "target protocol changed");
        }
        degrade("select_version", result, (), |()| ());
    }

    /// Opens the provider's selection screen over the active surface, or over
    /// a freshly built default surface when nothing is shown.
    #[instrument(skip(self))]
    pub fn open_selection_ui(&self) {
        let result = self.guarded("open_selection_ui", |provider| {
            let parent = match self.ui.active_surface() {
                Some(surface) => surface,
                None => self.ui.create_default_surface(),
            };
            provider.open_protocol_selection(&parent)?;
            Ok(())
        });
        degrade("open_selection_ui", result, (), |()| ());
    }

    /// Forwards `callback` to the provider's change notification hook.
    ///
    /// Returns whether the provider accepted it.
    pub fn watch_version_changes<F>(&self, callback: F) -> bool
    where
        F: Fn(&VersionHandle, &VersionHandle) + 'static,
    {
        let result = self.guarded("watch_version_changes", move |provider| {
            provider.register_change_callback(Box::new(
                move |previous: &RawVersion, current: &RawVersion| {
                    callback(&VersionHandle::from(previous), &VersionHandle::from(current))
                },
            ))?;
            Ok(())
        });
        degrade("watch_version_changes", result, false, |()| true)
    }

    pub fn is_equal_to(&self, reference: ReferencePoint) -> bool {
        self.check_current("is_equal_to", reference, VersionOrdering::equal_to)
    }

    pub fn is_older_than_or_equal_to(&self, reference: ReferencePoint) -> bool {
        self.check_current(
            "is_older_than_or_equal_to",
            reference,
            VersionOrdering::older_than_or_equal,
        )
    }

    pub fn is_newer_than_or_equal_to(&self, reference: ReferencePoint) -> bool {
        self.check_current(
            "is_newer_than_or_equal_to",
            reference,
            VersionOrdering::newer_than_or_equal,
        )
    }

    pub fn is_equal_1_8(&self) -> bool {
        self.is_equal_to(ReferencePoint::V1_8)
    }

    pub fn is_older_than_or_equal_1_8(&self) -> bool {
        self.is_older_than_or_equal_to(ReferencePoint::V1_8)
    }

    /// 1.7.6 through 1.7.10 share one protocol id.
    pub fn is_older_than_or_equal_1_7_10(&self) -> bool {
        self.is_older_than_or_equal_to(ReferencePoint::V1_7_6)
    }

    pub fn is_older_than_or_equal_1_11_1(&self) -> bool {
        self.is_older_than_or_equal_to(ReferencePoint::V1_11_1)
    }

    pub fn is_newer_than_or_equal_1_16(&self) -> bool {
        self.is_newer_than_or_equal_to(ReferencePoint::V1_16)
    }

    fn check_current(
        &self,
        operation: &'static str,
        reference: ReferencePoint,
        predicate: fn(&VersionHandle, ReferencePoint) -> bool,
    ) -> bool {
        let result = self.guarded(operation, |provider| {
            let current = VersionHandle::from(provider.current_target()?);
            Ok(predicate(&current, reference))
        });
        degrade(operation, result, false, |matched| matched)
    }

    /// Runs `call` against the provider, converting absence, returned faults
    /// and panics into a [`CompatError`].
    fn guarded<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&dyn ExternalVersionProvider) -> Result<T, CallFault>,
    ) -> CompatResult<T> {
        let provider = self.provider.as_deref().ok_or(CompatError::Unavailable)?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if !provider.is_initialized() {
                return Err(CallFault::Rejected(CompatError::Unavailable));
            }
            call(provider)
        }));
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(CallFault::Rejected(err))) => Err(err),
            Ok(Err(CallFault::Provider(fault))) => Err(CompatError::ForeignFault {
                operation,
                message: fault.message().to_string(),
            }),
            Err(payload) => Err(CompatError::ForeignFault {
                operation,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn degrade<T, R>(
    operation: &'static str,
    result: CompatResult<T>,
    fallback: R,
    map: impl FnOnce(T) -> R,
) -> R {
    match result {
        Ok(value) => map(value),
        Err(CompatError::Unavailable) => {
            debug!(operation, "protocol provider unavailable");
            fallback
        }
        Err(err) => {
            error!(operation, error = %err, "protocol provider call failed");
            fallback
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "provider panicked".to_string()
    }
}
