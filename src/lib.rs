mod config;
mod error;
mod facade;
pub mod logging;
mod ordering;
mod provider;
mod render;
mod toggles;
mod version;

pub use config::{CompatConfig, HostVersion};
pub use error::{CompatError, CompatResult};
pub use facade::CompatibilityFacade;
pub use ordering::{ReferencePoint, VersionOrder, VersionOrdering};
pub use provider::{
    ExternalVersionProvider, HostUiSystem, ProviderFault, ProviderResult, UiSurface,
    VersionChangeCallback,
};
pub use render::{OverlayColor, RenderGate};
pub use toggles::{EffectKind, FeatureToggleSource, OverlayToggles};
pub use version::{RawVersion, ReleaseChannel, VersionHandle};
