//! Feature toggles consulted by the render gate.

use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

/// Overlay effects the host pipeline can ask about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    FireOverlay,
    WallOverlay,
    UnderwaterOverlay,
    PumpkinBlur,
    Blindness,
    Nausea,
    LiquidFog,
}

impl EffectKind {
    pub const ALL: [EffectKind; 7] = [
        EffectKind::FireOverlay,
        EffectKind::WallOverlay,
        EffectKind::UnderwaterOverlay,
        EffectKind::PumpkinBlur,
        EffectKind::Blindness,
        EffectKind::Nausea,
        EffectKind::LiquidFog,
    ];
}

/// Read-only view of the feature toggles. Implementations must not fail.
pub trait FeatureToggleSource {
    /// Factor applied to overlay alpha, expected in `[0, 1]`.
    fn overlay_opacity_multiplier(&self) -> f32;

    fn is_effect_enabled(&self, kind: EffectKind) -> bool;
}

impl<S: FeatureToggleSource + ?Sized> FeatureToggleSource for &S {
    fn overlay_opacity_multiplier(&self) -> f32 {
        (**self).overlay_opacity_multiplier()
    }

    fn is_effect_enabled(&self, kind: EffectKind) -> bool {
        (**self).is_effect_enabled(kind)
    }
}

impl<S: FeatureToggleSource + ?Sized> FeatureToggleSource for Rc<S> {
    fn overlay_opacity_multiplier(&self) -> f32 {
        (**self).overlay_opacity_multiplier()
    }

    fn is_effect_enabled(&self, kind: EffectKind) -> bool {
        (**self).is_effect_enabled(kind)
    }
}

/// Toggle values loaded from configuration.
///
/// The opacity multiplier is clamped into `[0, 1]` whenever it is set or
/// deserialized, so consumers can use it as-is.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OverlayToggles {
    #[serde(deserialize_with = "deserialize_unit")]
    opacity: f32,
    disabled_effects: BTreeSet<EffectKind>,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            disabled_effects: BTreeSet::new(),
        }
    }
}

impl OverlayToggles {
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_unit(opacity);
    }

    pub fn set_effect_enabled(&mut self, kind: EffectKind, enabled: bool) {
        if enabled {
            self.disabled_effects.remove(&kind);
        } else {
            self.disabled_effects.insert(kind);
        }
    }

    pub fn disabled_effects(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.disabled_effects.iter().copied()
    }
}

impl FeatureToggleSource for OverlayToggles {
    fn overlay_opacity_multiplier(&self) -> f32 {
        self.opacity
    }

    fn is_effect_enabled(&self, kind: EffectKind) -> bool {
        !self.disabled_effects.contains(&kind)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn deserialize_unit<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_unit)
}
