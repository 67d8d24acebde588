//! Per-draw-call hooks for the host rendering pipeline.

use crate::toggles::{EffectKind, FeatureToggleSource};

/// RGBA color as passed to the host's vertex color call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl OverlayColor {
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Decision point the host consults while drawing overlays.
///
/// Holds no state besides the toggle source; every call reads the toggles
/// afresh.
#[derive(Clone, Debug)]
pub struct RenderGate<S> {
    toggles: S,
}

impl<S: FeatureToggleSource> RenderGate<S> {
    pub fn new(toggles: S) -> Self {
        Self { toggles }
    }

    pub fn toggles(&self) -> &S {
        &self.toggles
    }

    /// Scales `alpha` by the configured overlay opacity. Color channels pass
    /// through untouched.
    #[inline]
    pub fn adjust_overlay_color(
        &self,
        red: f32,
        green: f32,
        blue: f32,
        alpha: f32,
    ) -> (f32, f32, f32, f32) {
        (
            red,
            green,
            blue,
            alpha * self.toggles.overlay_opacity_multiplier(),
        )
    }

    #[inline]
    pub fn adjust_color(&self, color: OverlayColor) -> OverlayColor {
        let (red, green, blue, alpha) =
            self.adjust_overlay_color(color.red, color.green, color.blue, color.alpha);
        OverlayColor::new(red, green, blue, alpha)
    }

    /// True when the host must skip the whole draw routine for `kind`.
    #[inline]
    pub fn should_suppress_draw(&self, kind: EffectKind) -> bool {
        !self.toggles.is_effect_enabled(kind)
    }

    /// Runs `draw` unless `kind` is suppressed. Returns whether it ran.
    pub fn gate_draw(&self, kind: EffectKind, draw: impl FnOnce()) -> bool {
        if self.should_suppress_draw(kind) {
            return false;
        }
        draw();
        true
    }
}
