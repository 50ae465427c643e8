//! Capability seam to the host's tween engine.
//!
//! The core never interpolates. It issues fire-and-forget requests of the
//! shape `(slot, property, from, to, duration)` and trusts the host to drive
//! them to completion. A host must *overwrite* an in-flight tween when a new
//! request arrives for the same `(slot, property)` key, never queue behind
//! it — re-assigning a slot implicitly cancels whatever was animating.

/// A tweenable property of one slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub enum SlotProperty {
    PositionY,
    Alpha,
    FontSize,
}

/// One interpolation request issued to the animation host.
///
/// `from` is always the core's current target value for the property. It is
/// carried explicitly so a host can start a shortened tween from a snapped
/// intermediate pose without reading core state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct AnimationRequest {
    pub slot: usize,
    pub property: SlotProperty,
    pub from: f32,
    pub to: f32,
    /// Seconds of song time. Zero means "set immediately".
    pub duration: f64,
}

/// Animation host contract.
///
/// Any interpolation backend satisfies this — a tween library, a manual
/// per-frame lerp, or nothing at all. The trait is object-safe; use
/// `dyn AnimationHost` at the call seam.
pub trait AnimationHost {
    fn animate(&mut self, request: AnimationRequest);
}

/// Ignores every request. For headless use where only the frame snapshot's
/// target values matter.
#[derive(Debug, Default)]
pub struct NullAnimationHost;

impl AnimationHost for NullAnimationHost {
    fn animate(&mut self, _request: AnimationRequest) {}
}

/// Records every request in order. Deterministic host for tests and tooling
/// that assert on the exact animation traffic.
#[derive(Debug, Default)]
pub struct RecordingAnimationHost {
    pub requests: Vec<AnimationRequest>,
}

impl AnimationHost for RecordingAnimationHost {
    fn animate(&mut self, request: AnimationRequest) {
        self.requests.push(request);
    }
}
