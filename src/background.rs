//! Background controller
//!
//! Owns a page host and the enabled field presets, and decides when fields
//! are regenerated: immediately on load, and once per burst of resize
//! events after the quiet period has elapsed.

use std::time::{Duration, Instant};

use stardrift_core::{Debouncer, FieldPlan, FieldPreset, FieldRng};
use stardrift_render::{FieldOutcome, PageHost, RenderError, SkipReason, apply_field};

/// Outcome of one field in a regeneration pass
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub name: String,
    pub outcome: FieldOutcome,
}

/// What a regeneration pass did
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegenerationReport {
    pub fields: Vec<FieldReport>,
}

impl RegenerationReport {
    /// Elements created across all fields
    pub fn elements(&self) -> usize {
        self.fields.iter().map(|f| f.outcome.elements()).sum()
    }

    /// Elements created for one field
    pub fn elements_for(&self, name: &str) -> usize {
        self.field(name).map_or(0, |f| f.outcome.elements())
    }

    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that were skipped, with the reason
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.fields
            .iter()
            .filter_map(|f| f.outcome.skip_reason().map(|r| (f.name.as_str(), r)))
    }

    /// Plans of the fields that were generated
    pub fn plans(&self) -> impl Iterator<Item = &FieldPlan> {
        self.fields.iter().filter_map(|f| f.outcome.plan())
    }
}

/// Regenerates particle fields on a page in response to page events
pub struct Background<H: PageHost> {
    host: H,
    presets: Vec<FieldPreset>,
    rng: FieldRng,
    debouncer: Debouncer,
}

impl<H: PageHost> Background<H> {
    pub fn new(host: H, presets: Vec<FieldPreset>, rng: FieldRng) -> Self {
        Self {
            host,
            presets,
            rng,
            debouncer: Debouncer::default(),
        }
    }

    /// Use a different resize quiet period
    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        self.debouncer = Debouncer::new(quiet);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn presets(&self) -> &[FieldPreset] {
        &self.presets
    }

    /// Replace the presets; takes effect on the next regeneration
    pub fn set_presets(&mut self, presets: Vec<FieldPreset>) {
        self.presets = presets;
    }

    /// Whether a resize is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time left before a pending resize regenerates
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining_at(now)
    }

    /// Regenerate every field now
    pub fn regenerate(&mut self) -> Result<RegenerationReport, RenderError> {
        let mut report = RegenerationReport::default();
        for preset in &self.presets {
            let outcome = apply_field(&mut self.host, preset, &mut self.rng)?;
            report.fields.push(FieldReport {
                name: preset.name.clone(),
                outcome,
            });
        }

        log::info!(
            "Regenerated {} fields: {} elements, {} skipped",
            report.fields.len(),
            report.elements(),
            report.skipped().count()
        );
        Ok(report)
    }

    /// Page finished loading
    pub fn on_load(&mut self) -> Result<RegenerationReport, RenderError> {
        self.debouncer.cancel();
        self.regenerate()
    }

    /// Viewport was resized
    pub fn on_resize(&mut self) {
        self.on_resize_at(Instant::now());
    }

    pub fn on_resize_at(&mut self, now: Instant) {
        log::trace!("Resize at {:?}, regeneration deferred", now);
        self.debouncer.trigger_at(now);
    }

    /// Regenerate if a resize burst has gone quiet
    pub fn tick(&mut self) -> Result<Option<RegenerationReport>, RenderError> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Result<Option<RegenerationReport>, RenderError> {
        if !self.debouncer.poll_at(now) {
            return Ok(None);
        }
        log::debug!("Resize settled, regenerating");
        self.regenerate().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::seeded_rng;
    use stardrift_render::MockPage;

    fn background(width: f64) -> Background<MockPage> {
        let page = MockPage::new()
            .with_widths(Some(width), Some(width))
            .with_selectors(FieldPreset::flowing_background().containers());
        Background::new(page, vec![FieldPreset::flowing_background()], seeded_rng(7))
    }

    #[test]
    fn test_on_load_generates() {
        let mut bg = background(1400.0);
        let report = bg.on_load().unwrap();
        assert_eq!(report.elements(), 192);
        assert_eq!(report.elements_for("background"), 192);
        assert_eq!(report.skipped().count(), 0);
        assert_eq!(report.plans().count(), 1);
    }

    #[test]
    fn test_resize_burst_regenerates_once() {
        let mut bg = background(1280.0);
        bg.on_load().unwrap();
        bg.host_mut().clear_calls();

        let t0 = Instant::now();
        for i in 0..5 {
            bg.on_resize_at(t0 + Duration::from_millis(i * 100));
        }
        assert!(bg.is_pending());
        assert!(bg.tick_at(t0 + Duration::from_millis(600)).unwrap().is_none());
        assert_eq!(bg.host().call_count(), 0);

        let report = bg.tick_at(t0 + Duration::from_millis(700)).unwrap();
        assert!(report.is_some());
        assert!(bg.tick_at(t0 + Duration::from_millis(2000)).unwrap().is_none());
        assert_eq!(bg.host().append_count(), report.unwrap().elements());
    }

    #[test]
    fn test_resize_uses_new_width() {
        let mut bg = background(1400.0);
        bg.on_load().unwrap();

        bg.host_mut().client_width = Some(375.0);
        bg.host_mut().inner_width = Some(375.0);
        let t0 = Instant::now();
        bg.on_resize_at(t0);
        let report = bg.tick_at(t0 + Duration::from_millis(300)).unwrap().unwrap();

        assert_eq!(report.elements(), 102);
        assert_eq!(bg.host().child_count(".floating-stars"), 20);
    }

    #[test]
    fn test_load_cancels_pending_resize() {
        let mut bg = background(1280.0).with_quiet_period(Duration::from_millis(50));
        let t0 = Instant::now();
        bg.on_resize_at(t0);
        bg.on_load().unwrap();
        assert!(!bg.is_pending());
        assert!(bg.tick_at(t0 + Duration::from_millis(100)).unwrap().is_none());
    }

    #[test]
    fn test_skips_are_reported() {
        let page = MockPage::new().with_reduced_motion(true);
        let mut bg = Background::new(
            page,
            vec![FieldPreset::flowing_background(), FieldPreset::skills_crossing()],
            seeded_rng(1),
        );
        let report = bg.on_load().unwrap();
        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0], ("background", &SkipReason::ReducedMotion));
        assert!(matches!(skipped[1].1, SkipReason::MissingFlag(_)));
        assert_eq!(report.elements(), 0);
    }
}
