//! Externally editable sketch settings.

use std::cell::Cell;
use std::rc::Rc;

pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 1.0;
pub const PROGRESS_STEP: f64 = 0.001;

/// Read-only view of the settings, as seen from the render loop.
pub trait SettingsSource {
    fn progress(&self) -> f64;
}

/// Holds the `progress` scalar edited by the slider.
#[derive(Debug, Default)]
pub struct ProgressSettings {
    progress: Cell<f64>,
}

impl ProgressSettings {
    pub fn new(progress: f64) -> Self {
        let settings = Self::default();
        settings.set_progress(progress);
        settings
    }

    /// Clamps to `[0, 1]` and snaps to the slider step. NaN becomes 0.
    pub fn set_progress(&self, value: f64) {
        let value = if value.is_nan() { PROGRESS_MIN } else { value };
        let clamped = value.clamp(PROGRESS_MIN, PROGRESS_MAX);
        // Dividing by the whole step count keeps results like 0.42 exact.
        let steps_per_unit = (1.0 / PROGRESS_STEP).round();
        let snapped = (clamped * steps_per_unit).round() / steps_per_unit;
        self.progress.set(snapped.clamp(PROGRESS_MIN, PROGRESS_MAX));
    }
}

impl SettingsSource for ProgressSettings {
    fn progress(&self) -> f64 {
        self.progress.get()
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Rc<T> {
    fn progress(&self) -> f64 {
        (**self).progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_snaps() {
        let s = ProgressSettings::new(0.0);
        s.set_progress(1.7);
        assert_eq!(s.progress(), 1.0);
        s.set_progress(-3.0);
        assert_eq!(s.progress(), 0.0);
        s.set_progress(0.12345);
        assert!((s.progress() - 0.123).abs() < 1e-12);
        s.set_progress(f64::NAN);
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn snapped_values_sit_on_the_slider_step() {
        let s = ProgressSettings::new(0.0);
        for value in [0.0004, 0.0006, 0.1234, 0.42, 0.5555, 0.9996] {
            s.set_progress(value);
            let steps = s.progress() / PROGRESS_STEP;
            assert!((steps - steps.round()).abs() < 1e-9, "{value} -> {}", s.progress());
            assert!((s.progress() - value).abs() <= PROGRESS_STEP / 2.0 + 1e-12);
        }
        s.set_progress(0.42);
        assert_eq!(s.progress(), 0.42);
    }

    #[test]
    fn shared_through_rc() {
        let s = Rc::new(ProgressSettings::new(0.5));
        let reader: Rc<dyn SettingsSource> = s.clone();
        s.set_progress(0.25);
        assert_eq!(reader.progress(), 0.25);
    }
}
