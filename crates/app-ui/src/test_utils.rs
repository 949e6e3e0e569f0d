//! Test helpers shared by the component tests

use app_platform::haptics::{HapticError, HapticIntensity, HapticPort, Result};
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    pub Haptics {}

    impl HapticPort for Haptics {
        fn pulse(&self, intensity: HapticIntensity) -> Result<()>;
    }
}

/// Port that remembers every pulse it receives
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: Mutex<Vec<HapticIntensity>>,
}

impl RecordingHaptics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pulses(&self) -> Vec<HapticIntensity> {
        self.pulses.lock().unwrap().clone()
    }
}

impl HapticPort for RecordingHaptics {
    fn pulse(&self, intensity: HapticIntensity) -> Result<()> {
        self.pulses.lock().unwrap().push(intensity);
        Ok(())
    }
}

/// Port whose hardware is always missing
#[derive(Debug, Default)]
pub struct BrokenHaptics;

impl HapticPort for BrokenHaptics {
    fn pulse(&self, _intensity: HapticIntensity) -> Result<()> {
        Err(HapticError::Unavailable)
    }
}
