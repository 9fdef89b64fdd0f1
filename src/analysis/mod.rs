pub mod energy;
pub mod silence;

pub use energy::{compute_rms_windows, EnergyWindow, EnergyWindower};
pub use silence::{detect_silence_runs, SilenceRun};
