use crate::utils::TimeEstimation;
use log::info;

pub struct Logging;

impl Logging {
    /// Runs `action` and logs `message` with the elapsed milliseconds.
    pub fn estimate_result<T, F: FnOnce() -> T>(action: F, message: &str) -> T {
        let (result, elapsed) = TimeEstimation::estimate(action);

        info!("{}, {} ms", message, elapsed);

        result
    }
}
