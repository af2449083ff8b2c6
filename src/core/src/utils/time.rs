use std::time::Instant;

pub struct TimeEstimation;

impl TimeEstimation {
    /// Runs `action` and returns its result together with elapsed
    /// milliseconds.
    pub fn estimate<T, F: FnOnce() -> T>(action: F) -> (T, u32) {
        let now = Instant::now();

        let result = action();

        (result, now.elapsed().as_millis() as u32)
    }
}
