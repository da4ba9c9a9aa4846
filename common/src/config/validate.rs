use crate::defaults::{MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn validate_tick_interval_ms(tick_interval_ms: u64) -> Result<(), String> {
    if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&tick_interval_ms) {
        return Err(format!(
            "Tick interval must be between {}ms and {}ms",
            MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
        ));
    }
    Ok(())
}
