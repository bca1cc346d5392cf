use std::thread;
use std::time::{Duration, Instant};

/// Re-checks `condition` every `poll` until it holds or `timeout` elapses.
/// Returns `Ok(false)` on timeout. The condition is always checked at least once.
pub fn wait_until<F, E>(timeout: Duration, poll: Duration, mut condition: F) -> Result<bool, E>
where
    F: FnMut() -> Result<bool, E>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if condition()? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        thread::sleep(poll.min(deadline - now));
    }
}
