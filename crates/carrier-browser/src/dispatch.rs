use crate::{ChromeSession, Result};
use std::time::Duration;

/// Selector for the composer's send control in the messaging client UI.
pub const SEND_CONTROL_SELECTOR: &str = r#"span[data-icon="send"]"#;

/// Timing knobs for one send attempt.
#[derive(Debug, Clone)]
pub struct SendTiming {
    /// Longest the composer gets to render its send control.
    pub settle_timeout: Duration,
    /// Interval between element-presence polls.
    pub poll_interval: Duration,
    /// Fixed wait after the click so the message leaves the browser before
    /// the page navigates away. There is no readiness signal to poll for
    /// here.
    pub delivery_wait: Duration,
}

impl Default for SendTiming {
    fn default() -> Self {
        Self {
            settle_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(500),
            delivery_wait: Duration::from_secs(5),
        }
    }
}

/// Perform exactly one send attempt through an open session.
///
/// Navigates to the pre-composed deep link, waits for the composer's send
/// control, clicks it, and allows the delivery wait to pass. Any failing
/// step surfaces as an error for the caller to contain; nothing here checks
/// that the message was actually delivered beyond the click succeeding.
pub async fn dispatch_message(
    session: &ChromeSession,
    link: &str,
    timing: &SendTiming,
) -> Result<()> {
    session.open(link).await?;

    let send_control = session
        .wait_for(SEND_CONTROL_SELECTOR, timing.settle_timeout, timing.poll_interval)
        .await?;
    send_control.click().await?;

    tokio::time::sleep(timing.delivery_wait).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_timing_defaults() {
        let timing = SendTiming::default();

        assert_eq!(timing.settle_timeout, Duration::from_secs(10));
        assert_eq!(timing.poll_interval, Duration::from_millis(500));
        assert_eq!(timing.delivery_wait, Duration::from_secs(5));
    }

    #[test]
    fn test_send_control_selector_targets_send_icon() {
        assert!(SEND_CONTROL_SELECTOR.contains("data-icon"));
        assert!(SEND_CONTROL_SELECTOR.contains("send"));
    }
}
