use std::sync::Arc;
use std::time::Duration;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info, warn};
use crate::delay_manager;
use crate::error::SessionError;

/// What the page currently shows for a given control selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Absent,
    /// Present in the DOM but hidden or disabled.
    Hidden,
    Clickable,
}

/// A controllable browser tab, owned by one page scrape.
pub trait BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// The full rendered markup as it is right now.
    fn page_source(&mut self) -> Result<String, SessionError>;

    fn control_state(&mut self, selector: &str) -> Result<ControlState, SessionError>;

    /// Clicks the first element matching `selector`. Returns `false` if it is gone.
    fn click(&mut self, selector: &str) -> Result<bool, SessionError>;

    /// Polls until the control is clickable. `Ok(false)` means the timeout elapsed.
    fn wait_for_clickable(
        &mut self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<bool, SessionError> {
        delay_manager::wait_until(timeout, poll, || {
            let state = self.control_state(selector)?;
            debug!("Control '{}' is {:?}", selector, state);
            Ok(state == ControlState::Clickable)
        })
    }
}

/// Hands out a fresh session per page.
pub trait SessionLauncher {
    type Session: BrowserSession;

    fn launch(&self) -> Result<Self::Session, SessionError>;
}

pub struct ChromeLauncher {
    headless: bool,
    idle_timeout: Duration,
}

impl ChromeLauncher {
    pub fn new(headless: bool, idle_timeout: Duration) -> Self {
        ChromeLauncher { headless, idle_timeout }
    }
}

impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    fn launch(&self) -> Result<ChromeSession, SessionError> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .idle_browser_timeout(self.idle_timeout)
            .window_size(Some((1920, 1080)))
            .build()
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| SessionError::Launch(format!("{:#}", e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SessionError::Launch(format!("{:#}", e)))?;

        info!("Browser session started (headless: {})", self.headless);
        Ok(ChromeSession { _browser: browser, tab })
    }
}

/// A headless Chrome tab. The browser process is shut down when this is dropped.
pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    fn evaluate_str(&self, expression: &str) -> Result<Option<String>, SessionError> {
        let remote = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| SessionError::Protocol(format!("{:#}", e)))?;
        Ok(remote.value.and_then(|v| v.as_str().map(str::to_owned)))
    }
}

impl BrowserSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        let navigation_error = |e: &dyn std::fmt::Display| SessionError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        };
        self.tab.navigate_to(url).map_err(|e| navigation_error(&e))?;
        self.tab.wait_until_navigated().map_err(|e| navigation_error(&e))?;
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, SessionError> {
        self.tab
            .get_content()
            .map_err(|e| SessionError::Protocol(format!("{:#}", e)))
    }

    fn control_state(&mut self, selector: &str) -> Result<ControlState, SessionError> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return "absent";
                const style = window.getComputedStyle(el);
                const shown = el.offsetParent !== null
                    && style.display !== "none"
                    && style.visibility !== "hidden";
                return shown && !el.disabled ? "clickable" : "hidden";
            }})()"#,
            js_string(selector)?
        );
        match self.evaluate_str(&script)?.as_deref() {
            Some("clickable") => Ok(ControlState::Clickable),
            Some("hidden") => Ok(ControlState::Hidden),
            Some("absent") => Ok(ControlState::Absent),
            other => Err(SessionError::Protocol(format!(
                "unexpected control state {:?}",
                other
            ))),
        }
    }

    fn click(&mut self, selector: &str) -> Result<bool, SessionError> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return "absent";
                el.click();
                return "clicked";
            }})()"#,
            js_string(selector)?
        );
        Ok(self.evaluate_str(&script)?.as_deref() == Some("clicked"))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            warn!("Failed to close browser tab: {:#}", e);
        }
        info!("Browser session released");
    }
}

fn js_string(value: &str) -> Result<String, SessionError> {
    serde_json::to_string(value).map_err(|e| SessionError::Protocol(e.to_string()))
}
