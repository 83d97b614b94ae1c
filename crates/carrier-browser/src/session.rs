use crate::{ChromeLauncher, Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::process::Child;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// One exclusively-owned Chrome automation session.
///
/// The session spawns the Chrome process, attaches over the DevTools
/// protocol, and holds the single page the whole batch runs through.
/// `shutdown` consumes the session, so teardown can only happen once.
pub struct ChromeSession {
    child: Child,
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    /// Launch Chrome and attach to it.
    ///
    /// If the CDP attach fails after the process was spawned, the Chrome
    /// child is killed before the error propagates, so a failed session
    /// creation leaves nothing behind to tear down.
    pub async fn start(launcher: &ChromeLauncher) -> Result<Self> {
        let mut child = launcher.launch()?;

        match Self::attach(launcher.debugging_port()).await {
            Ok((browser, page, handler_task)) => Ok(Self {
                child,
                browser,
                page,
                handler_task,
            }),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                Err(e)
            }
        }
    }

    async fn attach(debugging_port: u16) -> Result<(Browser, Page, JoinHandle<()>)> {
        let ws_url = format!("http://localhost:{}", debugging_port);

        // Chrome may not be ready to accept CDP connections immediately
        let (browser, mut handler) = {
            let mut retries = CONNECT_ATTEMPTS;
            loop {
                tracing::debug!("Attempting CDP connection to {}...", ws_url);
                match Browser::connect(&ws_url).await {
                    Ok(connection) => {
                        tracing::debug!("CDP connection established");
                        break connection;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome after {} attempts: {}",
                                CONNECT_ATTEMPTS, e
                            )));
                        }
                        tracing::debug!(
                            "CDP connection attempt failed, retrying... ({} left)",
                            retries
                        );
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        // The handler stream must be drained for any browser command to
        // make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        // Give Chrome a moment to create its initial page
        tokio::time::sleep(Duration::from_millis(500)).await;

        let page = if let Some(page) = browser.pages().await?.first() {
            page.clone()
        } else {
            browser.new_page("about:blank").await?
        };

        Ok((browser, page, handler_task))
    }

    /// Navigate the session's page to a URL.
    pub async fn open(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    /// Wait for an element to appear, polling at `poll_interval` up to
    /// `timeout`. Returns the element as soon as the selector resolves.
    pub async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Element> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) => {
                    if Instant::now() + poll_interval > deadline {
                        return Err(Error::ElementTimeout {
                            selector: selector.to_string(),
                            waited: timeout,
                            last_error: e.to_string(),
                        });
                    }
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }

    /// Tear the session down: stop the protocol handler and kill the Chrome
    /// process. Consumes the session.
    pub async fn shutdown(mut self) -> Result<()> {
        self.handler_task.abort();

        if let Err(e) = self.child.kill() {
            tracing::debug!("Chrome process already gone: {}", e);
        }
        let _ = self.child.wait();

        drop(self.browser);
        Ok(())
    }
}

// Note: session behavior against a live Chrome is not unit-testable here;
// the CLI integration tests cover the failure paths up to the process
// boundary.
