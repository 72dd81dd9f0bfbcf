//! Best-effort update check shown on the splash screen.
//!
//! The fetch runs as a detached task on a private runtime. Startup waits for it
//! with a bounded timeout and then reads whatever the shared status holds. A
//! fetch that outlives the wait is neither cancelled nor awaited: it may still
//! overwrite the status later, after the splash text has already been taken.
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{runtime::Runtime, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::lib::{errors::LaunchError, version::APP_VERSION};

/// Placeholder shown while the update information is being fetched.
pub fn fetching_message(url: &str) -> String {
    format!("Fetching {url}")
}

/// Latest update text, shared between the fetch task and startup.
#[derive(Debug, Clone)]
pub struct UpdateStatus(Arc<Mutex<String>>);

impl UpdateStatus {
    fn new(initial: String) -> Self {
        Self(Arc::new(Mutex::new(initial)))
    }

    /// Value visible right now.
    pub fn current(&self) -> String {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, value: String) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

/// A started fetch.
#[derive(Debug)]
pub struct PendingUpdate {
    url: String,
    status: UpdateStatus,
    task: JoinHandle<()>,
}

impl PendingUpdate {
    pub fn status(&self) -> &UpdateStatus {
        &self.status
    }
}

/// Runs update fetches and waits for them with a bounded timeout.
#[derive(Debug)]
pub struct UpdateChecker {
    runtime: Runtime,
    client: reqwest::Client,
    wait: Duration,
    fallback_message: String,
}

impl UpdateChecker {
    pub fn new(wait: Duration, fallback_message: impl Into<String>) -> Result<Self, LaunchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("update-check")
            .enable_all()
            .build()
            .map_err(|source| LaunchError::UpdateRuntime { source })?;
        let client = reqwest::Client::builder()
            .user_agent(format!("beremiz/{APP_VERSION}"))
            .build()
            .map_err(|source| LaunchError::UpdateClient { source })?;
        Ok(Self {
            runtime,
            client,
            wait,
            fallback_message: fallback_message.into(),
        })
    }

    /// Start fetching `url` in the background.
    pub fn start(&self, url: &str) -> PendingUpdate {
        let status = UpdateStatus::new(fetching_message(url));
        let slot = status.clone();
        let client = self.client.clone();
        let fallback = self.fallback_message.clone();
        let target = url.to_string();

        let task = self.runtime.spawn(async move {
            match fetch(&client, &target).await {
                Ok(body) => {
                    debug!(
                        target: "beremiz::update",
                        url = %target,
                        bytes = body.len(),
                        "Fetched update information"
                    );
                    slot.set(body);
                }
                Err(err) => {
                    warn!(
                        target: "beremiz::update",
                        url = %target,
                        reason = %err,
                        "Update information unavailable"
                    );
                    slot.set(fallback);
                }
            }
        });

        PendingUpdate {
            url: url.to_string(),
            status,
            task,
        }
    }

    /// Wait up to the configured duration, then return the current status.
    pub fn wait(&self, pending: PendingUpdate) -> String {
        let PendingUpdate { url, status, task } = pending;
        let wait = self.wait;
        let outcome = self
            .runtime
            .block_on(async move { tokio::time::timeout(wait, task).await });

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(join_err)) => {
                warn!(
                    target: "beremiz::update",
                    url = %url,
                    reason = %join_err,
                    "Update task aborted"
                );
                status.set(self.fallback_message.clone());
            }
            Err(_) => {
                info!(
                    target: "beremiz::update",
                    url = %url,
                    wait_ms = wait.as_millis() as u64,
                    "Update check still running; continuing startup without it"
                );
            }
        }

        status.current()
    }

    /// Start and wait in one go.
    pub fn check(&self, url: &str) -> String {
        let pending = self.start(url);
        self.wait(pending)
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
        time::Duration,
    };

    pub(crate) fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve one request, optionally holding the connection before answering.
    pub(crate) fn serve_once(response: String, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("can bind loopback listener");
        let addr = listener.local_addr().expect("listener has an address");
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                thread::sleep(delay);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });
        format!("http://{addr}/updateinfo")
    }

    /// A loopback URL nobody listens on.
    pub(crate) fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("can bind loopback listener");
        let addr = listener.local_addr().expect("listener has an address");
        drop(listener);
        format!("http://{addr}/updateinfo")
    }
}

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{Duration, Instant},
    };

    use super::testing::{http_response, refused_url, serve_once};
    use super::*;

    const FALLBACK: &str = "update info unavailable.";

    fn checker(wait: Duration) -> UpdateChecker {
        UpdateChecker::new(wait, FALLBACK).expect("checker should build")
    }

    #[test]
    fn completed_fetch_returns_body() {
        let url = serve_once(
            http_response("200 OK", "Beremiz 1.3 is available"),
            Duration::ZERO,
        );
        let status = checker(Duration::from_secs(2)).check(&url);
        assert_eq!(status, "Beremiz 1.3 is available");
    }

    #[test]
    fn refused_connection_returns_fallback() {
        let status = checker(Duration::from_secs(2)).check(&refused_url());
        assert_eq!(status, FALLBACK);
    }

    #[test]
    fn server_error_returns_fallback() {
        let url = serve_once(http_response("500 Internal Server Error", "boom"), Duration::ZERO);
        let status = checker(Duration::from_secs(2)).check(&url);
        assert_eq!(status, FALLBACK);
    }

    #[test]
    fn malformed_url_returns_fallback() {
        let status = checker(Duration::from_secs(2)).check("not a url");
        assert_eq!(status, FALLBACK);
    }

    #[test]
    fn slow_fetch_leaves_placeholder_and_writes_late() {
        let url = serve_once(
            http_response("200 OK", "late news"),
            Duration::from_millis(400),
        );
        let checker = checker(Duration::from_millis(50));
        let pending = checker.start(&url);
        let status = pending.status().clone();

        let text = checker.wait(pending);
        assert_eq!(text, fetching_message(&url));

        // The detached task keeps running and eventually lands its result.
        let deadline = Instant::now() + Duration::from_secs(5);
        while status.current() != "late news" && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(status.current(), "late news");
    }
}
