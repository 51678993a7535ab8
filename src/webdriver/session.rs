//! WebDriver session client
//!
//! This module handles the communication with the remote automation end
//! (the OpenFin chromedriver), including session negotiation and
//! command/reply handling. One value of [`WebDriverSession`] owns one
//! remote session for its whole lifetime.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::common::config::Timeouts;
use crate::common::{Error, Result};

use super::types::*;

/// Client for one WebDriver session
///
/// All locate/execute/click calls operate against the currently focused
/// window; [`switch_to_window`](Self::switch_to_window) moves focus and
/// invalidates elements found in other windows.
pub struct WebDriverSession {
    http: reqwest::Client,
    endpoint: String,
    session_id: String,
    close_timeout: Duration,
    closed: bool,
}

impl WebDriverSession {
    /// Establish a session against the remote end
    ///
    /// Negotiates capabilities via `POST /session` and forwards the
    /// implicit/page-load/script timeouts to the remote end, as the
    /// original test setup did.
    pub async fn open(
        endpoint: &str,
        capabilities: Capabilities,
        timeouts: &Timeouts,
    ) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();

        // The request timeout sits above the remote end's own script and
        // page-load timeouts so the remote end gets to report its error
        // before the transport gives up.
        let request_timeout =
            Duration::from_millis(timeouts.script_ms.max(timeouts.page_load_ms) + 10_000);
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(request_timeout)
            .build()?;

        let body = NewSessionRequest::new(capabilities);
        tracing::debug!(endpoint = %endpoint, "opening WebDriver session");

        let response = http
            .post(format!("{endpoint}/session"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::connection(&endpoint, e))?;

        let status = response.status();
        let reply: Value = response
            .json()
            .await
            .map_err(|e| Error::connection(&endpoint, e))?;

        if !status.is_success() {
            let message = reply["value"]["message"]
                .as_str()
                .unwrap_or("no error message in reply")
                .to_string();
            return Err(Error::SessionRejected(message));
        }

        // W3C replies nest the id under `value`; legacy chromedrivers put
        // it at the top level.
        let session_id = reply["value"]["sessionId"]
            .as_str()
            .or_else(|| reply["sessionId"].as_str())
            .ok_or_else(|| Error::Protocol("new session reply carries no sessionId".to_string()))?
            .to_string();

        tracing::info!(session = %session_id, "WebDriver session established");

        let session = Self {
            http,
            endpoint,
            session_id,
            close_timeout: Duration::from_secs(timeouts.close_secs),
            closed: false,
        };

        session
            .post(
                "timeouts",
                "timeouts",
                &TimeoutsRequest {
                    implicit: timeouts.implicit_ms,
                    page_load: timeouts.page_load_ms,
                    script: timeouts.script_ms,
                },
            )
            .await?;

        Ok(session)
    }

    /// The backend-issued session identifier
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether [`close`](Self::close) has already run
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the session on the remote end
    ///
    /// Idempotent: the second and later calls are no-ops. Bounded by the
    /// close timeout, and a session the remote end has already forgotten
    /// counts as closed.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let request = self
            .http
            .delete(self.session_url(""))
            .timeout(self.close_timeout);

        tracing::debug!(session = %self.session_id, "closing WebDriver session");

        let close_secs = self.close_timeout.as_secs();
        match tokio::time::timeout(self.close_timeout, request.send()).await {
            Err(_) => Err(Error::CloseTimeout(close_secs)),
            Ok(Err(e)) if e.is_timeout() => Err(Error::CloseTimeout(close_secs)),
            Ok(Err(e)) => Err(Error::Transport(e)),
            Ok(Ok(response)) => {
                match Self::parse_reply("delete session", response).await {
                    Ok(_) => Ok(()),
                    Err(e) if e.is_session_gone() => Ok(()),
                    Err(e) => Err(e),
                }
            }
        }
    }

    // === Window handling ===

    /// Enumerate all currently open window handles
    pub async fn window_handles(&self) -> Result<Vec<WindowHandle>> {
        let value = self.get("get window handles", "window/handles").await?;
        serde_json::from_value(value)
            .map_err(|e| Error::Protocol(format!("window handle list: {e}")))
    }

    /// Switch focus to the given window
    pub async fn switch_to_window(&self, handle: &WindowHandle) -> Result<()> {
        self.post(
            "switch to window",
            "window",
            &SwitchWindowRequest::new(&handle.0),
        )
        .await?;
        Ok(())
    }

    /// Title of the currently focused window
    pub async fn title(&self) -> Result<String> {
        let value = self.get("get title", "title").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Protocol("title reply is not a string".to_string()))
    }

    // === Element handling ===

    /// Find all elements matching an id in the focused window
    ///
    /// An empty result is not an error; callers decide whether a missing
    /// element fails their step.
    pub async fn find_elements_by_id(&self, id: &str) -> Result<Vec<Element>> {
        let value = self
            .post("find elements", "elements", &LocatorRequest::by_id(id))
            .await?;
        let refs: Vec<ElementRef> = serde_json::from_value(value)
            .map_err(|e| Error::Protocol(format!("element list: {e}")))?;
        Ok(refs.into_iter().filter_map(ElementRef::into_element).collect())
    }

    /// Click an element previously found in the focused window
    pub async fn click(&self, element: &Element) -> Result<()> {
        self.post(
            "element click",
            &format!("element/{}/click", element.id),
            &serde_json::json!({}),
        )
        .await?;
        Ok(())
    }

    // === Script execution ===

    /// Run a script in the focused window and return its value
    pub async fn execute(&self, script: &str) -> Result<Value> {
        self.post("execute script", "execute/sync", &ExecuteRequest::new(script))
            .await
    }

    /// Run a script that signals its own completion
    ///
    /// The remote end appends a completion callback as the script's final
    /// argument; the call resolves with the value passed to that callback,
    /// or fails with a script timeout if it never fires.
    pub async fn execute_async(&self, script: &str) -> Result<Value> {
        self.post(
            "execute async script",
            "execute/async",
            &ExecuteRequest::new(script),
        )
        .await
    }

    // === Endpoint probe ===

    /// Query the remote end's readiness, without a session
    pub async fn status(endpoint: &str, connect_secs: u64) -> Result<StatusValue> {
        let endpoint = endpoint.trim_end_matches('/');
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_secs))
            .timeout(Duration::from_secs(connect_secs * 2))
            .build()?;

        let response = http
            .get(format!("{endpoint}/status"))
            .send()
            .await
            .map_err(|e| Error::connection(endpoint, e))?;

        let value = Self::parse_reply("status", response).await?;
        serde_json::from_value(value).map_err(|e| Error::Protocol(format!("status reply: {e}")))
    }

    // === Command plumbing ===

    fn session_url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/session/{}", self.endpoint, self.session_id)
        } else {
            format!("{}/session/{}/{}", self.endpoint, self.session_id, path)
        }
    }

    async fn get(&self, command: &'static str, path: &str) -> Result<Value> {
        self.ensure_open()?;
        tracing::debug!(session = %self.session_id, command, "webdriver GET {path}");
        let response = self.http.get(self.session_url(path)).send().await?;
        Self::parse_reply(command, response).await
    }

    async fn post<B: Serialize>(
        &self,
        command: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        self.ensure_open()?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let body = serde_json::to_string(body)?;
            tracing::debug!(session = %self.session_id, command, "webdriver POST {path} {body}");
        }
        let response = self.http.post(self.session_url(path)).json(body).send().await?;
        Self::parse_reply(command, response).await
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Unwrap a command reply, classifying wire-level errors
    async fn parse_reply(command: &'static str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let reply: Value = response
            .json()
            .await
            .map_err(|e| Error::Protocol(format!("{command}: {e}")))?;

        tracing::debug!(command, %status, "webdriver reply {reply}");

        if status.is_success() {
            // Legacy remote ends report failure via a non-zero numeric
            // status despite HTTP 200.
            if let Some(code) = reply["status"].as_i64() {
                if code != 0 {
                    let message = reply["value"]["message"].as_str().unwrap_or("").to_string();
                    return Err(Error::command_failed(command, &code.to_string(), &message));
                }
            }
            return Ok(reply
                .get("value")
                .cloned()
                .unwrap_or(Value::Null));
        }

        match serde_json::from_value::<ErrorValue>(reply["value"].clone()) {
            Ok(error) => Err(classify_wire_error(command, &error)),
            Err(_) => Err(Error::Protocol(format!(
                "{command}: HTTP {status} without an error envelope"
            ))),
        }
    }
}

/// Map a W3C error code onto the driver's error taxonomy
fn classify_wire_error(command: &'static str, error: &ErrorValue) -> Error {
    match error.error.as_str() {
        "invalid session id" => Error::SessionGone(error.message.clone()),
        "no such window" => Error::WindowGone(error.message.clone()),
        "javascript error" => Error::Script(error.message.clone()),
        "script timeout" => Error::ScriptTimeout(error.message.clone()),
        "timeout" => Error::RemoteTimeout {
            command: command.to_string(),
            message: error.message.clone(),
        },
        "session not created" => Error::SessionRejected(error.message.clone()),
        code => Error::command_failed(command, code, &error.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_error(code: &str, message: &str) -> ErrorValue {
        ErrorValue {
            error: code.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn classifies_session_gone() {
        let error = classify_wire_error("get title", &wire_error("invalid session id", "gone"));
        assert!(error.is_session_gone());
    }

    #[test]
    fn classifies_script_errors() {
        let error = classify_wire_error(
            "execute script",
            &wire_error("javascript error", "fin is not defined"),
        );
        assert!(matches!(error, Error::Script(m) if m == "fin is not defined"));

        let error = classify_wire_error("execute async script", &wire_error("script timeout", ""));
        assert!(matches!(error, Error::ScriptTimeout(_)));
    }

    #[test]
    fn classifies_window_gone() {
        let error = classify_wire_error("get title", &wire_error("no such window", "closed"));
        assert!(matches!(error, Error::WindowGone(_)));
    }

    #[test]
    fn unknown_codes_become_command_failed() {
        let error = classify_wire_error("element click", &wire_error("element not interactable", "covered"));
        match error {
            Error::CommandFailed { command, code, .. } => {
                assert_eq!(command, "element click");
                assert_eq!(code, "element not interactable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
