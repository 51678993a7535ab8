//! Window resolution by title
//!
//! The application opens its windows asynchronously, so a single
//! enumeration pass can miss the one we want. The resolver keeps
//! re-enumerating until a title matches; callers bound the total wait with
//! `tokio::time::timeout` (the scenario runner wraps the whole step
//! sequence) or with an explicit pass limit.

use std::time::Duration;

use crate::common::{Error, Result};
use crate::webdriver::WebDriverSession;

/// Switch session focus to the first open window whose title matches
///
/// Walks the handle list in backend-provided enumeration order, switching
/// focus to each window and reading its title. Returns as soon as a title
/// matches, leaving focus on that window. When a whole pass finds no match
/// (including the pass seeing no windows at all), the handle list is
/// fetched again after `poll`, since the window set changes as the
/// application opens windows.
///
/// With `max_passes = None` an absent title retries indefinitely; the
/// caller's timeout is the only bound. If several windows share the title,
/// the first one in enumeration order wins; which window that is depends
/// on the backend.
pub async fn switch_to_window_by_title(
    session: &WebDriverSession,
    title: &str,
    poll: Duration,
    max_passes: Option<u32>,
) -> Result<()> {
    let mut passes: u32 = 0;

    loop {
        let handles = session.window_handles().await?;
        tracing::debug!(title, windows = handles.len(), pass = passes + 1, "resolving window");

        for handle in &handles {
            session.switch_to_window(handle).await?;
            let current = session.title().await?;
            if current == title {
                tracing::info!(title, %handle, "window resolved");
                return Ok(());
            }
        }

        passes += 1;
        if let Some(max) = max_passes {
            if passes >= max {
                return Err(Error::WindowNotFound {
                    title: title.to_string(),
                    passes,
                });
            }
        }

        tokio::time::sleep(poll).await;
    }
}
