//! Hello OpenFin scenario runner
//!
//! Drives the fixed Hello OpenFin step sequence: resolve the main window,
//! verify the runtime version, exercise the
//! notification and CPU info buttons, then walk the application through a
//! clean exit. Steps run strictly in order; the first failure skips the
//! rest but the session is closed on every exit path.

use std::time::Duration;

use colored::Colorize;

use crate::common::{Config, Error, Result};
use crate::resolver;
use crate::webdriver::{Capabilities, Element, WebDriverSession};

use super::report::{ScenarioOutcome, ScenarioReport, StepRecord, StepStatus};

/// Display name of the scenario
pub const SCENARIO_NAME: &str = "Hello OpenFin";

/// Step names, in execution order
pub const STEP_NAMES: [&str; 11] = [
    "switch to main window",
    "verify runtime version",
    "find notification button",
    "click notification button",
    "find cpu info button",
    "click cpu info button",
    "switch to cpu info window",
    "find cpu info exit button",
    "click cpu info exit button",
    "exit runtime",
    "confirm termination",
];

const MAIN_WINDOW_TITLE: &str = "Hello OpenFin";
const CPU_INFO_WINDOW_TITLE: &str = "Hello OpenFin CPU Info";

const NOTIFICATION_BUTTON_ID: &str = "desktop-notification";
const CPU_INFO_BUTTON_ID: &str = "cpu-info";
const EXIT_BUTTON_ID: &str = "close-app";

const VERSION_SCRIPT: &str = "var callback = arguments[arguments.length - 1];\
    fin.desktop.System.getVersion(function(v) { callback(v); });";
const EXIT_SCRIPT: &str = "fin.desktop.System.exit();";

/// Mutable state threaded through the steps
///
/// Located elements are only valid while their window keeps focus, which
/// the fixed step order guarantees.
struct ScenarioContext<'a> {
    session: &'a WebDriverSession,
    config: &'a Config,
    notification_button: Option<Element>,
    cpu_info_button: Option<Element>,
    exit_button: Option<Element>,
}

/// Run the full scenario against the configured endpoint
///
/// Opens the session, executes the steps under the scenario timeout, and
/// closes the session whatever happens: step failure, timeout expiry, or
/// success.
pub async fn run(config: &Config) -> Result<ScenarioReport> {
    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        SCENARIO_NAME.white().bold()
    );
    println!("  endpoint: {}", config.endpoint.dimmed());

    let capabilities = Capabilities::from(&config.launch);
    let mut session =
        WebDriverSession::open(&config.endpoint, capabilities, &config.timeouts).await?;

    println!("  {} Session established", "✓".green());
    println!("\n{}", "Steps:".cyan());

    let mut records: Vec<StepRecord> = Vec::with_capacity(STEP_NAMES.len());
    let budget = Duration::from_secs(config.timeouts.scenario_secs);
    let outcome = {
        let mut context = ScenarioContext {
            session: &session,
            config,
            notification_button: None,
            cpu_info_button: None,
            exit_button: None,
        };
        tokio::time::timeout(budget, run_steps(&mut context, &mut records)).await
    };

    // Guaranteed release: close runs before any failure surfaces,
    // including scenario timeout expiry.
    if let Err(e) = session.close().await {
        tracing::warn!("session close failed: {e}");
    }

    let outcome = match outcome {
        Ok(Ok(())) => ScenarioOutcome::Completed,
        Ok(Err(failed_step)) => {
            let record = &records[failed_step];
            ScenarioOutcome::Failed {
                step: record.name,
                cause: record.detail.clone().unwrap_or_default(),
            }
        }
        Err(_) => {
            // The in-flight step never got a record; it is the timed-out one.
            let timed_out = Error::ScenarioTimeout(config.timeouts.scenario_secs);
            let step = STEP_NAMES.get(records.len()).copied().unwrap_or("scenario");
            println!("  {} {}: {}", "✗".red(), step, timed_out);
            records.push(StepRecord {
                name: step,
                status: StepStatus::Failed,
                detail: Some(timed_out.to_string()),
            });
            ScenarioOutcome::Failed {
                step,
                cause: timed_out.to_string(),
            }
        }
    };

    for name in STEP_NAMES.iter().copied().skip(records.len()) {
        records.push(StepRecord {
            name,
            status: StepStatus::Skipped,
            detail: None,
        });
    }

    Ok(ScenarioReport {
        name: SCENARIO_NAME,
        steps: records,
        outcome,
    })
}

/// Execute steps in order, recording each; returns the failing step's
/// index on error
async fn run_steps(
    context: &mut ScenarioContext<'_>,
    records: &mut Vec<StepRecord>,
) -> std::result::Result<(), usize> {
    for (index, name) in STEP_NAMES.iter().copied().enumerate() {
        match execute_step(context, index).await {
            Ok(detail) => {
                match &detail {
                    Some(detail) => {
                        println!("  {} {} ({})", "✓".green(), name, detail.dimmed())
                    }
                    None => println!("  {} {}", "✓".green(), name),
                }
                records.push(StepRecord {
                    name,
                    status: StepStatus::Passed,
                    detail,
                });
            }
            Err(e) => {
                println!("  {} {}: {}", "✗".red(), name, e);
                records.push(StepRecord {
                    name,
                    status: StepStatus::Failed,
                    detail: Some(e.to_string()),
                });
                return Err(index);
            }
        }
    }
    Ok(())
}

/// Execute one step of the fixed sequence
async fn execute_step(context: &mut ScenarioContext<'_>, index: usize) -> Result<Option<String>> {
    let session = context.session;
    let timeouts = &context.config.timeouts;
    let poll = Duration::from_millis(timeouts.poll_ms);
    let settle = Duration::from_millis(timeouts.settle_ms);

    match index {
        // Switch to Hello OpenFin main window
        0 => {
            resolver::switch_to_window_by_title(session, MAIN_WINDOW_TITLE, poll, None).await?;
            Ok(None)
        }

        // Verify OpenFin runtime version
        1 => {
            let expected = &context.config.expected_runtime_version;
            let value = session.execute_async(VERSION_SCRIPT).await?;
            let actual = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
            if &actual != expected {
                return Err(Error::assertion(STEP_NAMES[index], expected, &actual));
            }
            Ok(Some(format!("runtime version {actual}")))
        }

        // Find and click the notification button
        2 => {
            context.notification_button =
                Some(find_expected_element(session, NOTIFICATION_BUTTON_ID).await?);
            Ok(None)
        }
        3 => {
            session.click(located(&context.notification_button, NOTIFICATION_BUTTON_ID)?).await?;
            Ok(None)
        }

        // Find and click the CPU info button; the info window opens
        // asynchronously, hence the settle pause (a known flakiness risk
        // on slow backends)
        4 => {
            context.cpu_info_button =
                Some(find_expected_element(session, CPU_INFO_BUTTON_ID).await?);
            Ok(None)
        }
        5 => {
            session.click(located(&context.cpu_info_button, CPU_INFO_BUTTON_ID)?).await?;
            tokio::time::sleep(settle).await;
            Ok(None)
        }

        // Switch to the CPU info window and close it via its exit button
        6 => {
            resolver::switch_to_window_by_title(session, CPU_INFO_WINDOW_TITLE, poll, None).await?;
            Ok(None)
        }
        7 => {
            context.exit_button = Some(find_expected_element(session, EXIT_BUTTON_ID).await?);
            Ok(None)
        }
        8 => {
            session.click(located(&context.exit_button, EXIT_BUTTON_ID)?).await?;
            tokio::time::sleep(settle).await;
            Ok(None)
        }

        // Ask the runtime to exit, then confirm it actually went away
        9 => {
            session.execute(EXIT_SCRIPT).await?;
            Ok(None)
        }
        10 => confirm_termination(session, timeouts.termination_secs, poll).await,

        _ => unreachable!("step index out of range"),
    }
}

/// Locate an element the scenario requires, failing when absent
///
/// `find_elements_by_id` itself treats "no match" as an empty list; the
/// scenario is where absence becomes an error.
async fn find_expected_element(session: &WebDriverSession, id: &str) -> Result<Element> {
    let mut elements = session.find_elements_by_id(id).await?;
    if elements.is_empty() {
        return Err(Error::ElementNotFound { id: id.to_string() });
    }
    Ok(elements.swap_remove(0))
}

fn located<'a>(element: &'a Option<Element>, id: &str) -> Result<&'a Element> {
    element
        .as_ref()
        .ok_or_else(|| Error::ElementNotFound { id: id.to_string() })
}

/// Poll the remote end until the session reports the application gone
///
/// After `fin.desktop.System.exit()` the runtime tears down its windows
/// and the chromedriver loses its session. Any of: an empty window list,
/// an invalid-session reply, a vanished window, or a dropped connection
/// counts as termination.
async fn confirm_termination(
    session: &WebDriverSession,
    termination_secs: u64,
    poll: Duration,
) -> Result<Option<String>> {
    let budget = Duration::from_secs(termination_secs);
    let wait = async {
        loop {
            match session.window_handles().await {
                Ok(handles) if handles.is_empty() => {
                    return Ok(Some("no windows remain".to_string()))
                }
                Ok(_) => tokio::time::sleep(poll).await,
                Err(e) if e.is_session_gone() => {
                    return Ok(Some("session released by remote end".to_string()))
                }
                Err(Error::WindowGone(_)) => tokio::time::sleep(poll).await,
                Err(Error::Transport(_)) | Err(Error::Connection { .. }) => {
                    return Ok(Some("remote end dropped the connection".to_string()))
                }
                Err(e) => return Err(e),
            }
        }
    };

    tokio::time::timeout(budget, wait)
        .await
        .map_err(|_| Error::TerminationTimeout(termination_secs))?
}
