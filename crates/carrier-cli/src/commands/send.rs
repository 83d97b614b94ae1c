use anyhow::Result;
use carrier_browser::{
    ChromeFinder, ChromeLauncher, ChromeSession, ProfileManager, SendTiming, dispatch_message,
};
use carrier_core::contacts::load_contacts;
use carrier_core::message::{MessageBody, compose_send_link};
use carrier_core::progress::{ProgressTracker, format_clock};
use carrier_core::report::RunReport;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub struct SendOptions {
    pub contacts: PathBuf,
    pub message: Option<String>,
    pub message_file: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub temp: bool,
    pub client_url: String,
    pub login_wait: u64,
    pub settle_timeout: u64,
    pub delivery_wait: u64,
    pub dry_run: bool,
}

pub fn execute(options: SendOptions, log_path: &Path) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_batch(options, log_path));

    // A parked stdin read from the login wait must not hang process exit
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run_batch(options: SendOptions, log_path: &Path) -> Result<()> {
    // Step 1: Load contacts - no browser work happens if this fails
    let contacts = load_contacts(&options.contacts)
        .map_err(|e| fatal(log_path, "Failed to load contacts", e.into()))?;

    println!(
        "📇 Loaded {} contacts from {}",
        contacts.len(),
        options.contacts.display()
    );

    if contacts.is_empty() {
        println!("Nothing to send - the contact file has no data rows.");
        return Ok(());
    }

    let client_url = Url::parse(&options.client_url)
        .map_err(|e| fatal(log_path, "Invalid client URL", e.into()))?;

    let message = resolve_message(&options)
        .map_err(|e| fatal(log_path, "Failed to read message body", e))?;

    if options.dry_run {
        return dry_run(&client_url, &contacts, &message);
    }

    let timing = SendTiming {
        settle_timeout: Duration::from_secs(options.settle_timeout),
        delivery_wait: Duration::from_secs(options.delivery_wait),
        ..SendTiming::default()
    };

    // Step 2: Find Chrome
    println!("🔍 Locating Chrome...");
    let finder = ChromeFinder::new(options.chrome_path.clone());
    let chrome_binary = finder
        .find()
        .map_err(|e| fatal(log_path, "Chrome setup failed", e.into()))?;
    println!("✅ Found Chrome at: {}", chrome_binary.display());

    // Step 3: Profile - persistent by default so the client stays signed in
    let profile_manager = if options.temp {
        println!("📁 Using temporary profile (login required)");
        ProfileManager::temporary()
            .map_err(|e| fatal(log_path, "Chrome setup failed", e.into()))?
    } else {
        let name = options.profile.as_deref().unwrap_or("default");
        let profile_manager = ProfileManager::named(name)
            .map_err(|e| fatal(log_path, "Chrome setup failed", e.into()))?;
        println!("📁 Using profile: {}", profile_manager.path().display());
        profile_manager
    };

    // Step 4: Launch Chrome and attach a session
    println!("🚀 Launching Chrome...");
    let launcher = ChromeLauncher::new(chrome_binary, profile_manager.path().to_path_buf());
    let session = ChromeSession::start(&launcher)
        .await
        .map_err(|e| fatal(log_path, "Chrome session setup failed", e.into()))?;
    println!("✅ Chrome session ready");

    // Step 5: Landing page, then the out-of-band login step
    if let Err(e) = session.open(client_url.as_str()).await {
        let err = fatal(
            log_path,
            &format!("Error loading {}", client_url),
            e.into(),
        );
        let _ = session.shutdown().await;
        return Err(err);
    }
    await_login(options.login_wait).await;

    // Step 6: Send to each contact in file order
    let total = contacts.len();
    let mut tracker = ProgressTracker::new(total);
    let mut report = RunReport::new();

    for (idx, recipient) in contacts.iter().enumerate() {
        println!("📨 Sending to {} ({}/{})...", recipient, idx + 1, total);

        let outcome = send_one(&session, &client_url, recipient, &message, &timing).await;

        match outcome {
            Ok(()) => report.record_delivered(),
            Err(err) => {
                // Per-item containment: one bad number never halts the batch
                tracing::error!("Failed to send message to {}: {:#}", recipient, err);
                println!(
                    "⚠️  Error for {}: {:#}. Check {} for details.",
                    recipient,
                    err,
                    log_path.display()
                );
                report.record_failure(recipient.clone(), format!("{:#}", err));
            }
        }

        // The estimate uses the count before this attempt, so the first
        // line is always the zero placeholder
        println!(
            "   Estimated time remaining: {}",
            format_clock(tracker.remaining())
        );
        tracker.record_attempt();
    }

    // Step 7: Summary, then the one and only teardown
    println!();
    println!(
        "✅ Batch complete: {} sent, {} failed out of {}",
        report.delivered(),
        report.failed(),
        total
    );
    for failure in report.failures() {
        println!("   ⚠️  {}: {}", failure.recipient, failure.reason);
    }
    println!("📄 Error log: {}", log_path.display());

    if let Err(e) = session.shutdown().await {
        tracing::warn!("Session teardown: {}", e);
    }

    Ok(())
}

/// One send attempt for one recipient. Composition and dispatch errors both
/// surface here so the loop above can contain them per-item.
async fn send_one(
    session: &ChromeSession,
    client_url: &Url,
    recipient: &str,
    message: &MessageBody,
    timing: &SendTiming,
) -> Result<()> {
    let link = compose_send_link(client_url, recipient, message)?;
    dispatch_message(session, &link, timing).await?;
    Ok(())
}

/// Give the operator time to scan the login code. The wait is capped at
/// `login_wait` seconds; pressing Enter starts the batch sooner.
async fn await_login(login_wait: u64) {
    println!("🔐 Scan the login code in the Chrome window if the client asks for one.");
    println!(
        "   Starting in {}s - press Enter to start sooner...",
        login_wait
    );

    let input_task = tokio::task::spawn_blocking(|| {
        let term = console::Term::stdout();
        let _ = term.read_line();
    });

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(login_wait)) => {
            println!("⏱️  Login wait elapsed, starting the batch");
        }
        _ = input_task => {
            println!("▶️  Starting the batch");
        }
    }
}

fn dry_run(client_url: &Url, contacts: &[String], message: &MessageBody) -> Result<()> {
    println!("🔎 Dry run: composing deep links without launching Chrome");
    println!();

    for (idx, recipient) in contacts.iter().enumerate() {
        let link = compose_send_link(client_url, recipient, message)?;
        println!("{:>4}. {} -> {}", idx + 1, recipient, link);
    }

    println!();
    println!("Dry run complete: no messages were sent.");
    Ok(())
}

fn resolve_message(options: &SendOptions) -> Result<MessageBody> {
    match (&options.message, &options.message_file) {
        (Some(text), _) => Ok(MessageBody::new(text.clone())),
        (None, Some(path)) => Ok(MessageBody::from_file(path)?),
        (None, None) => anyhow::bail!("no message provided; use --message or --message-file"),
    }
}

/// Record a fatal setup failure: one error-log entry, one console
/// diagnostic pointing at the log, and the error handed back for a
/// non-zero exit.
fn fatal(log_path: &Path, summary: &str, err: anyhow::Error) -> anyhow::Error {
    tracing::error!("{}: {:#}", summary, err);
    eprintln!("❌ {}: {:#}", summary, err);
    eprintln!("   Check {} for details.", log_path.display());
    err.context(summary.to_string())
}
