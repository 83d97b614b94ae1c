use anyhow::Result;
use carrier_cli::{OutputFormat, commands, logging};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carrier")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Send a fixed text message to a list of phone numbers through WhatsApp Web",
    long_about = "Carrier drives a Chrome session through the WhatsApp Web composer to send \
                  one static message to every phone number in a contact CSV, sequentially, \
                  with per-recipient error containment and an append-only error log per run."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the message to every contact in the file
    Send {
        /// Path to the contact CSV file (must have a "Phone" column)
        #[arg(value_name = "CONTACTS")]
        contacts: PathBuf,

        /// Message text to send to every recipient
        #[arg(
            long,
            conflicts_with = "message_file",
            required_unless_present = "message_file"
        )]
        message: Option<String>,

        /// Read the message text from a file instead
        #[arg(long, value_name = "FILE")]
        message_file: Option<PathBuf>,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Named Chrome profile, kept under ~/.carrier/profiles, so the
        /// client stays signed in between runs
        #[arg(long, conflicts_with = "temp")]
        profile: Option<String>,

        /// Use a throwaway Chrome profile (forces a fresh login)
        #[arg(long)]
        temp: bool,

        /// Base URL of the messaging web client
        #[arg(long, default_value = "https://web.whatsapp.com")]
        client_url: String,

        /// Seconds to allow for scanning the login code
        #[arg(long, default_value_t = 15)]
        login_wait: u64,

        /// Seconds to wait for the composer to render before giving up on a contact
        #[arg(long, default_value_t = 10)]
        settle_timeout: u64,

        /// Seconds to wait after clicking send so the message leaves the browser
        #[arg(long, default_value_t = 5)]
        delivery_wait: u64,

        /// Compose and print the deep links without launching Chrome
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a contact file and preview its recipients
    Contacts {
        /// Path to the contact CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::init(cli.verbose)?;

    match cli.command {
        Commands::Send {
            contacts,
            message,
            message_file,
            chrome_path,
            profile,
            temp,
            client_url,
            login_wait,
            settle_timeout,
            delivery_wait,
            dry_run,
        } => commands::send::execute(
            commands::send::SendOptions {
                contacts,
                message,
                message_file,
                chrome_path,
                profile,
                temp,
                client_url,
                login_wait,
                settle_timeout,
                delivery_wait,
                dry_run,
            },
            &log_path,
        ),
        Commands::Contacts { file, format } => commands::contacts::execute(&file, format),
    }
}
