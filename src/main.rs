use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use upi_dispatch::application::dispatcher::{
    DEFAULT_CHOOSER_TITLE, DispatchOutcome, DispatcherConfig, PaymentDispatcher,
};
use upi_dispatch::domain::payment_request::PaymentRequest;
use upi_dispatch::domain::ports::{CorrelationToken, IntentResolverBox, UserNotifierBox};
use upi_dispatch::infrastructure::desktop::{DesktopIntentResolver, StderrNotifier};
use upi_dispatch::infrastructure::in_memory::InMemoryIntentResolver;
use upi_dispatch::interfaces::csv::link_writer::LinkWriter;
use upi_dispatch::interfaces::csv::request_reader::RequestReader;
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the upi://pay link for a payment
    Link(PaymentArgs),
    /// Print the payment fields carried by a upi://pay link as JSON
    Decode { uri: String },
    /// Print a link for every row of a CSV file
    Batch {
        /// CSV with columns amount,note,payee_name,payee_address
        input: PathBuf,
    },
    /// Hand a payment link to an installed UPI application
    Pay {
        #[command(flatten)]
        payment: PaymentArgs,

        /// Record the dispatch instead of opening anything
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, behave as if no UPI app were installed
        #[arg(long, requires = "dry_run")]
        no_handler: bool,

        #[arg(long, default_value = DEFAULT_CHOOSER_TITLE)]
        chooser_title: String,

        /// Correlation token the payment response is matched on
        #[arg(long, default_value_t = CorrelationToken::PAYMENT.0)]
        token: u32,
    },
}

#[derive(Args)]
struct PaymentArgs {
    #[arg(long)]
    amount: String,
    #[arg(long, default_value = "")]
    note: String,
    /// Payee display name
    #[arg(long, default_value = "")]
    name: String,
    /// Payee virtual payment address
    #[arg(long)]
    address: String,
}

impl From<PaymentArgs> for PaymentRequest {
    fn from(args: PaymentArgs) -> Self {
        PaymentRequest::new(args.amount, args.note, args.name, args.address)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Link(payment) => {
            let uri = PaymentRequest::from(payment).to_uri().into_diagnostic()?;
            println!("{uri}");
        }
        Command::Decode { uri } => {
            let uri = Url::parse(&uri).into_diagnostic()?;
            let request = PaymentRequest::from_uri(&uri).into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&request).into_diagnostic()?);
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = LinkWriter::new(stdout.lock());
            for request in RequestReader::new(file).requests() {
                match request {
                    Ok(request) => writer.write_link(&request).into_diagnostic()?,
                    Err(e) => eprintln!("Error reading payment request: {}", e),
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Pay {
            payment,
            dry_run,
            no_handler,
            chooser_title,
            token,
        } => {
            let resolver: IntentResolverBox = match (dry_run, no_handler) {
                (true, true) => Box::new(InMemoryIntentResolver::without_handler()),
                (true, false) => Box::new(InMemoryIntentResolver::with_handler()),
                (false, _) => Box::new(DesktopIntentResolver::new()),
            };
            let notifier: UserNotifierBox = Box::new(StderrNotifier);
            let config = DispatcherConfig {
                chooser_title,
                correlation_token: CorrelationToken(token),
                ..DispatcherConfig::default()
            };
            let dispatcher = PaymentDispatcher::with_config(resolver, notifier, config);

            let request = PaymentRequest::from(payment);
            match dispatcher.initiate(&request).await.into_diagnostic()? {
                DispatchOutcome::Dispatched(pending) => {
                    let uri = request.to_uri().into_diagnostic()?;
                    println!("dispatched {uri} (token {})", pending.token());
                }
                DispatchOutcome::NoHandler => {}
            }
        }
    }

    Ok(())
}
