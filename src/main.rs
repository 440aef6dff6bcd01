use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use skybook::application::engine::{BookingEngine, WALLET};
use skybook::domain::ports::CollectionStore;
use skybook::domain::wallet::{Balance, Wallet};
use skybook::infrastructure::in_memory::InMemoryStore;
#[cfg(feature = "storage-rocksdb")]
use skybook::infrastructure::rocksdb::RocksDbStore;
use skybook::interfaces::csv::op_reader::{OpKind, OpReader};
use skybook::interfaces::csv::report_writer::ReportWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Wallet balance to open with when no wallet has been persisted yet
    #[arg(long)]
    opening_balance: Option<Decimal>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        let store = RocksDbStore::open(db_path).into_diagnostic()?;
        return run(store, &cli).await;
    }

    run(InMemoryStore::new(), &cli).await
}

async fn run<S: CollectionStore>(store: S, cli: &Cli) -> Result<()> {
    if let Some(balance) = cli.opening_balance {
        let existing: Vec<Wallet> = store.get_all(WALLET).await.into_diagnostic()?;
        if existing.is_empty() {
            store
                .save(WALLET, &[Wallet::with_opening_balance(Balance::new(balance))])
                .await
                .into_diagnostic()?;
        }
    }
    let engine = BookingEngine::new(store);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OpReader::new(file);
    for op_result in reader.operations() {
        let record = match op_result {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
                continue;
            }
        };
        let result = match record.op {
            OpKind::Book => match record.into_request() {
                Ok(request) => engine.commit(request).await.map(|_| ()),
                Err(e) => Err(e),
            },
            OpKind::Cancel => engine.cancel(&record.booking).await.map(|_| ()),
        };
        if let Err(e) = result {
            eprintln!("Error processing operation: {}", e);
        }
    }

    let bookings = engine.bookings().await.into_diagnostic()?;
    let wallet = engine.wallet().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&bookings, &wallet).into_diagnostic()?;

    Ok(())
}
