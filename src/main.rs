use clap::Parser;
use enumcol::{DuplicatePolicy, EnumColumn, EnumConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Parse an Enum8/Enum16 type declaration and print its table.
#[derive(Parser, Debug)]
#[command(name = "enumcol", version)]
struct Args {
    /// Type declaration, e.g. "Enum8('a' = 1, 'b' = 2)".
    column_type: String,

    /// Column name used in log and error messages.
    #[arg(short, long, default_value = "column")]
    name: String,

    /// Keep the last of repeated identifiers or codes instead of failing.
    #[arg(long)]
    last_wins: bool,

    /// Reject codes written with leading zeros.
    #[arg(long)]
    strict_numbers: bool,
}

/// Builds the log filter from a `RUST_LOG` value, `warn` when unset.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn main() -> enumcol::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let duplicates = if args.last_wins {
        DuplicatePolicy::LastWins
    } else {
        DuplicatePolicy::Reject
    };
    let config = EnumConfig::default()
        .with_duplicates(duplicates)
        .with_leading_zeros(!args.strict_numbers);

    let column = EnumColumn::parse_with_config(&args.name, &args.column_type, &config)?;

    println!("{column}");
    println!("{:>6}  {}", "CODE", "IDENT");
    println!("{}", "-".repeat(24));
    for (code, ident) in column.table().iter() {
        println!("{code:>6}  {ident:?}");
    }

    Ok(())
}
