use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utility_billing::assembler::lookup_account;
use utility_billing::prelude::*;

mod report;

#[derive(Parser, Debug)]
#[clap(version, about = "Estimate electricity and gas bills from smart meter readings")]
struct Args {
    /// JSON document with per-member, per-account meter readings
    #[arg(long = "data", default_value = "data/example-readings.json")]
    data: PathBuf,

    /// JSON document with electricity and gas tariffs
    #[arg(long = "tariff", default_value = "data/example-tariff.json")]
    tariff: PathBuf,

    #[arg(short, long, default_value = "member-1")]
    member: String,

    #[arg(short, long, default_value = "account-1")]
    account: String,

    /// Date to extrapolate the bill to (YYYY-MM-DD)
    #[arg(short = 'b', long = "billing-date")]
    billing_date: NaiveDate,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let billing_date = args.billing_date.and_time(NaiveTime::MIN).and_utc();

    let loader = DataLoader::new();
    let data_root = loader.load_data_root(&args.data)?;
    let tariffs = loader.load_dual_tariff(&args.tariff)?;

    let account = lookup_account(&data_root, &args.member, &args.account)?;

    let assembler = BillAssembler::new();
    let (dual, failures) = assembler.assemble_partial(account, &tariffs, billing_date);

    if dual.is_empty() && !failures.is_empty() {
        let summary = failures
            .iter()
            .map(|(kind, error)| format!("{}: {}", kind.name(), error))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("no bill could be estimated: {}", summary);
    }

    print!("{}", report::format_dual_bill(&dual));

    Ok(())
}
