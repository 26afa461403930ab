use chrono::TimeZone;
use utility_billing::prelude::*;
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let (data_path, tariff_path) = if args.len() >= 3 {
        (args[1].clone(), args[2].clone())
    } else {
        (
            "data/example-readings.json".to_string(),
            "data/example-tariff.json".to_string(),
        )
    };

    let loader = DataLoader::new();
    let data_root = loader.load_data_root(&data_path)?;
    let tariffs = loader.load_dual_tariff(&tariff_path)?;

    let assembler = BillAssembler::new();
    let billing_date = Utc.with_ymd_and_hms(2019, 4, 1, 0, 0, 0).unwrap();

    let dual = assembler.assemble_for_member_account(
        &data_root,
        "member-1",
        "account-1",
        &tariffs,
        billing_date,
    )?;

    for kind in UtilityKind::ALL {
        match dual.estimate(kind) {
            Some(bill) => println!(
                "{}: {} {} for £{} over {} days",
                kind.name(),
                bill.usage_estimate().round_dp(0),
                bill.usage_units(),
                bill.price_estimate().round_dp(2),
                bill.billing_period().num_days(),
            ),
            None => println!("{}: no readings", kind.name()),
        }
    }

    Ok(())
}
