use uuid::Uuid;

use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::safety::ports::SafetyService;
use allerscan_core::domain::safety::value_objects::SafetyReport;

#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// UPC code of the product
    pub upc: String,

    /// Check against this user's recorded allergies
    #[arg(long, conflicts_with = "term")]
    pub user_id: Option<Uuid>,

    /// Ad-hoc allergy term, repeatable
    #[arg(long = "term")]
    pub term: Vec<String>,
}

pub async fn run(config: AllerscanConfig, args: CheckArgs) -> anyhow::Result<()> {
    let service = create_service(config).await?;

    let report = match args.user_id {
        Some(user_id) => service.check_product_safety(user_id, args.upc.clone()).await?,
        None => {
            service
                .check_product_safety_for_terms(args.upc.clone(), args.term)
                .await?
        }
    };

    let Some(report) = report else {
        println!("no product found for UPC {}", args.upc);
        return Ok(());
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &SafetyReport) {
    println!("{} ({})", report.product.name, report.product.upc_code);

    if report.verdict.is_safe {
        println!("safe: no recorded allergy matches this product");
    } else {
        println!("NOT SAFE, conflicting terms: {}", report.verdict.conflicts.join(", "));
    }

    if report.verdict.product_allergens.is_empty() {
        println!("product allergens: none recorded");
    } else {
        println!(
            "product allergens: {}",
            report.verdict.product_allergens.join(", ")
        );
    }
}
