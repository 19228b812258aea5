use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::ingestion::ports::IngestionService;

#[derive(Debug, clap::Args)]
pub struct LookupArgs {
    /// UPC code of the product
    pub upc: String,
}

pub async fn run(config: AllerscanConfig, args: LookupArgs) -> anyhow::Result<()> {
    let service = create_service(config).await?;

    let Some(detail) = service.lookup_product(args.upc.clone()).await? else {
        println!("no product found for UPC {}", args.upc);
        return Ok(());
    };

    println!("{} ({})", detail.product.name, detail.product.upc_code);
    for entry in &detail.ingredients {
        if entry.allergens.is_empty() {
            println!("  - {}", entry.ingredient.title);
        } else {
            let allergens: Vec<&str> = entry
                .allergens
                .iter()
                .map(|allergen| allergen.name.as_str())
                .collect();
            println!("  - {} [{}]", entry.ingredient.title, allergens.join(", "));
        }
    }

    Ok(())
}
