use std::path::PathBuf;

use anyhow::{Context, bail};

use allerscan_core::application::create_service;
use allerscan_core::domain::classification::entities::ImageMime;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::ingestion::ports::IngestionService;

#[derive(Debug, clap::Args)]
pub struct AddProductArgs {
    /// Product display name
    #[arg(long)]
    pub name: String,

    /// UPC code of the product
    #[arg(long)]
    pub upc: String,

    /// Photograph of the ingredient label (jpeg or png)
    #[arg(long)]
    pub image: PathBuf,
}

pub async fn run(config: AllerscanConfig, args: AddProductArgs) -> anyhow::Result<()> {
    let mime = match args
        .image
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => ImageMime::Jpeg,
        Some("png") => ImageMime::Png,
        _ => bail!("image must be a .jpg, .jpeg or .png file"),
    };

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let image_ref = args.image.to_str().map(String::from);

    let service = create_service(config).await?;
    let product = service
        .create_product_from_image(args.name, args.upc, image, mime, image_ref)
        .await?;

    println!("created {} ({})", product.name, product.upc_code);
    Ok(())
}
