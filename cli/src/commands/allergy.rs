use clap::Subcommand;
use uuid::Uuid;

use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::safety::ports::SafetyService;

#[derive(Debug, clap::Args)]
pub struct AllergyArgs {
    /// Owner of the allergy records
    #[arg(long)]
    pub user_id: Uuid,

    #[command(subcommand)]
    pub action: AllergyAction,
}

#[derive(Debug, Subcommand)]
pub enum AllergyAction {
    /// Record a new allergy term
    Add { text: String },
    /// List recorded allergy terms
    List,
    /// Replace the text of one recorded allergy
    Update { id: Uuid, text: String },
    /// Delete one recorded allergy
    Remove { id: Uuid },
}

pub async fn run(config: AllerscanConfig, args: AllergyArgs) -> anyhow::Result<()> {
    let service = create_service(config).await?;

    match args.action {
        AllergyAction::Add { text } => {
            let allergy = service.add_allergy(args.user_id, text).await?;
            println!("{}  {}", allergy.id, allergy.allergy_text);
        }
        AllergyAction::List => {
            let allergies = service.list_allergies(args.user_id).await?;
            if allergies.is_empty() {
                println!("no allergies recorded");
            }
            for allergy in allergies {
                println!("{}  {}", allergy.id, allergy.allergy_text);
            }
        }
        AllergyAction::Update { id, text } => {
            let allergy = service.update_allergy(id, args.user_id, text).await?;
            println!("{}  {}", allergy.id, allergy.allergy_text);
        }
        AllergyAction::Remove { id } => {
            service.remove_allergy(id, args.user_id).await?;
            println!("removed {id}");
        }
    }

    Ok(())
}
