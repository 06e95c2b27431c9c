use clap::{Args, Subcommand};

use plantlink_client::{ApiClient, Assets};
use plantlink_core::{Asset, AssetForm};

use crate::commands::entity;
use crate::table::TableRow;

#[derive(Subcommand)]
pub enum AssetAction {
    /// List all assets
    List,
    /// Show one asset by id
    Get { id: String },
    /// Register a new asset
    Add(AssetFields),
    /// Update an existing asset
    Edit {
        id: String,
        #[command(flatten)]
        fields: AssetEdit,
    },
    /// Delete an asset
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct AssetFields {
    /// Asset name (2 to 100 characters)
    #[arg(long)]
    name: String,
    /// Id of the owning device
    #[arg(long)]
    device: String,
}

#[derive(Args)]
pub struct AssetEdit {
    /// New asset name; omit to keep the current one
    #[arg(long)]
    name: Option<String>,
    /// New owning device id; omit to keep the current one
    #[arg(long)]
    device: Option<String>,
}

impl TableRow for Asset {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "DEVICE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.device_id.to_string(),
        ]
    }
}

pub async fn run(client: ApiClient, action: AssetAction) -> color_eyre::Result<()> {
    match action {
        AssetAction::List => entity::list::<Assets>(client).await,
        AssetAction::Get { id } => entity::get::<Assets>(client, &id).await,
        AssetAction::Add(fields) => {
            let form = AssetForm {
                name: fields.name,
                device_id: fields.device,
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_create::<Assets>(client, &draft).await,
                Err(errors) => {
                    println!("The asset was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        AssetAction::Edit { id, fields } => {
            let Some(asset_id) = entity::parse_id::<Assets>(&id) else {
                println!("Please enter a valid asset ID (positive integer)");
                return Ok(());
            };
            let current = match client.fetch_one::<Assets>(asset_id).await {
                Ok(asset) => asset,
                Err(error) => {
                    println!("Failed to load asset {asset_id}: {error}");
                    return Ok(());
                }
            };
            let form = AssetForm {
                name: fields.name.unwrap_or(current.name),
                device_id: fields
                    .device
                    .unwrap_or_else(|| current.device_id.to_string()),
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_update::<Assets>(client, asset_id, &draft).await,
                Err(errors) => {
                    println!("The asset was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        AssetAction::Rm { id, yes } => entity::remove::<Assets>(client, &id, yes).await?,
    }
    Ok(())
}
