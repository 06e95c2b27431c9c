use clap::{Args, Subcommand};

use plantlink_client::{ApiClient, Signals};
use plantlink_core::{Signal, SignalForm};

use crate::commands::entity;
use crate::table::TableRow;

#[derive(Subcommand)]
pub enum SignalAction {
    /// List all signal measurement points
    List,
    /// Show one signal by id
    Get { id: String },
    /// Register a new signal
    Add(SignalFields),
    /// Update an existing signal
    Edit {
        id: String,
        #[command(flatten)]
        fields: SignalEdit,
    },
    /// Delete a signal
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct SignalFields {
    /// Signal tag (2 to 100 characters)
    #[arg(long)]
    tag: String,
    /// Register address on the device (1 to 50 characters)
    #[arg(long)]
    register: String,
    /// Id of the owning asset
    #[arg(long)]
    asset: String,
}

#[derive(Args)]
pub struct SignalEdit {
    /// New signal tag; omit to keep the current one
    #[arg(long)]
    tag: Option<String>,
    /// New register address; omit to keep the current one
    #[arg(long)]
    register: Option<String>,
    /// New owning asset id; omit to keep the current one
    #[arg(long)]
    asset: Option<String>,
}

impl TableRow for Signal {
    const HEADERS: &'static [&'static str] = &["ID", "TAG", "REGISTER", "ASSET"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.tag.clone(),
            self.register_address.clone(),
            self.asset_id.to_string(),
        ]
    }
}

pub async fn run(client: ApiClient, action: SignalAction) -> color_eyre::Result<()> {
    match action {
        SignalAction::List => entity::list::<Signals>(client).await,
        SignalAction::Get { id } => entity::get::<Signals>(client, &id).await,
        SignalAction::Add(fields) => {
            let form = SignalForm {
                tag: fields.tag,
                register_address: fields.register,
                asset_id: fields.asset,
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_create::<Signals>(client, &draft).await,
                Err(errors) => {
                    println!("The signal was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        SignalAction::Edit { id, fields } => {
            let Some(signal_id) = entity::parse_id::<Signals>(&id) else {
                println!("Please enter a valid signal ID (positive integer)");
                return Ok(());
            };
            let current = match client.fetch_one::<Signals>(signal_id).await {
                Ok(signal) => signal,
                Err(error) => {
                    println!("Failed to load signal {signal_id}: {error}");
                    return Ok(());
                }
            };
            let form = SignalForm {
                tag: fields.tag.unwrap_or(current.tag),
                register_address: fields.register.unwrap_or(current.register_address),
                asset_id: fields.asset.unwrap_or_else(|| current.asset_id.to_string()),
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_update::<Signals>(client, signal_id, &draft).await,
                Err(errors) => {
                    println!("The signal was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        SignalAction::Rm { id, yes } => entity::remove::<Signals>(client, &id, yes).await?,
    }
    Ok(())
}
