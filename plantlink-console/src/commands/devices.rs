use clap::{Args, Subcommand};

use plantlink_client::{ApiClient, Devices};
use plantlink_core::{Device, DeviceForm};

use crate::commands::entity;
use crate::table::TableRow;

#[derive(Subcommand)]
pub enum DeviceAction {
    /// List all devices
    List,
    /// Show one device by id
    Get { id: String },
    /// Register a new device
    Add(DeviceFields),
    /// Update an existing device
    Edit {
        id: String,
        #[command(flatten)]
        fields: DeviceEdit,
    },
    /// Delete a device
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct DeviceFields {
    /// Device name (2 to 100 characters)
    #[arg(long)]
    name: String,
    /// Optional free-form description
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Args)]
pub struct DeviceEdit {
    /// New device name; omit to keep the current one
    #[arg(long)]
    name: Option<String>,
    /// New description; omit to keep the current one
    #[arg(long)]
    description: Option<String>,
}

impl TableRow for Device {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "DESCRIPTION"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

pub async fn run(client: ApiClient, action: DeviceAction) -> color_eyre::Result<()> {
    match action {
        DeviceAction::List => entity::list::<Devices>(client).await,
        DeviceAction::Get { id } => entity::get::<Devices>(client, &id).await,
        DeviceAction::Add(fields) => {
            let form = DeviceForm {
                name: fields.name,
                description: fields.description,
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_create::<Devices>(client, &draft).await,
                Err(errors) => {
                    println!("The device was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        DeviceAction::Edit { id, fields } => {
            let Some(device_id) = entity::parse_id::<Devices>(&id) else {
                println!("Please enter a valid device ID (positive integer)");
                return Ok(());
            };
            // Load current values first so omitted flags keep them.
            let current = match client.fetch_one::<Devices>(device_id).await {
                Ok(device) => device,
                Err(error) => {
                    println!("Failed to load device {device_id}: {error}");
                    return Ok(());
                }
            };
            let form = DeviceForm {
                name: fields.name.unwrap_or(current.name),
                description: fields
                    .description
                    .unwrap_or_else(|| current.description.unwrap_or_default()),
            };
            match form.to_draft() {
                Ok(draft) => entity::submit_update::<Devices>(client, device_id, &draft).await,
                Err(errors) => {
                    println!("The device was not saved:");
                    entity::print_field_errors(&errors);
                }
            }
        }
        DeviceAction::Rm { id, yes } => entity::remove::<Devices>(client, &id, yes).await?,
    }
    Ok(())
}
