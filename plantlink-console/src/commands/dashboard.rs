use plantlink_client::{ApiClient, SummaryService};

/// Print the entity counts overview.
pub async fn run(client: ApiClient) {
    let service = SummaryService::new(client);
    match service.refresh().await {
        Ok(counts) => {
            println!("Devices: {}", counts.devices);
            println!("Assets:  {}", counts.assets);
            println!("Signals: {}", counts.signals);
        }
        Err(error) => println!("Failed to load summary counts: {error}"),
    }
}
