//! Entity-agnostic command bodies.
//!
//! The per-entity modules only translate clap arguments into forms; the
//! fetch/confirm/submit flows live here, generic over the resource.

use std::io::{self, BufRead, Write};

use tokio_util::sync::CancellationToken;

use plantlink_client::{ApiClient, ApiError, Collection, Resource};
use plantlink_core::FieldErrors;

use crate::table::{self, TableRow};

/// List the full collection.
pub async fn list<R>(client: ApiClient)
where
    R: Resource,
    R::Entity: TableRow,
{
    let mut view = Collection::<R>::new(client);
    view.fetch_all(&CancellationToken::new()).await;
    match view.error() {
        Some(error) => {
            println!("Failed to load {}s: {error}", R::NOUN);
            println!("Check that the backend is reachable and try again.");
        }
        None => print_table(&view),
    }
}

/// Show a single record, rendered with the same table as the full list.
pub async fn get<R>(client: ApiClient, raw_id: &str)
where
    R: Resource,
    R::Entity: TableRow,
{
    let mut view = Collection::<R>::new(client);
    view.fetch_by_id(raw_id, &CancellationToken::new()).await;
    match view.error() {
        Some(error) => println!("{error}"),
        None => print_table(&view),
    }
}

/// Delete one record after an interactive confirmation.
pub async fn remove<R: Resource>(
    client: ApiClient,
    raw_id: &str,
    yes: bool,
) -> color_eyre::Result<()> {
    let Some(id) = parse_id::<R>(raw_id) else {
        println!("Please enter a valid {} ID (positive integer)", R::NOUN);
        return Ok(());
    };
    if !yes && !confirm(R::NOUN)? {
        println!("Cancelled.");
        return Ok(());
    }
    match client.delete::<R>(id).await {
        Ok(()) => println!("Deleted {} {id}.", R::NOUN),
        Err(error) => println!("Failed to delete {}: {error}", R::NOUN),
    }
    Ok(())
}

/// Create a new record and show the refreshed collection.
pub async fn submit_create<R>(client: ApiClient, draft: &R::Draft)
where
    R: Resource,
    R::Entity: TableRow,
{
    match client.create::<R>(draft).await {
        Ok(()) => {
            println!("Saved.");
            list::<R>(client).await;
        }
        Err(error) => print_submit_failure(R::NOUN, &error),
    }
}

/// Replace an existing record and show the refreshed collection.
pub async fn submit_update<R>(client: ApiClient, id: R::Id, draft: &R::Draft)
where
    R: Resource,
    R::Entity: TableRow,
{
    match client.update::<R>(id, draft).await {
        Ok(()) => {
            println!("Saved.");
            list::<R>(client).await;
        }
        Err(error) => print_submit_failure(R::NOUN, &error),
    }
}

pub fn parse_id<R: Resource>(raw: &str) -> Option<R::Id> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n.into()),
        _ => None,
    }
}

/// One line per offending field, in field order.
pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        println!("  {field}: {message}");
    }
}

fn print_table<R>(view: &Collection<R>)
where
    R: Resource,
    R::Entity: TableRow,
{
    let empty = format!("No {}s found", R::NOUN);
    print!("{}", table::render(view.items(), &empty));
}

fn print_submit_failure(noun: &str, error: &ApiError) {
    match error.field_errors() {
        Some(field_errors) => {
            println!("The backend rejected the {noun}:");
            for (field, message) in &field_errors {
                println!("  {field}: {message}");
            }
        }
        None => println!("Failed to save {noun}: {error}"),
    }
}

fn confirm(noun: &str) -> io::Result<bool> {
    print!("Delete this {noun}? This action cannot be undone. [y/N] ");
    io::stdout().flush()?;
    confirm_from(io::stdin().lock())
}

/// Only an explicit yes confirms; anything else, including an empty line,
/// declines.
fn confirm_from(mut input: impl BufRead) -> io::Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
