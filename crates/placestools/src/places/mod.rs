use crate::prelude::{println, *};
use colored::Colorize;
use placestools_core::places::format::PlaceSummary;
use placestools_core::places::PlacesResult;
use serde::de::DeserializeOwned;

pub mod details;
pub mod gateway;
pub mod locate;
pub mod search;
pub mod snap;

// Re-export public data functions
pub use details::place_details_data;
pub use gateway::{PlacesConfig, PlacesGateway};
pub use locate::get_location_data;
pub use search::{search_near_data, search_near_point_data};
pub use snap::place_snap_data;

#[derive(Debug, clap::Parser)]
#[command(name = "places")]
#[command(about = "Foursquare Places operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search for places near a named region
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Search for places near latitude/longitude coordinates
    #[clap(name = "point")]
    Point(search::PointOptions),

    /// Find the most likely place at latitude/longitude coordinates
    #[clap(name = "snap")]
    Snap(snap::SnapOptions),

    /// Show the details of a place by its Foursquare ID
    #[clap(name = "details")]
    Details(details::DetailsOptions),

    /// Approximate the current location from the public IP address
    #[clap(name = "locate")]
    Locate(locate::LocateOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let gateway = PlacesGateway::from_env();

    if global.verbose {
        println!("Foursquare API Base: {}", gateway.config().base_url);
        println!();
    }

    match app.command {
        Commands::Search(options) => search::run_search(options, &gateway).await,
        Commands::Point(options) => search::run_point(options, &gateway).await,
        Commands::Snap(options) => snap::run(options, &gateway).await,
        Commands::Details(options) => details::run(options, &gateway).await,
        Commands::Locate(options) => locate::run(options, &gateway).await,
    }
}

/// Print the raw envelope as pretty JSON
pub fn print_envelope(result: &PlacesResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Unwrap a successful envelope into a typed output, or turn its error into a report
pub fn into_output<T: DeserializeOwned>(result: PlacesResult) -> Result<T> {
    match result {
        PlacesResult::Success(data) => Ok(serde_json::from_value(data)?),
        PlacesResult::Failure(error) => Err(eyre!(error)),
    }
}

/// Print place summaries as a table
pub fn print_places(places: &[PlaceSummary]) {
    if places.is_empty() {
        println!("{}", "No places found.".yellow());
        return;
    }

    places_table(places).printstd();
}

fn places_table(places: &[PlaceSummary]) -> prettytable::Table {
    let mut table = prettytable::Table::new();
    table.set_format(
        prettytable::format::FormatBuilder::new()
            .padding(1, 1)
            .build(),
    );
    table.add_row(prettytable::row!["Name", "Address", "Distance", "Categories", "ID"]);

    for place in places {
        table.add_row(prettytable::row![
            place.name.as_deref().unwrap_or("(No name)"),
            place.address.as_deref().unwrap_or("-"),
            place
                .distance
                .map(|d| format!("{d} m"))
                .unwrap_or_else(|| "-".to_string()),
            place.categories.join(", "),
            place.fsq_id.as_deref().unwrap_or("-"),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use placestools_core::places::format::format_summary;
    use serde_json::json;

    fn cell(table: &prettytable::Table, row: usize, column: usize) -> String {
        table
            .get_row(row)
            .and_then(|r| r.get_cell(column))
            .map(|c| c.get_content())
            .unwrap()
    }

    #[test]
    fn test_places_table_rows() {
        let places = vec![
            format_summary(&json!({
                "fsq_id": "4a1b2c",
                "name": "Joe's Pizza",
                "distance": 120,
                "categories": [{"name": "Pizzeria"}, {"name": "Restaurant"}]
            })),
            format_summary(&json!({})),
        ];

        let table = places_table(&places);

        assert_eq!(table.len(), 3);
        assert_eq!(cell(&table, 0, 0), "Name");
        assert_eq!(cell(&table, 1, 0), "Joe's Pizza");
        assert_eq!(cell(&table, 1, 2), "120 m");
        assert_eq!(cell(&table, 1, 3), "Pizzeria, Restaurant");
        assert_eq!(cell(&table, 2, 0), "(No name)");
        assert_eq!(cell(&table, 2, 4), "-");
    }
}
