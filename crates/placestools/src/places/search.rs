use crate::prelude::{println, *};
use colored::Colorize;
use placestools_core::places::format::{SearchNearOutput, SearchNearPointOutput};
use placestools_core::places::tools::{SearchNearArgs, SearchNearPointArgs};
use placestools_core::places::PlacesResult;

use super::{into_output, print_envelope, print_places, PlacesGateway};

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// What to look for (e.g., 'coffee shop', 'pizza', 'gym')
    pub what: String,

    /// Region to search in (e.g., 'Los Angeles', 'Times Square')
    #[arg(short = 'w', long = "where")]
    pub region: String,

    /// Number of results (1-50)
    #[arg(short, long, default_value = "5")]
    pub limit: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct PointOptions {
    /// What to look for (e.g., 'coffee shop', 'pizza')
    pub what: String,

    /// Comma-separated latitude,longitude (e.g., '40.74,-74.0')
    #[arg(long)]
    pub ll: String,

    /// Search radius in meters (1-100000)
    #[arg(short, long, default_value = "1000")]
    pub radius: i64,

    /// Number of results (1-50)
    #[arg(short, long, default_value = "5")]
    pub limit: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
/// Searches for places near a named region
pub async fn search_near_data(gateway: &PlacesGateway, args: &SearchNearArgs) -> PlacesResult {
    log::debug!(
        "search_near: what={}, where={}, limit={}",
        args.what,
        args.region,
        args.limit()
    );

    gateway
        .execute(&args.request())
        .await
        .map_data(|data| args.output(data))
}

/// Public data function - used by both CLI and MCP
/// Searches for places around a coordinate pair
pub async fn search_near_point_data(
    gateway: &PlacesGateway,
    args: &SearchNearPointArgs,
) -> PlacesResult {
    log::debug!(
        "search_near_point: what={}, ll={}, radius={}, limit={}",
        args.what,
        args.ll,
        args.radius(),
        args.limit()
    );

    gateway
        .execute(&args.request())
        .await
        .map_data(|data| args.output(data))
}

pub async fn run_search(options: SearchOptions, gateway: &PlacesGateway) -> Result<()> {
    let args = SearchNearArgs {
        region: options.region,
        what: options.what,
        limit: Some(options.limit),
    };

    let result = search_near_data(gateway, &args).await;

    if options.json {
        return print_envelope(&result);
    }

    let output: SearchNearOutput = into_output(result)?;
    println!(
        "\n{} {} {}\n",
        format!("{} result(s) for", output.count).bright_cyan(),
        output.query.white().bold(),
        format!("near {}", output.location).bright_cyan()
    );
    print_places(&output.places);

    Ok(())
}

pub async fn run_point(options: PointOptions, gateway: &PlacesGateway) -> Result<()> {
    let args = SearchNearPointArgs {
        what: options.what,
        ll: options.ll,
        radius: Some(options.radius),
        limit: Some(options.limit),
    };

    let result = search_near_point_data(gateway, &args).await;

    if options.json {
        return print_envelope(&result);
    }

    let output: SearchNearPointOutput = into_output(result)?;
    println!(
        "\n{} {} {}\n",
        format!("{} result(s) for", output.count).bright_cyan(),
        output.query.white().bold(),
        format!(
            "within {} m of {}",
            output.radius_meters, output.coordinates
        )
        .bright_cyan()
    );
    print_places(&output.places);

    Ok(())
}
