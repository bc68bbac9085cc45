use crate::prelude::{println, *};
use colored::Colorize;
use placestools_core::places::format::PlaceSnapOutput;
use placestools_core::places::tools::PlaceSnapArgs;
use placestools_core::places::PlacesResult;

use super::{into_output, print_envelope, print_places, PlacesGateway};

#[derive(Debug, clap::Args, Clone)]
pub struct SnapOptions {
    /// Comma-separated latitude,longitude of the current position
    pub ll: String,

    /// Number of candidate places (1-10)
    #[arg(short, long, default_value = "1")]
    pub limit: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
/// Returns the most likely places at a coordinate pair
pub async fn place_snap_data(gateway: &PlacesGateway, args: &PlaceSnapArgs) -> PlacesResult {
    log::debug!("place_snap: ll={}, limit={}", args.ll, args.limit());

    gateway
        .execute(&args.request())
        .await
        .map_data(|data| args.output(data))
}

pub async fn run(options: SnapOptions, gateway: &PlacesGateway) -> Result<()> {
    let args = PlaceSnapArgs {
        ll: options.ll,
        limit: Some(options.limit),
    };

    let result = place_snap_data(gateway, &args).await;

    if options.json {
        return print_envelope(&result);
    }

    let output: PlaceSnapOutput = into_output(result)?;
    println!(
        "\n{}\n",
        format!("You are most likely at ({}):", output.coordinates).bright_cyan()
    );
    print_places(&output.places);

    Ok(())
}
