use crate::prelude::{println, *};
use colored::Colorize;
use placestools_core::places::format::{format_detail, PlaceDetail};
use placestools_core::places::tools::PlaceDetailsArgs;
use placestools_core::places::PlacesResult;

use super::{into_output, print_envelope, PlacesGateway};

#[derive(Debug, clap::Args, Clone)]
pub struct DetailsOptions {
    /// Foursquare place ID (fsq_id) from a search result
    pub fsq_id: String,

    /// Comma-separated list of fields to request
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
/// Fetches the details of a single place
pub async fn place_details_data(gateway: &PlacesGateway, args: &PlaceDetailsArgs) -> PlacesResult {
    log::debug!(
        "place_details: fsq_id={}, fields={}",
        args.fsq_id,
        args.fields()
    );

    gateway
        .execute(&args.request())
        .await
        .map_data(|data| format_detail(data, &args.fsq_id))
}

/// Foursquare price tiers run from 1 (cheap) to 4 (very expensive)
fn price_symbol(tier: u64) -> String {
    "$".repeat(tier.clamp(1, 4) as usize)
}

fn format_detail_text(detail: &PlaceDetail) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        detail
            .name
            .as_deref()
            .unwrap_or("(No name)")
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if !detail.categories.is_empty() {
        result.push_str(&format!("{}\n", detail.categories.join(", ").dimmed()));
    }

    if let Some(description) = &detail.description {
        result.push_str(&format!("\n{description}\n"));
    }

    result.push('\n');

    let address = detail
        .location
        .as_ref()
        .and_then(|l| l.get("formatted_address"))
        .and_then(|a| a.as_str());

    let rows = [
        ("Address", address.map(str::to_owned)),
        ("Phone", detail.contact.phone.clone()),
        ("Website", detail.contact.website.clone()),
        (
            "Hours",
            detail
                .hours
                .as_ref()
                .and_then(|h| h.get("display"))
                .and_then(|d| d.as_str())
                .map(str::to_owned),
        ),
        ("Rating", detail.rating.map(|r| format!("{r}"))),
        ("Price", detail.price.map(price_symbol)),
    ];

    for (label, value) in rows {
        if let Some(value) = value {
            result.push_str(&format!("{} {}\n", format!("{label}:").yellow(), value));
        }
    }

    if !detail.tips.is_empty() {
        result.push_str(&format!("\n{}\n", "Tips".green().bold()));
        for tip in &detail.tips {
            result.push_str(&format!("  - {tip}\n"));
        }
    }

    result.push_str(&format!(
        "\n{} {}\n",
        "ID:".dimmed(),
        detail.fsq_id.dimmed()
    ));

    result
}

pub async fn run(options: DetailsOptions, gateway: &PlacesGateway) -> Result<()> {
    let args = PlaceDetailsArgs {
        fsq_id: options.fsq_id,
        fields: options.fields,
    };

    let result = place_details_data(gateway, &args).await;

    if options.json {
        return print_envelope(&result);
    }

    let detail: PlaceDetail = into_output(result)?;
    println!("{}", format_detail_text(&detail));

    Ok(())
}
