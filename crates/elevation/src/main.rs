use papapp_shared::elevation::{build_elevation_url, parse_elevation, DEFAULT_ELEVATION_URL};
use papapp_shared::models::GeoPoint;

const USAGE: &str =
    "Usage: ELEVATION_API_KEY=... cargo run -p papapp-elevation -- --lat <degrees> --lng <degrees> [--url <endpoint>]";

fn get_arg(flag: &str) -> Option<String> {
    find_arg(std::env::args(), flag)
}

fn find_arg(args: impl Iterator<Item = String>, flag: &str) -> Option<String> {
    args.skip_while(|a| a != flag).nth(1)
}

/// Parse a coordinate argument and check it against its valid range.
fn parse_coordinate(name: &str, raw: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a number, got '{raw}'"))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(format!("{name} must be within ±{limit}, got {value}"));
    }
    Ok(value)
}

fn required_coordinate(flag: &str, name: &str, limit: f64) -> f64 {
    let raw = get_arg(flag).unwrap_or_else(|| {
        eprintln!("Error: {flag} <{name}> is required");
        eprintln!("{USAGE}");
        std::process::exit(1);
    });
    parse_coordinate(name, &raw, limit).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Render the lookup result for stdout. A missing elevation prints as `null`.
fn format_elevation(elevation: Option<f64>) -> String {
    match elevation {
        Some(meters) => meters.to_string(),
        None => "null".to_string(),
    }
}

fn api_key() -> Option<String> {
    std::env::var("ELEVATION_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

fn main() {
    let latitude = required_coordinate("--lat", "latitude", 90.0);
    let longitude = required_coordinate("--lng", "longitude", 180.0);
    let base_url = get_arg("--url").unwrap_or_else(|| DEFAULT_ELEVATION_URL.to_string());

    let key = api_key().unwrap_or_else(|| {
        eprintln!("Error: ELEVATION_API_KEY is not set");
        eprintln!("{USAGE}");
        std::process::exit(1);
    });

    let point = GeoPoint::new(latitude, longitude);
    let url = build_elevation_url(&base_url, point, &key);

    eprintln!("Fetching elevation for {latitude},{longitude} from {base_url}...");

    let client = reqwest::blocking::Client::new();
    let body = client
        .get(&url)
        .send()
        .and_then(|resp| resp.text())
        .unwrap_or_else(|e| {
            eprintln!("Failed to fetch elevation: {e}");
            std::process::exit(1);
        });

    let elevation = parse_elevation(&body);
    if elevation.is_none() {
        // Surface the provider's own status, e.g. REQUEST_DENIED.
        let status = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("status").and_then(|s| s.as_str()).map(str::to_string));
        eprintln!(
            "Warning: no elevation in response (status: {})",
            status.as_deref().unwrap_or("unknown")
        );
    }

    println!("{}", format_elevation(elevation));
}
