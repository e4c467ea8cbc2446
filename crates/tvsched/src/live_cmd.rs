use anyhow::Result;

use tvs_core::types::OutputFormat;
use tvs_player::is_livestreaming;

/// Handle `tvsched probe-live <url>`.
pub(crate) async fn handle_probe_live(url: String, format: OutputFormat) -> Result<()> {
    let client = reqwest::Client::new();
    let live = is_livestreaming(&client, &url).await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "url": url, "live": live }));
        }
        OutputFormat::Text => {
            println!("{}: {}", url, if live { "live" } else { "not live" });
        }
    }
    Ok(())
}
