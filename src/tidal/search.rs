use reqwest::Client;

use crate::{config, tidal::auth::TidalSession, types::{SearchResponse, Track}};

/// Searches the catalog with a free-text query and returns the `tracks`
/// result category in the remote ranking order. A response without a
/// `tracks` category yields an empty list.
pub async fn search_tracks(
    session: &mut TidalSession,
    query: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let token = session.token.get_valid_token().await;
    let api_url = format!(
        "{uri}/search?query={query}&types=TRACKS&limit=10&countryCode={country}",
        uri = &config::tidal_api_url(),
        query = urlencoding::encode(query),
        country = session.country_code
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<SearchResponse>().await?;
    Ok(res.tracks.map(|t| t.items).unwrap_or_default())
}
