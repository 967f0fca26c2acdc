use reqwest::Client;

use crate::{
    config,
    tidal::auth::TidalSession,
    types::{Playlist, PlaylistTracksResponse, Track, UserPlaylistsResponse},
};

const PAGE_SIZE: u64 = 50;

/// Retrieves all of the user's playlists.
///
/// The endpoint pages at 50 items; pages are drained sequentially until the
/// reported total is reached. Network and API errors propagate immediately,
/// there is no retry.
pub async fn get_user_playlists(session: &mut TidalSession) -> Result<Vec<Playlist>, reqwest::Error> {
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut offset = 0;

    loop {
        let token = session.token.get_valid_token().await;
        let api_url = format!(
            "{uri}/users/{user_id}/playlists?limit={limit}&offset={offset}&countryCode={country}",
            uri = &config::tidal_api_url(),
            user_id = session.user_id,
            limit = PAGE_SIZE,
            offset = offset,
            country = session.country_code
        );

        let client = Client::new();
        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let res = response.json::<UserPlaylistsResponse>().await?;
        let page_len = res.items.len() as u64;
        playlists.extend(res.items);

        offset += page_len;
        if page_len == 0 || offset >= res.total_number_of_items {
            return Ok(playlists);
        }
    }
}

/// Creates a new playlist with the given title and description, returning
/// the remote playlist object.
pub async fn create_playlist(
    session: &mut TidalSession,
    title: &str,
    description: &str,
) -> Result<Playlist, reqwest::Error> {
    let token = session.token.get_valid_token().await;
    let api_url = format!(
        "{uri}/users/{user_id}/playlists?countryCode={country}",
        uri = &config::tidal_api_url(),
        user_id = session.user_id,
        country = session.country_code
    );

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .form(&[("title", title), ("description", description)])
        .send()
        .await?
        .error_for_status()?;

    response.json::<Playlist>().await
}

/// Retrieves the full track list of a playlist, draining all pages.
pub async fn get_playlist_tracks(
    session: &mut TidalSession,
    playlist_uuid: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut offset = 0;

    loop {
        let token = session.token.get_valid_token().await;
        let api_url = format!(
            "{uri}/playlists/{uuid}/tracks?limit={limit}&offset={offset}&countryCode={country}",
            uri = &config::tidal_api_url(),
            uuid = playlist_uuid,
            limit = PAGE_SIZE,
            offset = offset,
            country = session.country_code
        );

        let client = Client::new();
        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let res = response.json::<PlaylistTracksResponse>().await?;
        let page_len = res.items.len() as u64;
        tracks.extend(res.items);

        offset += page_len;
        if page_len == 0 || offset >= res.total_number_of_items {
            return Ok(tracks);
        }
    }
}

/// Adds a single track to a playlist. This is a remote mutation with no
/// rollback; a failure propagates and aborts the remaining run.
///
/// The `If-None-Match: *` header is required by the API to skip the
/// playlist ETag precondition check.
pub async fn add_track(
    session: &mut TidalSession,
    playlist_uuid: &str,
    track_id: u64,
) -> Result<(), reqwest::Error> {
    let token = session.token.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{uuid}/tracks?countryCode={country}",
        uri = &config::tidal_api_url(),
        uuid = playlist_uuid,
        country = session.country_code
    );

    let client = Client::new();
    client
        .post(&api_url)
        .bearer_auth(token)
        .header("If-None-Match", "*")
        .form(&[
            ("trackIds", track_id.to_string().as_str()),
            ("onDupes", "ADD"),
        ])
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
