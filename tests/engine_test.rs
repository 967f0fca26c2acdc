use std::collections::HashMap;

use tidalsync::engine::{ImportOutcome, RemoteLibrary, resolve_playlists, run_import};
use tidalsync::types::{Playlist, SourceTrack, Track, TrackArtist};

// Remote double: canned playlists and search results, recorded mutations.
#[derive(Default)]
struct FakeRemote {
    playlists: Vec<Playlist>,
    playlist_tracks: HashMap<String, Vec<Track>>,
    search_results: HashMap<String, Vec<Track>>,
    created: Vec<String>,
    added: Vec<(String, u64)>,
    search_queries: Vec<String>,
    membership_fetches: Vec<String>,
}

impl RemoteLibrary for FakeRemote {
    async fn user_playlists(&mut self) -> Result<Vec<Playlist>, String> {
        Ok(self.playlists.clone())
    }

    async fn create_playlist(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<Playlist, String> {
        self.created.push(title.to_string());
        let playlist = Playlist {
            uuid: format!("created-{}", self.created.len()),
            title: title.to_string(),
            description: Some(description.to_string()),
            number_of_tracks: Some(0),
        };
        self.playlists.push(playlist.clone());
        Ok(playlist)
    }

    async fn playlist_tracks(&mut self, playlist_uuid: &str) -> Result<Vec<Track>, String> {
        self.membership_fetches.push(playlist_uuid.to_string());
        Ok(self
            .playlist_tracks
            .get(playlist_uuid)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_track(&mut self, playlist_uuid: &str, track_id: u64) -> Result<(), String> {
        self.added.push((playlist_uuid.to_string(), track_id));
        Ok(())
    }

    async fn search_tracks(&mut self, query: &str) -> Result<Vec<Track>, String> {
        self.search_queries.push(query.to_string());
        Ok(self.search_results.get(query).cloned().unwrap_or_default())
    }
}

fn playlist(uuid: &str, title: &str) -> Playlist {
    Playlist {
        uuid: uuid.to_string(),
        title: title.to_string(),
        description: None,
        number_of_tracks: None,
    }
}

fn track(id: u64, title: &str, artist: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist: Some(TrackArtist {
            id: id + 1000,
            name: artist.to_string(),
        }),
    }
}

fn record(playlist: &str, title: &str, artist: &str) -> SourceTrack {
    SourceTrack {
        playlist: playlist.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

#[tokio::test]
async fn test_resolve_reuses_existing_and_creates_missing() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-rt", "Road Trip")],
        ..Default::default()
    };

    let names = vec!["road TRIP".to_string(), "Gym".to_string()];
    let resolved = resolve_playlists(&mut remote, &names).await.unwrap();

    // Key set is exactly the lowercased input names
    let mut keys: Vec<&str> = resolved.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["gym", "road trip"]);

    // Existing playlist is reused, never recreated
    assert_eq!(resolved["road trip"].uuid, "uuid-rt");
    assert_eq!(remote.created, vec!["Gym"]);

    // The created playlist carries the exact requested name
    assert_eq!(resolved["gym"].title, "Gym");
}

#[tokio::test]
async fn test_import_adds_matched_track() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-rt", "Road Trip")],
        ..Default::default()
    };
    remote
        .search_results
        .insert("Yellow Coldplay".to_string(), vec![track(42, "Yellow", "Coldplay")]);

    let records = vec![record("Road Trip", "Yellow", "Coldplay")];
    let report = run_import(&mut remote, &records).await.unwrap();

    assert_eq!(remote.added, vec![("uuid-rt".to_string(), 42)]);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].outcome, ImportOutcome::Added { track_id: 42 });
    assert!(report.unmatched().is_empty());
}

#[tokio::test]
async fn test_import_records_unmatched_on_empty_search() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-gym", "Gym")],
        ..Default::default()
    };

    let records = vec![record("Gym", "Ghost Song", "")];
    let report = run_import(&mut remote, &records).await.unwrap();

    // Query is the bare track name when the artist is empty
    assert_eq!(remote.search_queries, vec!["Ghost Song"]);

    // No remote mutation occurred
    assert!(remote.added.is_empty());

    let unmatched = report.unmatched();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].playlist, "Gym");
    assert_eq!(unmatched[0].title, "Ghost Song");
    assert_eq!(unmatched[0].artist, "");
    assert_eq!(report.outcomes[0].outcome, ImportOutcome::TrackNotFound);
}

#[tokio::test]
async fn test_import_skips_track_already_in_playlist() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-rt", "Road Trip")],
        ..Default::default()
    };
    remote
        .playlist_tracks
        .insert("uuid-rt".to_string(), vec![track(42, "Yellow", "Coldplay")]);
    remote
        .search_results
        .insert("Yellow Coldplay".to_string(), vec![track(42, "Yellow", "Coldplay")]);

    let records = vec![record("Road Trip", "Yellow", "Coldplay")];
    let report = run_import(&mut remote, &records).await.unwrap();

    // Already present: no add call and no unmatched entry
    assert!(remote.added.is_empty());
    assert!(report.unmatched().is_empty());
    assert_eq!(report.outcomes[0].outcome, ImportOutcome::AlreadyPresent);
}

#[tokio::test]
async fn test_import_unresolvable_playlist_skips_search() {
    // The resolver keys on the raw name while the lookup trims it, so a
    // name with stray whitespace cannot be resolved.
    let mut remote = FakeRemote::default();

    let records = vec![record(" Gym ", "Ghost Song", "")];
    let report = run_import(&mut remote, &records).await.unwrap();

    // Neither search nor add was invoked for the record
    assert!(remote.search_queries.is_empty());
    assert!(remote.added.is_empty());

    let unmatched = report.unmatched();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].playlist, "Gym");
    assert_eq!(report.outcomes[0].outcome, ImportOutcome::PlaylistNotFound);
}

#[tokio::test]
async fn test_import_membership_snapshot_is_not_refreshed() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-rt", "Road Trip")],
        ..Default::default()
    };
    remote
        .search_results
        .insert("Yellow Coldplay".to_string(), vec![track(42, "Yellow", "Coldplay")]);

    // Two records resolving to the same search hit in the same playlist
    let records = vec![
        record("Road Trip", "Yellow", "Coldplay"),
        record("Road Trip", "Yellow", "Coldplay"),
    ];
    let report = run_import(&mut remote, &records).await.unwrap();

    // Membership is fetched once per playlist per run, and the snapshot is
    // not updated after the first add, so the second record adds again.
    assert_eq!(remote.membership_fetches, vec!["uuid-rt"]);
    assert_eq!(remote.added.len(), 2);
    assert_eq!(report.added_count(), 2);
}

#[tokio::test]
async fn test_import_processes_records_in_order() {
    let mut remote = FakeRemote {
        playlists: vec![playlist("uuid-rt", "Road Trip"), playlist("uuid-gym", "Gym")],
        ..Default::default()
    };
    remote
        .search_results
        .insert("Yellow Coldplay".to_string(), vec![track(42, "Yellow", "Coldplay")]);

    let records = vec![
        record("Gym", "Ghost Song", ""),
        record("Road Trip", "Yellow", "Coldplay"),
        record("Gym", "Another Ghost", ""),
    ];
    let report = run_import(&mut remote, &records).await.unwrap();

    // Unmatched entries come out in processing order
    let unmatched = report.unmatched();
    let titles: Vec<&str> = unmatched.iter().map(|u| u.title.as_str()).collect();
    assert_eq!(titles, vec!["Ghost Song", "Another Ghost"]);
    assert_eq!(report.added_count(), 1);
}
