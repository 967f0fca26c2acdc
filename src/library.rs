//! Library CSV loading and the unmatched-records report.
//!
//! Both input files are tabular exports with at least the columns
//! `Playlist name` and `Track name`; `Artist name` is optional. The loader
//! merges the two files into one record set, deduplicated by track name with
//! the first occurrence winning (first file's rows before the second file's
//! rows, each in on-disk order). A missing or malformed input file is fatal
//! for the run and propagates to the caller.

use std::{io::Read, path::Path};

use crate::{
    Res,
    types::{SourceTrack, UnmatchedTrack},
    utils,
};

/// Parses library rows from any reader. Fields are trimmed during parsing.
pub fn read_library_csv<R: Read>(reader: R) -> Result<Vec<SourceTrack>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize().collect()
}

fn read_library_file(path: &Path) -> Res<Vec<SourceTrack>> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let records = read_library_csv(file)
        .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?;
    Ok(records)
}

/// Loads and merges both library exports into one deduplicated record set.
pub fn load_library(tidal_csv: &Path, spotify_csv: &Path) -> Res<Vec<SourceTrack>> {
    let mut records = read_library_file(tidal_csv)?;
    records.extend(read_library_file(spotify_csv)?);
    utils::dedupe_tracks(&mut records);
    Ok(records)
}

/// Writes the unmatched records to the report file, overwriting any previous
/// report. Only called when at least one record could not be placed.
pub fn write_unmatched(path: &Path, records: &[UnmatchedTrack]) -> Res<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
