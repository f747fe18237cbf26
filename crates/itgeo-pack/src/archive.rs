//! The deck archive writer.
//!
//! One ZIP container holds `deck.json`, the canonical serialization of the
//! deck and its note model, plus every media asset under `media/`. The
//! payload bytes flow through `CanonicalBytes`, and entry timestamps are
//! pinned, so two builds of the same inputs produce the same entries.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use itgeo_core::{sha256_hex, CanonicalBytes, Deck};

use crate::error::PackResult;
use crate::media::MediaSet;
use crate::model::NoteModel;

/// File name of the packaged deck under the output directory.
pub const ARCHIVE_FILE: &str = "itgeo.deck";

/// Name of the payload entry inside the archive.
pub const DECK_PAYLOAD_FILE: &str = "deck.json";

/// Prefix of media entries inside the archive.
pub const MEDIA_PREFIX: &str = "media/";

/// Wire shape of the payload entry.
#[derive(Serialize)]
struct ArchivePayload<'a> {
    deck: &'a Deck,
    model: &'a NoteModel,
}

/// Everything one archive bundles: the deck, its model, the media files.
#[derive(Debug)]
pub struct DeckArchive<'a> {
    deck: &'a Deck,
    model: &'a NoteModel,
    media: &'a MediaSet,
}

impl<'a> DeckArchive<'a> {
    pub fn new(deck: &'a Deck, model: &'a NoteModel, media: &'a MediaSet) -> Self {
        Self { deck, model, media }
    }

    pub fn note_count(&self) -> usize {
        self.deck.note_count()
    }

    pub fn tag_count(&self) -> usize {
        self.deck.distinct_tag_count()
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// The canonical payload bytes that become `deck.json`.
    pub fn payload_bytes(&self) -> PackResult<CanonicalBytes> {
        let payload = ArchivePayload {
            deck: self.deck,
            model: self.model,
        };
        Ok(CanonicalBytes::new(&payload)?)
    }

    /// Hex SHA-256 of the payload bytes.
    pub fn payload_digest(&self) -> PackResult<String> {
        Ok(sha256_hex(&self.payload_bytes()?))
    }

    /// Write the archive to `path`, replacing any previous file.
    ///
    /// Returns the payload digest for the build summary.
    pub fn write_to(&self, path: &Path) -> PackResult<String> {
        let payload = self.payload_bytes()?;
        let digest = sha256_hex(&payload);

        let file = File::create(path)?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        writer.start_file(DECK_PAYLOAD_FILE, options)?;
        writer.write_all(payload.as_bytes())?;
        tracing::debug!(bytes = payload.len(), "wrote deck payload entry");

        for media_path in self.media.files() {
            let Some(name) = media_path.file_name() else {
                continue;
            };
            writer.start_file(format!("{MEDIA_PREFIX}{}", name.to_string_lossy()), options)?;
            writer.write_all(&fs::read(media_path)?)?;
        }
        tracing::debug!(count = self.media.len(), "bundled media entries");

        writer.finish()?;
        Ok(digest)
    }
}
