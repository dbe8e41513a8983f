use crate::recommendation::domain::link_opener::LinkOpener;
use crate::recommendation::domain::song_catalog::SongCatalog;
use crate::shared::emotion::Emotion;
use crate::shared::generation::Generation;

/// Issues at most one song recommendation per process run.
///
/// The first call wins: it consumes the one-shot even when the pair
/// has no catalog entry, so a later face with a mapped emotion cannot
/// fire a second browser launch.
pub struct SongRecommender {
    catalog: SongCatalog,
    opener: Box<dyn LinkOpener>,
    issued: bool,
}

impl SongRecommender {
    pub fn new(catalog: SongCatalog, opener: Box<dyn LinkOpener>) -> Self {
        Self {
            catalog,
            opener,
            issued: false,
        }
    }

    /// Looks up the song for the pair and opens its link.
    ///
    /// Returns the link (possibly empty) when this call consumed the
    /// one-shot, or `None` when a recommendation was already issued.
    /// The browser is only invoked for non-empty links; an opener
    /// failure is logged and does not undo the one-shot.
    pub fn recommend(&mut self, generation: Generation, emotion: Emotion) -> Option<String> {
        if self.issued {
            return None;
        }
        self.issued = true;

        let song = self.catalog.lookup(generation, emotion);
        if song.url.is_empty() {
            log::warn!("no song mapped for {generation} / {emotion}");
        } else {
            log::info!("recommending \"{}\" for {generation} / {emotion}", song.title);
            if let Err(e) = self.opener.open(song.url) {
                log::warn!("failed to open {}: {e}", song.url);
            }
        }
        Some(song.url.to_string())
    }

    pub fn issued(&self) -> bool {
        self.issued
    }
}
