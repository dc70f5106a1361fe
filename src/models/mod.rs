mod media;
mod upstream;

pub use media::{Media, MediaKind, SchemaVariant, NOT_AVAILABLE, NO_OVERVIEW, NO_TITLE, NO_YEAR};
pub use upstream::{
    AddOutcome, AddRequest, GenreEntry, GenreListResponse, Indexer, PagedResults, RatingPayload,
    RemoveOutcome, Torrent, TORRENT_STATUS_KEYS,
};
