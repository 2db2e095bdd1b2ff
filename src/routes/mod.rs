pub mod artists;
pub mod landing;
pub mod shows;
pub mod venues;

pub use artists::{ArtistPage, ArtistSearchResults, ArtistShow};
pub use landing::RecentListings;
pub use shows::{partition_shows, ShowListing, ShowPartition};
pub use venues::{AreaVenues, VenuePage, VenueSearchResults, VenueShow, VenueSummary};
