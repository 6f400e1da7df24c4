pub mod artists;
pub mod edit_artist;
pub mod edit_venue;
pub mod index;
pub mod shows;
pub mod venues;
