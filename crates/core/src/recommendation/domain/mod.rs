pub mod link_opener;
pub mod song_catalog;
pub mod song_recommender;
