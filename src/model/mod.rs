pub mod entity;
pub mod profile;
pub mod scores;
