pub mod hash;
pub mod jwt;
pub mod photo_key;
