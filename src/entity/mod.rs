pub mod cat;
pub mod cat_toy;
pub mod feeding;
pub mod photo;
pub mod toy;
pub mod user;
