pub mod accounts;
pub mod cat;
pub mod feeding;
pub mod pages;
pub mod photo;
pub mod toy;
