pub mod accounts;
pub mod cat;
pub mod feeding;
pub mod toy;
