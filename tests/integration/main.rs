
mod feeding;
mod photo;
mod toy;
