pub mod download;
pub mod history;
pub mod paginate;
pub mod products;
