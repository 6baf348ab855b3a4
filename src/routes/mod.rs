pub mod admin;
pub mod analysis;
pub mod health;
pub mod tickers;
