pub mod page_fetcher;
pub mod stockanalysis;
