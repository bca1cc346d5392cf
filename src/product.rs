use serde::Serialize;

/// Column order of every CSV file the scraper writes.
pub const CSV_HEADER: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// Highest value of the star rating shown on a product card.
pub const MAX_RATING: u8 = 5;

/// One product card as it appears on a listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub rating: u8,
    pub num_of_reviews: u32,
}
