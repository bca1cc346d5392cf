use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use crate::config::Selectors;
use crate::error::ExtractionError;
use crate::product::{Product, MAX_RATING};

const TITLE_ATTR: &str = "title";
const RATING_ATTR: &str = "data-rating";

/// Turns product-card markup into `Product` values.
pub struct FieldExtractor {
    card: Selector,
    title: (Selector, String),
    description: (Selector, String),
    price: (Selector, String),
    rating: (Selector, String),
    reviews: (Selector, String),
    price_regex: Regex,
    reviews_regex: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self, ExtractionError> {
        Self::with_selectors(&Selectors::default())
    }

    pub fn with_selectors(selectors: &Selectors) -> Result<Self, ExtractionError> {
        Ok(FieldExtractor {
            card: compile(&selectors.card)?,
            title: (compile(&selectors.title)?, selectors.title.clone()),
            description: (compile(&selectors.description)?, selectors.description.clone()),
            price: (compile(&selectors.price)?, selectors.price.clone()),
            rating: (compile(&selectors.rating)?, selectors.rating.clone()),
            reviews: (compile(&selectors.reviews)?, selectors.reviews.clone()),
            // Currency symbol(s), then an unsigned decimal; thousands separators allowed.
            price_regex: Regex::new(r"^\s*[^\d\s.,+-]*\s*((?:\d[\d,]*)?(?:\.\d+)?)\s*$")
                .map_err(|e| invalid_pattern("price", e))?,
            reviews_regex: Regex::new(r"^\s*(\d+)(?:\s|$)")
                .map_err(|e| invalid_pattern("reviews", e))?,
        })
    }

    /// Extracts every card of a full page, in document order.
    /// The first malformed card fails the whole page.
    pub fn extract_all(&self, markup: &str) -> Result<Vec<Product>, ExtractionError> {
        let document = Html::parse_document(markup);
        document
            .select(&self.card)
            .map(|card| self.extract(card))
            .collect()
    }

    pub fn count_cards(&self, markup: &str) -> usize {
        let document = Html::parse_document(markup);
        document.select(&self.card).count()
    }

    pub fn extract(&self, card: ElementRef<'_>) -> Result<Product, ExtractionError> {
        let title = attribute(&find(card, &self.title, "title")?, "title", TITLE_ATTR)?.to_string();
        if title.trim().is_empty() {
            return Err(ExtractionError::EmptyField { field: "title" });
        }

        let description = text_of(&find(card, &self.description, "description")?);

        let price_text = text_of(&find(card, &self.price, "price")?);
        let price = self.parse_price(&price_text)?;

        let rating_text = attribute(&find(card, &self.rating, "rating")?, "rating", RATING_ATTR)?;
        let rating = rating_text
            .trim()
            .parse::<u8>()
            .map_err(|_| invalid_number("rating", rating_text))?;
        if rating > MAX_RATING {
            return Err(ExtractionError::OutOfRange {
                field: "rating",
                value: rating.to_string(),
            });
        }

        let reviews_text = text_of(&find(card, &self.reviews, "num_of_reviews")?);
        let num_of_reviews = self
            .reviews_regex
            .captures(&reviews_text)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(|| invalid_number("num_of_reviews", &reviews_text))?;

        Ok(Product {
            title,
            description,
            price,
            rating,
            num_of_reviews,
        })
    }

    fn parse_price(&self, text: &str) -> Result<f64, ExtractionError> {
        self.price_regex
            .captures(text)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
            .ok_or_else(|| invalid_number("price", text))
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn invalid_pattern(name: &'static str, err: regex::Error) -> ExtractionError {
    ExtractionError::InvalidPattern {
        name,
        reason: err.to_string(),
    }
}

fn invalid_number(field: &'static str, value: &str) -> ExtractionError {
    ExtractionError::InvalidNumber {
        field,
        value: value.trim().to_string(),
    }
}

fn find<'a>(
    card: ElementRef<'a>,
    (selector, source): &(Selector, String),
    field: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    card.select(selector)
        .next()
        .ok_or_else(|| ExtractionError::MissingElement {
            field,
            selector: source.clone(),
        })
}

fn attribute<'a>(
    element: &ElementRef<'a>,
    field: &'static str,
    name: &str,
) -> Result<&'a str, ExtractionError> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ExtractionError::MissingAttribute {
            field,
            attribute: name.to_string(),
        })
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
