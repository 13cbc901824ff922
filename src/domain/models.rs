use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};
use super::services;

/// A single item in the bakery catalog.
///
/// Review scores are an append-only sequence of values in 1..=5; the average
/// rating is always derived from them, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub color: String,
    pub image: String,
    pub calories: u32,
    pub allergens: Vec<String>,
    pub reviews: Vec<u8>,
    pub description: String,
}

impl Product {
    /// Average review score rounded to one decimal place, 0.0 when the
    /// product has no reviews yet.
    pub fn average_rating(&self) -> f64 {
        services::average(&self.reviews)
    }
}

/// The ordered product listing shown to the visitor.
///
/// The only mutation a session ever performs is appending a review score to
/// exactly one product after a successful order.
///
/// # Examples
///
/// ```
/// use zumi::domain::Catalog;
///
/// let catalog = Catalog::sample();
/// assert!(catalog.len() >= 3);
/// assert!(catalog.find("red-velvet-oreo").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in menu, used when no catalog file is supplied.
    pub fn sample() -> Self {
        Self::new(vec![
            Product {
                id: "smores-hershey".to_string(),
                name: "S'mores Hershey Cookie".to_string(),
                color: "#EAD8B7".to_string(),
                image: "/cookies/smores-hershey.jpg".to_string(),
                calories: 340,
                allergens: vec!["Wheat".to_string(), "Milk".to_string()],
                reviews: vec![5, 5, 4],
                description: "Toasted marshmallow, Hershey chocolate pockets and buttery cookie."
                    .to_string(),
            },
            Product {
                id: "chocolate-chunk".to_string(),
                name: "Chocolate Chunk Cookie".to_string(),
                color: "#6B4226".to_string(),
                image: "/cookies/chocolate-chunk.jpg".to_string(),
                calories: 360,
                allergens: vec!["Wheat".to_string(), "Soy".to_string()],
                reviews: vec![4, 4, 5, 5],
                description: "Large, melty dark and milk chocolate chunks in a golden cookie."
                    .to_string(),
            },
            Product {
                id: "red-velvet-oreo".to_string(),
                name: "Red Velvet Oreo Cookie".to_string(),
                color: "#E23E57".to_string(),
                image: "/cookies/red-velvet-oreo.jpg".to_string(),
                calories: 320,
                allergens: vec!["Wheat".to_string(), "Egg".to_string(), "Milk".to_string()],
                reviews: vec![5, 5, 5],
                description: "Cream cheese filling with a soft red velvet cookie base.".to_string(),
            },
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Appends a review score to the product with the given id.
    ///
    /// Fails with `InvalidScore` when the score is outside 1..=5 and with
    /// `UnknownProduct` when no product carries the id; the catalog is left
    /// untouched on either failure. Scores are never reordered or
    /// deduplicated.
    pub fn append_review(&mut self, product_id: &str, score: u8) -> DomainResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::UnknownProduct(product_id.to_string()))?;

        let (updated, _) = services::append_score(&product.reviews, score)?;
        product.reviews = updated;
        Ok(())
    }
}

/// The in-progress contents of the order dialog.
///
/// Holds the target product by id rather than by copy so the catalog state at
/// submission time is what gets rated. Reset to defaults on cancel and on a
/// successful send; preserved verbatim across a failed send.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub product_id: String,
    pub quantity: u32,
    pub email: String,
    pub notes: String,
    pub rating: u8,
}

impl OrderDraft {
    pub fn new(product_id: String) -> Self {
        Self {
            product_id,
            quantity: 1,
            email: String::new(),
            notes: String::new(),
            rating: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_contents() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 3);

        let smores = catalog.get(0).unwrap();
        assert_eq!(smores.id, "smores-hershey");
        assert_eq!(smores.calories, 340);
        assert_eq!(smores.reviews, vec![5, 5, 4]);

        let red_velvet = catalog.find("red-velvet-oreo").unwrap();
        assert_eq!(red_velvet.reviews, vec![5, 5, 5]);
        assert_eq!(red_velvet.allergens, vec!["Wheat", "Egg", "Milk"]);
    }

    #[test]
    fn test_append_review() {
        let mut catalog = Catalog::sample();
        catalog.append_review("smores-hershey", 5).unwrap();

        let smores = catalog.find("smores-hershey").unwrap();
        assert_eq!(smores.reviews, vec![5, 5, 4, 5]);
        assert_eq!(smores.average_rating(), 4.8);
    }

    #[test]
    fn test_append_review_invalid_score() {
        let mut catalog = Catalog::sample();
        let before = catalog.clone();

        assert_eq!(
            catalog.append_review("smores-hershey", 0),
            Err(DomainError::InvalidScore(0))
        );
        assert_eq!(
            catalog.append_review("smores-hershey", 6),
            Err(DomainError::InvalidScore(6))
        );

        // Catalog unchanged on failure
        assert_eq!(
            catalog.find("smores-hershey").unwrap().reviews,
            before.find("smores-hershey").unwrap().reviews
        );
    }

    #[test]
    fn test_append_review_agrees_with_append_score() {
        let mut catalog = Catalog::sample();
        catalog.append_review("chocolate-chunk", 3).unwrap();

        let (expected, expected_avg) = services::append_score(&[4, 4, 5, 5], 3).unwrap();
        let product = catalog.find("chocolate-chunk").unwrap();
        assert_eq!(product.reviews, expected);
        assert_eq!(product.average_rating(), expected_avg);
    }

    #[test]
    fn test_append_review_unknown_product() {
        let mut catalog = Catalog::sample();
        assert_eq!(
            catalog.append_review("banana-bread", 5),
            Err(DomainError::UnknownProduct("banana-bread".to_string()))
        );
    }

    #[test]
    fn test_average_rating_empty_reviews() {
        let product = Product {
            id: "plain".to_string(),
            name: "Plain Cookie".to_string(),
            color: "#FFFFFF".to_string(),
            image: String::new(),
            calories: 200,
            allergens: vec![],
            reviews: vec![],
            description: String::new(),
        };
        assert_eq!(product.average_rating(), 0.0);
    }

    #[test]
    fn test_draft_defaults() {
        let draft = OrderDraft::new("smores-hershey".to_string());
        assert_eq!(draft.quantity, 1);
        assert_eq!(draft.rating, 5);
        assert!(draft.email.is_empty());
        assert!(draft.notes.is_empty());
    }
}
