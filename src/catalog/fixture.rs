//! Deterministic sample catalog.
//!
//! Mirrors the shape of real backend data (category vocabulary, brand names,
//! discount labels, Spanish weekday tokens) but is fully reproducible: the
//! day shuffle runs off a seeded RNG and the expiry ladder is derived from
//! the record index, so the same `(count, now, seed)` always yields the same
//! catalog. Backs the `--sample` offline mode and the test suites.

use crate::catalog::client::CatalogSource;
use crate::catalog::error::ApiError;
use crate::catalog::models::Benefit;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The fixed category vocabulary.
pub const CATEGORIES: [&str; 10] = [
    "Comida",
    "Café",
    "Transporte",
    "Entretenimiento",
    "Shopping",
    "Supermercado",
    "Salud",
    "Fitness",
    "Tecnología",
    "Viajes",
];

const CATEGORY_BRANDS: [(&str, &[&str]); 10] = [
    ("Comida", &["McDonald's", "Burger King", "KFC", "Subway", "Domino's"]),
    ("Café", &["Starbucks", "Costa Coffee", "Dunkin' Donuts", "Blue Bottle"]),
    ("Transporte", &["Uber", "Cabify", "Lyft", "Didi"]),
    ("Entretenimiento", &["Netflix", "Disney+", "Spotify", "HBO Max"]),
    ("Shopping", &["Zara", "H&M", "Nike", "Adidas"]),
    ("Supermercado", &["Carrefour", "Walmart", "Auchan", "Tesco"]),
    ("Salud", &["Pfizer", "Farmacity", "Johnson & Johnson"]),
    ("Fitness", &["Anytime Fitness", "Smart Fit", "Basic-Fit", "Peloton"]),
    ("Tecnología", &["Apple", "Samsung", "Dell", "Lenovo"]),
    ("Viajes", &["Booking.com", "Airbnb", "Expedia", "LATAM"]),
];

const DISCOUNT_LABELS: [&str; 9] = [
    "10% OFF",
    "15% OFF",
    "20% OFF",
    "25% OFF",
    "30% OFF",
    "$5 OFF",
    "$10 OFF",
    "2x1",
    "Envío gratis",
];

const TITLE_PATTERNS: [&str; 4] = [
    "{brand}: {discount} en {category}",
    "{brand}: {discount} para socios",
    "{discount} en {brand}",
    "{brand}: {discount} hoy",
];

const DESCRIPTION_SNIPPETS: [&str; 5] = [
    "Válido presentando tu código en caja.",
    "No acumulable con otras promociones.",
    "Aplicable en tiendas seleccionadas y online.",
    "Sujeto a disponibilidad del local.",
    "Un uso por usuario por día.",
];

const ALL_DAYS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

fn pick<'a>(arr: &[&'a str], index_seed: usize) -> &'a str {
    arr[index_seed % arr.len()]
}

fn brands_for(category: &str) -> &'static [&'static str] {
    CATEGORY_BRANDS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, brands)| *brands)
        .unwrap_or(&["Example"])
}

/// Generates a deterministic catalog of `count` benefits anchored at `now`.
pub fn sample_catalog(count: usize, now: DateTime<Utc>, seed: u64) -> Vec<Benefit> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut benefits = Vec::with_capacity(count);

    for i in 0..count {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let brands = brands_for(category);
        let brand = brands[i % brands.len()];

        let discount = pick(&DISCOUNT_LABELS, i + 3);
        let title = pick(&TITLE_PATTERNS, i + 7)
            .replace("{brand}", brand)
            .replace("{discount}", discount)
            .replace("{category}", category);

        let expires_at = now + Duration::days(7 + (i as i64 * 3) % 45);

        let days_count = 3 + ((i + 1) % 4);
        let mut days = ALL_DAYS;
        days.shuffle(&mut rng);
        let valid_days: Vec<String> = days[..days_count].iter().map(|d| d.to_string()).collect();

        let description = format!(
            "{} te ofrece {} en {}. {} {}",
            brand,
            discount.to_lowercase(),
            category.to_lowercase(),
            pick(&DESCRIPTION_SNIPPETS, i + 11),
            pick(&DESCRIPTION_SNIPPETS, i + 17),
        );

        benefits.push(Benefit {
            id: (i + 1).to_string(),
            title,
            discount: discount.to_string(),
            category: category.to_string(),
            description,
            valid_days,
            expires_at,
        });
    }

    benefits
}

/// In-memory catalog source over sample data. Drop-in for [`HttpCatalog`]
/// when running offline or under test.
///
/// [`HttpCatalog`]: crate::catalog::client::HttpCatalog
pub struct SampleCatalog {
    benefits: Vec<Benefit>,
}

impl SampleCatalog {
    /// Generates a sample catalog source.
    pub fn new(count: usize, now: DateTime<Utc>, seed: u64) -> Self {
        Self { benefits: sample_catalog(count, now, seed) }
    }

    /// Wraps an explicit record list.
    pub fn with_benefits(benefits: Vec<Benefit>) -> Self {
        Self { benefits }
    }
}

#[async_trait]
impl CatalogSource for SampleCatalog {
    async fn catalog(&self) -> Result<Vec<Benefit>, ApiError> {
        Ok(self.benefits.clone())
    }

    async fn benefit(&self, id: &str) -> Result<Benefit, ApiError> {
        self.benefits
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound { resource: format!("Benefit {}", id) })
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        Ok(CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}
