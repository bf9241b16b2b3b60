// Room catalog: the fixed set of bookable offerings
// Read-only from the booking workflow's point of view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOffering {
    pub id: String,
    pub name: String,
    pub category: String,
    pub nightly_rate: f64,
    pub capacity: u32,
    pub is_available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl RoomOffering {
    pub fn new(id: &str, name: &str, category: &str, nightly_rate: f64, capacity: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            nightly_rate,
            capacity,
            is_available: true,
            description: String::new(),
            amenities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_amenities(mut self, amenities: &[&str]) -> Self {
        self.amenities = amenities.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

// Catalog trait consumed by the presentation shell and the demo binary
pub trait CatalogProvider: Send + Sync + 'static {
    // Every offering, in catalog order
    fn list_offerings(&self) -> Vec<RoomOffering>;

    fn find(&self, room_id: &str) -> Option<RoomOffering> {
        self.list_offerings().into_iter().find(|r| r.id == room_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub max_rate: Option<f64>,
    pub min_capacity: Option<u32>,
    pub available_only: bool,
    pub category: Option<String>,
}

pub struct StaticCatalog {
    offerings: Vec<RoomOffering>,
}

impl StaticCatalog {
    pub fn new(offerings: Vec<RoomOffering>) -> Self {
        Self { offerings }
    }

    // The three rooms shown on the LuxeStay booking page
    pub fn luxestay() -> Self {
        Self::new(vec![
            RoomOffering::new("1", "Deluxe Suite", "suite", 299.0, 2)
                .with_description(
                    "Spacious suite with city views, separate living area, and premium amenities.",
                )
                .with_amenities(&["wifi", "tv", "coffee", "parking"]),
            RoomOffering::new("2", "Standard Room", "standard", 149.0, 2)
                .with_description("Comfortable room with modern amenities and elegant design.")
                .with_amenities(&["wifi", "tv", "coffee"]),
            RoomOffering::new("3", "Presidential Suite", "presidential", 599.0, 4)
                .with_description(
                    "Ultimate luxury with panoramic views, private balcony, and concierge service.",
                )
                .with_amenities(&["wifi", "tv", "coffee", "parking"]),
        ])
    }

    // Case-insensitive match on name or category; an empty term matches everything
    pub fn search(&self, term: &str) -> Vec<RoomOffering> {
        let needle = term.to_lowercase();
        self.offerings
            .iter()
            .filter(|room| {
                room.name.to_lowercase().contains(&needle)
                    || room.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn filter(&self, criteria: &CatalogFilter) -> Vec<RoomOffering> {
        let mut filtered = Vec::new();

        for room in &self.offerings {
            if !criteria.max_rate.map_or(true, |max| room.nightly_rate <= max) {
                continue;
            }

            if !criteria.min_capacity.map_or(true, |min| room.capacity >= min) {
                continue;
            }

            if criteria.available_only && !room.is_available {
                continue;
            }

            if !criteria
                .category
                .as_ref()
                .map_or(true, |category| room.category.eq_ignore_ascii_case(category))
            {
                continue;
            }

            filtered.push(room.clone());
        }

        filtered
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_offerings(&self) -> Vec<RoomOffering> {
        self.offerings.clone()
    }
}
