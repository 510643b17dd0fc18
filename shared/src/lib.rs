use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};

pub mod container;

pub use container::{PlantWithQuantity, SpeciesCount};

/// Taxonomic label referenced by plants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Records hydrated alongside a plant when the query asks for `expand=species`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantExpand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
}

/// One or more individuals of a species living in a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    /// ID of the referenced species record
    #[serde(default)]
    pub species: String,
    /// Stored quantity; missing and zero are both treated as a single plant
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<PlantExpand>,
}

impl Plant {
    /// The expanded species name, or "Unknown" when it wasn't fetched or is blank
    pub fn species_name(&self) -> &str {
        self.expand
            .as_ref()
            .and_then(|expand| expand.species.as_ref())
            .map(|species| species.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SPECIES)
    }

    /// Quantity used for display: zero or missing counts as one
    pub fn effective_quantity(&self) -> i64 {
        match self.quantity {
            Some(quantity) if quantity != 0 => quantity,
            _ => 1,
        }
    }
}

/// Name used when a plant's species can't be resolved
pub const UNKNOWN_SPECIES: &str = "Unknown";

/// Records hydrated alongside a container (`expand=plants.species,user`).
/// `user` stays opaque JSON since only the owner ID matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerExpand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plants: Option<Vec<Plant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

/// A physical planter holding zero or more plants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub size: String,
    /// IDs of the plants in this container
    #[serde(default)]
    pub plants: Vec<String>,
    /// Owner (users record ID)
    #[serde(default)]
    pub user: String,
    /// PocketBase date string; empty when never watered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<ContainerExpand>,
}

impl Container {
    /// Hydrated plants, if the query expanded them
    pub fn expanded_plants(&self) -> Option<&[Plant]> {
        self.expand
            .as_ref()
            .and_then(|expand| expand.plants.as_deref())
    }

    /// When the container was last watered, if recorded and parsable
    pub fn last_watered_at(&self) -> Option<DateTime<Utc>> {
        self.last_watered.as_deref().and_then(parse_record_date)
    }
}

/// Authenticated user record from the `users` auth collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// Best human-readable label: name, then username, then email
    pub fn display_name(&self) -> &str {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .map(|value| value.as_str())
            .find(|value| !value.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// Paginated list envelope returned by `GET /api/collections/{name}/records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
    #[serde(rename = "totalItems")]
    pub total_items: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordAuthRequest {
    pub identity: String,
    pub password: String,
}

/// Response of the auth-with-password and auth-refresh endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub record: User,
}

/// Error envelope the backend sends with non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Parse a backend date string ("2024-05-01 10:00:00.123Z" or RFC 3339).
/// Empty strings mean "unset".
pub fn parse_record_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.fZ")
        .ok()
        .map(|naive| naive.and_utc())
}
