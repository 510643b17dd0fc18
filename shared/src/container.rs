//! Display aggregates derived from a container's expanded plants.
//!
//! Every function here is total: a container fetched without `expand`
//! yields empty lists, zero totals and the "no plants" strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Container;

/// A plant flattened for display, with its species name resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantWithQuantity {
    pub id: String,
    pub species: String,
    pub quantity: i64,
}

/// Number of plant entries sharing a species name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: String,
    pub count: usize,
}

/// Plants of the container in stored order
pub fn container_plants(container: &Container) -> Vec<PlantWithQuantity> {
    let Some(plants) = container.expanded_plants() else {
        return Vec::new();
    };

    plants
        .iter()
        .map(|plant| PlantWithQuantity {
            id: plant.id.clone(),
            species: plant.species_name().to_string(),
            quantity: plant.effective_quantity(),
        })
        .collect()
}

/// Sum of quantities across all plants, saturating at the `i64` bounds
pub fn total_plants_count(container: &Container) -> i64 {
    container_plants(container)
        .iter()
        .fold(0i64, |total, plant| total.saturating_add(plant.quantity))
}

/// "No plants" or "<total> plants" (always plural)
pub fn format_plants_count(container: &Container) -> String {
    match total_plants_count(container) {
        0 => "No plants".to_string(),
        total => format!("{} plants", total),
    }
}

/// Plant entries grouped by species name, in order of first appearance.
///
/// Counts entries, not individuals: a plant with quantity 5 adds 1 here
/// but 5 to [`total_plants_count`].
pub fn container_species(container: &Container) -> Vec<SpeciesCount> {
    let mut grouped: Vec<SpeciesCount> = Vec::new();

    for plant in container.expanded_plants().unwrap_or_default() {
        let name = plant.species_name();
        match grouped.iter_mut().find(|entry| entry.species == name) {
            Some(entry) => entry.count += 1,
            None => grouped.push(SpeciesCount {
                species: name.to_string(),
                count: 1,
            }),
        }
    }

    grouped
}

/// "0 plants" or "<count> <species>" pairs joined with ", "
pub fn format_species_count(container: &Container) -> String {
    let species = container_species(container);
    if species.is_empty() {
        return "0 plants".to_string();
    }

    species
        .iter()
        .map(|entry| format!("{} {}", entry.count, entry.species))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whole days since the container was last watered
pub fn days_since_watered(container: &Container, now: DateTime<Utc>) -> Option<i64> {
    container
        .last_watered_at()
        .map(|watered| (now - watered).num_days().max(0))
}

/// Human-readable watering status for cards
pub fn format_last_watered(container: &Container, now: DateTime<Utc>) -> String {
    match days_since_watered(container, now) {
        None => "Never watered".to_string(),
        Some(0) => "Watered today".to_string(),
        Some(1) => "Watered 1 day ago".to_string(),
        Some(days) => format!("Watered {} days ago", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContainerExpand, Plant, PlantExpand, Species};
    use chrono::TimeZone;

    fn species(name: &str) -> Species {
        Species {
            id: format!("s-{}", name.to_lowercase()),
            collection_id: String::new(),
            collection_name: "species".to_string(),
            created: String::new(),
            updated: String::new(),
            name: name.to_string(),
            description: None,
        }
    }

    fn plant(id: &str, quantity: Option<i64>, species_name: Option<&str>) -> Plant {
        Plant {
            id: id.to_string(),
            collection_id: String::new(),
            collection_name: "plants".to_string(),
            created: String::new(),
            updated: String::new(),
            species: species_name.map(|name| format!("s-{}", name.to_lowercase())).unwrap_or_default(),
            quantity,
            expand: species_name.map(|name| PlantExpand {
                species: Some(species(name)),
            }),
        }
    }

    fn container(plants: Option<Vec<Plant>>) -> Container {
        Container {
            id: "c1".to_string(),
            collection_id: String::new(),
            collection_name: "containers".to_string(),
            created: String::new(),
            updated: String::new(),
            name: "Raised bed".to_string(),
            location: "Garden".to_string(),
            size: "large".to_string(),
            plants: plants
                .as_ref()
                .map(|plants| plants.iter().map(|p| p.id.clone()).collect())
                .unwrap_or_default(),
            user: "u1".to_string(),
            last_watered: None,
            expand: plants.map(|plants| ContainerExpand {
                plants: Some(plants),
                user: None,
            }),
        }
    }

    #[test]
    fn test_missing_expand_yields_empty_aggregates() {
        let bare = container(None);
        assert!(container_plants(&bare).is_empty());
        assert_eq!(total_plants_count(&bare), 0);
        assert_eq!(format_plants_count(&bare), "No plants");
        assert!(container_species(&bare).is_empty());
        assert_eq!(format_species_count(&bare), "0 plants");

        // expand present but plants not hydrated
        let mut partial = container(None);
        partial.expand = Some(ContainerExpand::default());
        assert!(container_plants(&partial).is_empty());
        assert_eq!(format_species_count(&partial), "0 plants");
    }

    #[test]
    fn test_empty_plant_list_yields_empty_aggregates() {
        let empty = container(Some(Vec::new()));
        assert!(container_plants(&empty).is_empty());
        assert_eq!(format_plants_count(&empty), "No plants");
        assert!(container_species(&empty).is_empty());
        assert_eq!(format_species_count(&empty), "0 plants");
    }

    #[test]
    fn test_fern_example() {
        let ferns = container(Some(vec![
            plant("p1", Some(3), Some("Fern")),
            plant("p2", Some(0), Some("Fern")),
        ]));

        assert_eq!(
            container_plants(&ferns),
            vec![
                PlantWithQuantity { id: "p1".to_string(), species: "Fern".to_string(), quantity: 3 },
                PlantWithQuantity { id: "p2".to_string(), species: "Fern".to_string(), quantity: 1 },
            ]
        );
        assert_eq!(total_plants_count(&ferns), 4);
        assert_eq!(format_plants_count(&ferns), "4 plants");
        assert_eq!(
            container_species(&ferns),
            vec![SpeciesCount { species: "Fern".to_string(), count: 2 }]
        );
        assert_eq!(format_species_count(&ferns), "2 Fern");
    }

    #[test]
    fn test_missing_species_resolves_to_unknown() {
        let mixed = container(Some(vec![
            plant("p1", Some(2), None),
            plant("p2", None, Some("Basil")),
        ]));

        let plants = container_plants(&mixed);
        assert_eq!(plants[0].species, "Unknown");
        assert_eq!(plants[1].quantity, 1);
        assert_eq!(format_species_count(&mixed), "1 Unknown, 1 Basil");
    }

    #[test]
    fn test_single_plant_is_still_plural() {
        let single = container(Some(vec![plant("p1", Some(1), Some("Mint"))]));
        assert_eq!(format_plants_count(&single), "1 plants");
    }

    #[test]
    fn test_species_grouping_keeps_first_appearance_order() {
        let herbs = container(Some(vec![
            plant("p1", Some(1), Some("Thyme")),
            plant("p2", Some(1), Some("Basil")),
            plant("p3", Some(1), Some("Thyme")),
            plant("p4", Some(1), Some("Alyssum")),
        ]));

        let species: Vec<_> = container_species(&herbs)
            .into_iter()
            .map(|entry| (entry.species, entry.count))
            .collect();
        assert_eq!(
            species,
            vec![
                ("Thyme".to_string(), 2),
                ("Basil".to_string(), 1),
                ("Alyssum".to_string(), 1),
            ]
        );
        assert_eq!(format_species_count(&herbs), "2 Thyme, 1 Basil, 1 Alyssum");
    }

    #[test]
    fn test_species_count_ignores_quantity() {
        let tomatoes = container(Some(vec![plant("p1", Some(5), Some("Tomato"))]));

        assert_eq!(total_plants_count(&tomatoes), 5);
        assert_eq!(container_species(&tomatoes)[0].count, 1);
        assert_eq!(format_species_count(&tomatoes), "1 Tomato");
    }

    #[test]
    fn test_total_matches_sum_of_plant_quantities() {
        let beds = [
            container(None),
            container(Some(vec![plant("p1", Some(4), Some("Kale"))])),
            container(Some(vec![
                plant("p1", None, None),
                plant("p2", Some(0), Some("Kale")),
                plant("p3", Some(12), Some("Chard")),
            ])),
        ];

        for bed in &beds {
            let summed: i64 = container_plants(bed).iter().map(|p| p.quantity).sum();
            assert_eq!(total_plants_count(bed), summed);
        }
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let json = r#"{
            "id": "c-huge",
            "expand": { "plants": [
                { "id": "p1", "quantity": 9223372036854775807 },
                { "id": "p2", "quantity": 1 }
            ] }
        }"#;
        let huge: Container = serde_json::from_str(json).unwrap();

        assert_eq!(total_plants_count(&huge), i64::MAX);
        assert_eq!(format_plants_count(&huge), format!("{} plants", i64::MAX));

        let json = r#"{
            "id": "c-negative",
            "expand": { "plants": [
                { "id": "p1", "quantity": -9223372036854775808 },
                { "id": "p2", "quantity": -5 }
            ] }
        }"#;
        let negative: Container = serde_json::from_str(json).unwrap();
        assert_eq!(total_plants_count(&negative), i64::MIN);
    }

    #[test]
    fn test_aggregates_are_repeatable() {
        let bed = container(Some(vec![
            plant("p1", Some(2), Some("Lettuce")),
            plant("p2", None, None),
        ]));

        assert_eq!(container_plants(&bed), container_plants(&bed));
        assert_eq!(container_species(&bed), container_species(&bed));
        assert_eq!(format_plants_count(&bed), format_plants_count(&bed));
        assert_eq!(format_species_count(&bed), format_species_count(&bed));
    }

    #[test]
    fn test_format_last_watered() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut bed = container(None);

        assert_eq!(format_last_watered(&bed, now), "Never watered");

        bed.last_watered = Some(String::new());
        assert_eq!(format_last_watered(&bed, now), "Never watered");

        bed.last_watered = Some("2024-05-10 07:30:00.000Z".to_string());
        assert_eq!(format_last_watered(&bed, now), "Watered today");

        bed.last_watered = Some("2024-05-09 08:00:00.000Z".to_string());
        assert_eq!(format_last_watered(&bed, now), "Watered 1 day ago");

        bed.last_watered = Some("2024-05-01 12:00:00.000Z".to_string());
        assert_eq!(days_since_watered(&bed, now), Some(9));
        assert_eq!(format_last_watered(&bed, now), "Watered 9 days ago");

        bed.last_watered = Some("2024-06-01 12:00:00.000Z".to_string());
        assert_eq!(format_last_watered(&bed, now), "Watered today");
    }
}
