//! Catalogue of the known weather stations.

use serde::Serialize;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    // ---
    pub id: &'static str,
    pub name: &'static str,
    pub device_id: &'static str,
    pub coordinates: Coordinates,
    pub description: &'static str,
}

pub const LOCATIONS: &[Location] = &[
    Location {
        id: "kaiserplatz",
        name: "Kaiserplatz",
        device_id: "c055eef5-b6dc-406e-ad5a-65dec60db90e",
        coordinates: Coordinates {
            lat: 49.010414,
            lon: 8.388769,
        },
        description: "Streetlight 56099 - Karlsruhe city centre",
    },
    Location {
        id: "albtalbahnhof",
        name: "Albtalbahnhof",
        device_id: "7ceb0590-e2f0-4f9e-a3dc-5257a4729f57",
        coordinates: Coordinates {
            lat: 48.992736,
            lon: 8.395454,
        },
        description: "Streetlight 17968 - Karlsruhe Suedstadt",
    },
];

/// Kaiserplatz.
pub fn default_location() -> &'static Location {
    &LOCATIONS[0]
}

pub fn by_id(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.id == id)
}

pub fn by_device_id(device_id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.device_id == device_id)
}
