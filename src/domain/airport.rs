//! Airports offered by the search form.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub airport: &'static str,
}

pub const AIRPORTS: &[Airport] = &[
    Airport {
        code: "DAC",
        name: "Dhaka, Bangladesh",
        airport: "Hazrat Shahjalal International Airport",
    },
    Airport {
        code: "CXB",
        name: "Cox's Bazar, Bangladesh",
        airport: "Cox's Bazar Airport",
    },
    Airport {
        code: "JSR",
        name: "Jessore, Bangladesh",
        airport: "Jessore Airport",
    },
    Airport {
        code: "CGP",
        name: "Chittagong, Bangladesh",
        airport: "Shah Amanat International Airport",
    },
    Airport {
        code: "SPD",
        name: "Saidpur, Bangladesh",
        airport: "Saidpur Airport",
    },
    Airport {
        code: "ZYL",
        name: "Sylhet, Bangladesh",
        airport: "Osmani International Airport",
    },
];

/// Case-insensitive match on city name or IATA code. An empty query matches
/// every airport.
pub fn search_airports(query: &str) -> Vec<Airport> {
    let needle = query.trim().to_lowercase();
    AIRPORTS
        .iter()
        .filter(|airport| {
            airport.name.to_lowercase().contains(&needle)
                || airport.code.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

/// Looks an airport up by its IATA code, ignoring case.
pub fn find_airport(code: &str) -> Option<Airport> {
    let code = code.trim();
    AIRPORTS
        .iter()
        .find(|airport| airport.code.eq_ignore_ascii_case(code))
        .copied()
}
