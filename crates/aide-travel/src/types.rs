// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response shapes of the flight search API and their mapping onto
//! [`FlightOption`].
//!
//! The service is loose about types: `layovers` is either a list or a stop
//! count, and `price` is sometimes a bare number. Every field is defaulted.

use serde::Deserialize;

use aide_core::types::{AirportTime, Emissions, FlightOption, FlightSegment, Layover, Price};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub data: SearchData,
}

fn default_status() -> bool {
    true
}

impl SearchResponse {
    /// Top flights when present, otherwise the full list.
    pub fn itineraries(self) -> Vec<RawItinerary> {
        let itineraries = self.data.itineraries;
        if itineraries.top_flights.is_empty() {
            itineraries.flights
        } else {
            itineraries.top_flights
        }
    }

    pub fn error_message(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "Unknown error".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub itineraries: Itineraries,
}

#[derive(Debug, Default, Deserialize)]
pub struct Itineraries {
    #[serde(rename = "topFlights", default)]
    pub top_flights: Vec<RawItinerary>,
    #[serde(default)]
    pub flights: Vec<RawItinerary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub duration: RawDuration,
    #[serde(default)]
    pub flights: Vec<RawSegment>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub total_price: Option<RawPrice>,
    #[serde(default)]
    pub bags: RawBags,
    #[serde(default)]
    pub carbon_emissions: Option<RawEmissions>,
    #[serde(default)]
    pub layovers: Option<RawLayovers>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDuration {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub aircraft: Option<String>,
    #[serde(default)]
    pub departure_airport: RawAirport,
    #[serde(default)]
    pub arrival_airport: RawAirport,
    #[serde(default)]
    pub seat: Option<String>,
    #[serde(default)]
    pub legroom: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirport {
    #[serde(default)]
    pub airport_name: String,
    #[serde(default)]
    pub airport_code: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Detailed {
        value: f64,
        #[serde(default)]
        currency: Option<String>,
    },
    Bare(f64),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawBags {
    #[serde(default)]
    pub carry_on: Option<u32>,
    #[serde(default)]
    pub checked: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawEmissions {
    #[serde(rename = "CO2e", default)]
    pub co2e: Option<f64>,
    #[serde(default)]
    pub difference_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLayovers {
    Stops(Vec<RawLayover>),
    Count(u32),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLayover {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub airport_code: String,
    #[serde(default)]
    pub airport_name: String,
    #[serde(default)]
    pub duration_label: String,
}

fn or_unknown(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl RawItinerary {
    /// Converts to the domain type, pricing in `default_currency` when the
    /// service omits one.
    pub fn into_option(self, default_currency: &str) -> FlightOption {
        let price = self.price.or(self.total_price).map(|p| match p {
            RawPrice::Detailed { value, currency } => Price {
                value,
                currency: currency.unwrap_or_else(|| default_currency.to_string()),
            },
            RawPrice::Bare(value) => Price {
                value,
                currency: default_currency.to_string(),
            },
        });

        let emissions = self.carbon_emissions.and_then(|c| {
            c.co2e.map(|grams| Emissions {
                grams: grams.round() as i64,
                difference_percent: c.difference_percent.unwrap_or(0.0).round() as i64,
            })
        });

        let layovers = match self.layovers {
            Some(RawLayovers::Stops(stops)) => stops
                .into_iter()
                .map(|s| Layover {
                    city: or_unknown(s.city, "Unknown City"),
                    airport_code: s.airport_code,
                    airport_name: s.airport_name,
                    duration_label: s.duration_label,
                })
                .collect(),
            Some(RawLayovers::Count(n)) => (0..n)
                .map(|_| Layover {
                    city: "Unknown City".to_string(),
                    airport_code: String::new(),
                    airport_name: String::new(),
                    duration_label: String::new(),
                })
                .collect(),
            None => Vec::new(),
        };

        FlightOption {
            departure_time: or_unknown(self.departure_time, "Unknown"),
            arrival_time: or_unknown(self.arrival_time, "Unknown"),
            duration: or_unknown(self.duration.text, "Unknown"),
            segments: self.flights.into_iter().map(RawSegment::into_segment).collect(),
            price,
            carry_on_bags: self.bags.carry_on.unwrap_or(0),
            checked_bags: self.bags.checked.unwrap_or(0),
            emissions,
            layovers,
        }
    }
}

impl RawSegment {
    fn into_segment(self) -> FlightSegment {
        FlightSegment {
            airline: or_unknown(self.airline, "Unknown Airline"),
            flight_number: or_unknown(self.flight_number, "Unknown"),
            aircraft: or_unknown(self.aircraft, "Unknown Aircraft"),
            departure: self.departure_airport.into_time(),
            arrival: self.arrival_airport.into_time(),
            seat: self.seat.unwrap_or_default(),
            legroom: self.legroom.unwrap_or_default(),
        }
    }
}

impl RawAirport {
    fn into_time(self) -> AirportTime {
        AirportTime {
            name: self.airport_name,
            code: self.airport_code,
            time: self.time,
        }
    }
}
