//! Feature record for a single California housing block
//!
//! Holds the nine model inputs, their widget bounds, and the one cross-field
//! rule checked before every prediction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason shown when the bedroom/room rule fails
pub const BEDROOMS_EXCEED_ROOMS: &str = "Total bedrooms cannot exceed total rooms.";

// ============================================================================
// OCEAN PROXIMITY
// ============================================================================

/// Categorical location of the block relative to the coast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OceanProximity {
    #[default]
    #[serde(rename = "<1H OCEAN")]
    LessThanOneHour,
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "ISLAND")]
    Island,
    #[serde(rename = "NEAR BAY")]
    NearBay,
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    /// Dropdown order
    pub const ALL: [OceanProximity; 5] = [
        OceanProximity::LessThanOneHour,
        OceanProximity::Inland,
        OceanProximity::Island,
        OceanProximity::NearBay,
        OceanProximity::NearOcean,
    ];

    /// Dataset label, also used as the category name in the model artifact
    pub fn label(self) -> &'static str {
        match self {
            OceanProximity::LessThanOneHour => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::Island => "ISLAND",
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::NearOcean => "NEAR OCEAN",
        }
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OceanProximity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| format!("unknown ocean proximity: {s}"))
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

/// Widget bounds for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds<T> {
    pub label: &'static str,
    pub min: T,
    pub max: T,
    pub default: T,
    pub step: T,
}

impl<T: PartialOrd + Copy> FieldBounds<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl FieldBounds<u32> {
    /// One step up, as the number input's plus button does
    pub fn step_up(&self, value: u32) -> u32 {
        self.clamp(value.saturating_add(self.step))
    }

    pub fn step_down(&self, value: u32) -> u32 {
        self.clamp(value.saturating_sub(self.step))
    }
}

pub const LONGITUDE: FieldBounds<f64> = FieldBounds {
    label: "Longitude",
    min: -124.35,
    max: -114.31,
    default: -118.49,
    step: 0.01,
};

pub const LATITUDE: FieldBounds<f64> = FieldBounds {
    label: "Latitude",
    min: 32.54,
    max: 41.95,
    default: 34.26,
    step: 0.01,
};

pub const HOUSING_MEDIAN_AGE: FieldBounds<u32> = FieldBounds {
    label: "Housing Median Age (years)",
    min: 1,
    max: 52,
    default: 29,
    step: 1,
};

pub const TOTAL_ROOMS: FieldBounds<u32> = FieldBounds {
    label: "Total Rooms",
    min: 1,
    max: 40_000,
    default: 2127,
    step: 10,
};

pub const TOTAL_BEDROOMS: FieldBounds<u32> = FieldBounds {
    label: "Total Bedrooms",
    min: 1,
    max: 7000,
    default: 435,
    step: 5,
};

pub const POPULATION: FieldBounds<u32> = FieldBounds {
    label: "Population",
    min: 1,
    max: 40_000,
    default: 1166,
    step: 10,
};

pub const HOUSEHOLDS: FieldBounds<u32> = FieldBounds {
    label: "Households",
    min: 1,
    max: 7000,
    default: 409,
    step: 5,
};

pub const MEDIAN_INCOME: FieldBounds<f64> = FieldBounds {
    label: "Median Income (× $10,000)",
    min: 0.5,
    max: 15.0,
    default: 3.53,
    step: 0.1,
};

pub const OCEAN_PROXIMITY_LABEL: &str = "Ocean Proximity";

// ============================================================================
// RECORD
// ============================================================================

/// One row of model input. Built fresh for each prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: u32,
    pub total_rooms: u32,
    pub total_bedrooms: u32,
    pub population: u32,
    pub households: u32,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl FeatureRecord {
    /// Numeric fields by their column name in the training data
    pub fn numeric(&self, name: &str) -> Option<f64> {
        let value = match name {
            "longitude" => self.longitude,
            "latitude" => self.latitude,
            "housing_median_age" => self.housing_median_age as f64,
            "total_rooms" => self.total_rooms as f64,
            "total_bedrooms" => self.total_bedrooms as f64,
            "population" => self.population as f64,
            "households" => self.households as f64,
            "median_income" => self.median_income,
            _ => return None,
        };
        Some(value)
    }

    /// True when every field lies inside its widget domain
    pub fn within_domain(&self) -> bool {
        LONGITUDE.contains(self.longitude)
            && LATITUDE.contains(self.latitude)
            && HOUSING_MEDIAN_AGE.contains(self.housing_median_age)
            && TOTAL_ROOMS.contains(self.total_rooms)
            && TOTAL_BEDROOMS.contains(self.total_bedrooms)
            && POPULATION.contains(self.population)
            && HOUSEHOLDS.contains(self.households)
            && MEDIAN_INCOME.contains(self.median_income)
    }
}

/// Column names of the numeric features, in training order
pub const NUMERIC_FEATURES: [&str; 8] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
];

pub const CATEGORICAL_FEATURE: &str = "ocean_proximity";

// ============================================================================
// VALIDATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Blocked { reason: &'static str },
}

/// Rejects a record only when bedrooms strictly exceed rooms
pub fn validate(record: &FeatureRecord) -> Validation {
    if record.total_bedrooms > record.total_rooms {
        Validation::Blocked {
            reason: BEDROOMS_EXCEED_ROOMS,
        }
    } else {
        Validation::Ok
    }
}

// ============================================================================
// FORM STATE
// ============================================================================

/// Current widget values. Lives only as long as the window.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: u32,
    pub total_rooms: u32,
    pub total_bedrooms: u32,
    pub population: u32,
    pub households: u32,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            longitude: LONGITUDE.default,
            latitude: LATITUDE.default,
            housing_median_age: HOUSING_MEDIAN_AGE.default,
            total_rooms: TOTAL_ROOMS.default,
            total_bedrooms: TOTAL_BEDROOMS.default,
            population: POPULATION.default,
            households: HOUSEHOLDS.default,
            median_income: MEDIAN_INCOME.default,
            ocean_proximity: OceanProximity::default(),
        }
    }
}

impl FormState {
    /// Snapshot the widgets into a record, clamped into the field domains
    pub fn record(&self) -> FeatureRecord {
        FeatureRecord {
            longitude: LONGITUDE.clamp(self.longitude),
            latitude: LATITUDE.clamp(self.latitude),
            housing_median_age: HOUSING_MEDIAN_AGE.clamp(self.housing_median_age),
            total_rooms: TOTAL_ROOMS.clamp(self.total_rooms),
            total_bedrooms: TOTAL_BEDROOMS.clamp(self.total_bedrooms),
            population: POPULATION.clamp(self.population),
            households: HOUSEHOLDS.clamp(self.households),
            median_income: MEDIAN_INCOME.clamp(self.median_income),
            ocean_proximity: self.ocean_proximity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_domain_and_valid() {
        let record = FormState::default().record();
        assert!(record.within_domain());
        assert_eq!(validate(&record), Validation::Ok);
        assert_eq!(record.ocean_proximity, OceanProximity::LessThanOneHour);
    }

    #[test]
    fn equal_rooms_and_bedrooms_is_accepted() {
        let form = FormState {
            total_rooms: 500,
            total_bedrooms: 500,
            ..FormState::default()
        };
        assert_eq!(validate(&form.record()), Validation::Ok);
    }

    #[test]
    fn more_bedrooms_than_rooms_is_blocked() {
        let form = FormState {
            total_rooms: 100,
            total_bedrooms: 200,
            ..FormState::default()
        };
        assert_eq!(
            validate(&form.record()),
            Validation::Blocked {
                reason: BEDROOMS_EXCEED_ROOMS
            }
        );
    }

    #[test]
    fn record_clamps_out_of_range_values() {
        let form = FormState {
            longitude: -130.0,
            median_income: 99.0,
            total_rooms: 0,
            population: 1_000_000,
            ..FormState::default()
        };
        let record = form.record();
        assert_eq!(record.longitude, LONGITUDE.min);
        assert_eq!(record.median_income, MEDIAN_INCOME.max);
        assert_eq!(record.total_rooms, TOTAL_ROOMS.min);
        assert_eq!(record.population, POPULATION.max);
        assert!(record.within_domain());
    }

    #[test]
    fn number_input_steps_stay_in_bounds() {
        assert_eq!(TOTAL_ROOMS.step_up(2127), 2137);
        assert_eq!(TOTAL_ROOMS.step_up(39_995), 40_000);
        assert_eq!(TOTAL_BEDROOMS.step_down(3), 1);
        assert_eq!(HOUSEHOLDS.step_down(409), 404);
    }

    #[test]
    fn ocean_proximity_labels_round_trip_through_from_str() {
        for p in OceanProximity::ALL {
            assert_eq!(p.label().parse::<OceanProximity>(), Ok(p));
        }
        assert!("NEAR LAKE".parse::<OceanProximity>().is_err());
    }

    #[test]
    fn ocean_proximity_serializes_as_dataset_label() {
        let json = serde_json::to_string(&OceanProximity::NearBay).unwrap();
        assert_eq!(json, "\"NEAR BAY\"");
    }

    #[test]
    fn numeric_lookup_covers_every_training_column() {
        let record = FormState::default().record();
        for name in NUMERIC_FEATURES {
            assert!(record.numeric(name).is_some(), "{name}");
        }
        assert_eq!(record.numeric("total_rooms"), Some(2127.0));
        assert_eq!(record.numeric(CATEGORICAL_FEATURE), None);
    }
}
