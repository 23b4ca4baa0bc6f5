//! Validated inputs for the vPIC endpoints.
//!
//! # Design
//! Every argument that reaches the request builder has already been
//! checked. Constructors (`ModelYear::new`, `Vin::new`, ...) do the per-value
//! checks; `MakeQuery::validate` and `ManufacturerQuery::validate` check how
//! filters combine. Checks run in a fixed order: argument types first, then
//! value ranges, then filter combinations.

use std::fmt;
use std::str::FromStr;

use crate::config::{EARLIEST_MODEL_YEAR, MAX_VIN_LEN, WMI_LENGTHS};
use crate::error::ValidationError;

/// Manufacturer types accepted by `getallmanufacturers`.
pub const MANUFACTURER_TYPES: [&str; 10] = [
    "Incomplete Vehicles",
    "Completed Vehicle Manufacturer",
    "Incomplete Vehicle Manufacturer",
    "Intermediate Vehicle Manufacturer",
    "Final-Stage Vehicle Manufacturer",
    "Vehicle Alterer",
    "Fabricating Manufacturer of Motor Vehicle Equipment",
    "Importer of Motor Vehicle Equipment",
    "Importer of Motor Vehicles Originally Manufactured to Conform to FMVSS",
    "Replica Vehicle Manufacturer",
];

/// The manufacturer types `get_manufacturers` accepts as a filter.
pub fn manufacturer_types() -> &'static [&'static str] {
    &MANUFACTURER_TYPES
}

// ---------------------------------------------------------------------------
// Model year
// ---------------------------------------------------------------------------

/// A model year the API can answer for (1953 or later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelYear(i32);

impl ModelYear {
    pub fn new(year: i32) -> Result<Self, ValidationError> {
        if year < EARLIEST_MODEL_YEAR {
            return Err(ValidationError::ModelYearTooEarly(year));
        }
        Ok(Self(year))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Accepts anything `str::parse::<i32>` does after trimming. A string that
/// is not an integer is a type error; a parsed year before 1953 a value error.
impl FromStr for ModelYear {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s.trim().parse::<i32>().map_err(|_| ValidationError::WrongType {
            field: "model_year",
            expected: "an integer",
            got: s.to_string(),
        })?;
        Self::new(year)
    }
}

impl TryFrom<i32> for ModelYear {
    type Error = ValidationError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl fmt::Display for ModelYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that `year` is a model year the API supports.
pub fn check_model_year(year: i32) -> Result<ModelYear, ValidationError> {
    ModelYear::new(year)
}

// ---------------------------------------------------------------------------
// VIN
// ---------------------------------------------------------------------------

/// A full or partial VIN, optionally pinned to a model year.
///
/// Partial VINs may use `*` as a wildcard, e.g. `5UXWX7C5*BA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vin {
    vin: String,
    model_year: Option<ModelYear>,
}

impl Vin {
    pub fn new(vin: impl Into<String>) -> Result<Self, ValidationError> {
        let vin = vin.into();
        check_not_blank("vin", &vin)?;
        let len = vin.chars().count();
        if len > MAX_VIN_LEN {
            return Err(ValidationError::VinTooLong { vin, len });
        }
        if vin.contains([',', ';']) {
            return Err(ValidationError::VinSeparator(vin));
        }
        Ok(Self {
            vin,
            model_year: None,
        })
    }

    pub fn with_model_year(vin: impl Into<String>, model_year: ModelYear) -> Result<Self, ValidationError> {
        let mut vin = Self::new(vin)?;
        vin.model_year = Some(model_year);
        Ok(vin)
    }

    pub fn as_str(&self) -> &str {
        &self.vin
    }

    pub fn model_year(&self) -> Option<ModelYear> {
        self.model_year
    }

    /// The `vin[,year]` form used in batch decode bodies.
    pub fn batch_entry(&self) -> String {
        match self.model_year {
            Some(year) => format!("{},{year}", self.vin),
            None => self.vin.clone(),
        }
    }
}

/// Parses the batch entry form, `vin` or `vin,year`.
impl FromStr for Vin {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((vin, year)) => Self::with_model_year(vin.trim(), year.parse()?),
            None => Self::new(s.trim()),
        }
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.batch_entry())
    }
}

// ---------------------------------------------------------------------------
// WMI
// ---------------------------------------------------------------------------

/// Check that `wmi` is not blank and has one of the two lengths a WMI can have.
pub fn check_wmi(wmi: &str) -> Result<&str, ValidationError> {
    check_not_blank("wmi", wmi)?;
    let len = wmi.chars().count();
    if !WMI_LENGTHS.contains(&len) {
        return Err(ValidationError::WmiLength {
            wmi: wmi.to_string(),
            len,
        });
    }
    Ok(wmi)
}

/// Reject empty or whitespace-only search terms.
pub(crate) fn check_not_blank<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Manufacturer key
// ---------------------------------------------------------------------------

/// A manufacturer given either by vPIC id or by (partial) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManufacturerKey {
    Id(u32),
    Name(String),
}

impl ManufacturerKey {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ManufacturerKey::Id(_) => Ok(()),
            ManufacturerKey::Name(name) => check_not_blank("manufacturer", name).map(|_| ()),
        }
    }
}

impl From<u32> for ManufacturerKey {
    fn from(id: u32) -> Self {
        ManufacturerKey::Id(id)
    }
}

impl From<&str> for ManufacturerKey {
    fn from(name: &str) -> Self {
        ManufacturerKey::Name(name.to_string())
    }
}

impl From<String> for ManufacturerKey {
    fn from(name: String) -> Self {
        ManufacturerKey::Name(name)
    }
}

impl fmt::Display for ManufacturerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManufacturerKey::Id(id) => write!(f, "{id}"),
            ManufacturerKey::Name(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Filters for `get_makes`.
///
/// Exactly one of `manufacturer` and `vehicle_type` must be set, and
/// `model_year` only combines with `manufacturer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakeQuery {
    pub manufacturer: Option<ManufacturerKey>,
    pub model_year: Option<ModelYear>,
    pub vehicle_type: Option<String>,
}

impl MakeQuery {
    pub fn manufacturer(manufacturer: impl Into<ManufacturerKey>) -> Self {
        Self {
            manufacturer: Some(manufacturer.into()),
            ..Self::default()
        }
    }

    pub fn vehicle_type(vehicle_type: impl Into<String>) -> Self {
        Self {
            vehicle_type: Some(vehicle_type.into()),
            ..Self::default()
        }
    }

    pub fn with_model_year(mut self, model_year: ModelYear) -> Self {
        self.model_year = Some(model_year);
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<ManufacturerKey>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(manufacturer) = &self.manufacturer {
            manufacturer.validate()?;
        }
        if let Some(vehicle_type) = &self.vehicle_type {
            check_not_blank("vehicle_type", vehicle_type)?;
        }

        match (&self.manufacturer, &self.model_year, &self.vehicle_type) {
            (Some(_), _, Some(_)) => Err(ValidationError::ConflictingFilters {
                first: "vehicle_type",
                second: "manufacturer",
            }),
            (None, Some(_), Some(_)) => Err(ValidationError::ConflictingFilters {
                first: "vehicle_type",
                second: "model_year",
            }),
            (None, Some(_), None) => Err(ValidationError::MissingPrerequisite {
                field: "model_year",
                requires: "manufacturer",
            }),
            (None, None, None) => Err(ValidationError::MissingPrerequisite {
                field: "makes",
                requires: "manufacturer or vehicle_type",
            }),
            _ => Ok(()),
        }
    }
}

/// Filters for `get_manufacturers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerQuery {
    pub manufacturer_type: Option<String>,
    pub page: u32,
}

impl Default for ManufacturerQuery {
    fn default() -> Self {
        Self {
            manufacturer_type: None,
            page: 1,
        }
    }
}

impl ManufacturerQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_manufacturer_type(mut self, manufacturer_type: impl Into<String>) -> Self {
        self.manufacturer_type = Some(manufacturer_type.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::PageZero);
        }
        if let Some(m_type) = &self.manufacturer_type {
            if !MANUFACTURER_TYPES.contains(&m_type.as_str()) {
                return Err(ValidationError::UnknownManufacturerType(m_type.clone()));
            }
        }
        Ok(())
    }
}
