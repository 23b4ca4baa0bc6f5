//! Typed views over `Record`s: makes, manufacturers and WMIs.
//!
//! Each entity is a thin newtype around a `Record` built from its static
//! `Schema`. Accessors read the already-resolved named fields, so an entity
//! never looks at the raw object again. The vehicle entity lives in
//! `vehicle.rs` because of the size of its schema.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::record::{keys, FieldSpec, Record, Schema, Source};

/// A record kind with a fixed schema.
pub trait Entity: Sized {
    const SCHEMA: &'static Schema;

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    /// Wrap a raw result object, using `fallback_identifier` when the schema's
    /// identifier keys are missing.
    fn from_raw(raw: Map<String, Value>, fallback_identifier: &str) -> Result<Self, ValidationError> {
        Record::new(Self::SCHEMA, raw, fallback_identifier).map(Self::from_record)
    }
}

macro_rules! entity {
    ($name:ident, $schema:ident) => {
        impl $crate::entity::Entity for $name {
            const SCHEMA: &'static $crate::record::Schema = &$schema;

            fn from_record(record: $crate::record::Record) -> Self {
                Self(record)
            }

            fn record(&self) -> &$crate::record::Record {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::record::Record;

            fn deref(&self) -> &$crate::record::Record {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
pub(crate) use entity;

// ---------------------------------------------------------------------------
// Make
// ---------------------------------------------------------------------------

const MAKE_ID_KEYS: &[&str] = &["MakeId", "Make_ID", "MakeID"];

pub const MAKE_SCHEMA: Schema = Schema {
    entity: "Make",
    identifier: MAKE_ID_KEYS,
    fields: &[
        keys("make_id", MAKE_ID_KEYS),
        keys("make_name", &["MakeName", "Make_Name"]),
        keys("manufacturer", &["Mfr_Name", "MfrName"]),
        keys("manufacturer_id", &["Mfr_ID", "MfrId"]),
        keys("vehicle_type", &["VehicleTypeName"]),
    ],
};

/// A make returned by the `GetMake*` endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Make(Record);

entity!(Make, MAKE_SCHEMA);

impl Make {
    pub fn make_id(&self) -> Option<i64> {
        self.0.integer("make_id")
    }

    pub fn make_name(&self) -> Option<&str> {
        self.0.text("make_name")
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.0.text("manufacturer")
    }

    pub fn manufacturer_id(&self) -> Option<i64> {
        self.0.integer("manufacturer_id")
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.0.text("vehicle_type")
    }
}

// ---------------------------------------------------------------------------
// Manufacturer
// ---------------------------------------------------------------------------

const MFR_ID_KEYS: &[&str] = &["Mfr_ID", "MfrId", "Mfr_Id"];

pub const MANUFACTURER_SCHEMA: Schema = Schema {
    entity: "Manufacturer",
    identifier: MFR_ID_KEYS,
    fields: &[
        keys("id", MFR_ID_KEYS),
        keys("name", &["Mfr_Name", "MfrName"]),
        keys("common_name", &["Mfr_CommonName", "MfrCommonName"]),
        keys("country", &["Country"]),
        keys("address", &["Address"]),
        keys("city", &["City"]),
        keys("state_province", &["StateProvince"]),
        keys("postal_code", &["PostalCode"]),
        keys("contact_email", &["ContactEmail"]),
        keys("contact_phone", &["ContactPhone"]),
        FieldSpec {
            name: "vehicle_types",
            source: Source::Names(&["VehicleTypes"]),
        },
        FieldSpec {
            name: "manufacturer_types",
            source: Source::Names(&["ManufacturerTypes"]),
        },
    ],
};

/// A manufacturer from `getallmanufacturers` or `GetManufacturerDetails`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manufacturer(Record);

entity!(Manufacturer, MANUFACTURER_SCHEMA);

impl Manufacturer {
    pub fn id(&self) -> Option<i64> {
        self.0.integer("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.text("name")
    }

    pub fn common_name(&self) -> Option<&str> {
        self.0.text("common_name")
    }

    pub fn country(&self) -> Option<&str> {
        self.0.text("country")
    }

    pub fn vehicle_types(&self) -> Vec<&str> {
        self.0.names("vehicle_types")
    }

    pub fn manufacturer_types(&self) -> Vec<&str> {
        self.0.names("manufacturer_types")
    }
}

// ---------------------------------------------------------------------------
// WMI
// ---------------------------------------------------------------------------

pub const WMI_SCHEMA: Schema = Schema {
    entity: "Wmi",
    identifier: &["WMI"],
    fields: &[
        FieldSpec {
            name: "wmi",
            source: Source::Identifier,
        },
        keys("manufacturer", &["ManufacturerName", "Name"]),
        keys("vehicle_type", &["VehicleType"]),
        keys("country", &["Country"]),
        keys("common_name", &["CommonName"]),
        keys("make", &["Make"]),
        keys("parent_company_name", &["ParentCompanyName"]),
        keys("url", &["URL"]),
        keys("created_on", &["CreatedOn"]),
        keys("updated_on", &["UpdatedOn"]),
        keys("date_available_to_public", &["DateAvailableToPublic"]),
    ],
};

/// A World Manufacturer Identifier record.
///
/// `DecodeWMI` does not echo the WMI back, so decoded records are
/// identified by the WMI that was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Wmi(Record);

entity!(Wmi, WMI_SCHEMA);

impl Wmi {
    pub fn wmi(&self) -> &str {
        self.0.identifier()
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.0.text("manufacturer")
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.0.text("vehicle_type")
    }

    pub fn country(&self) -> Option<&str> {
        self.0.text("country")
    }

    pub fn make(&self) -> Option<&str> {
        self.0.text("make")
    }

    pub fn parent_company_name(&self) -> Option<&str> {
        self.0.text("parent_company_name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn make_accepts_every_id_spelling() {
        for key in MAKE_ID_KEYS {
            let mut fields = Map::new();
            fields.insert(key.to_string(), json!(474));
            let make = Make::from_raw(fields, "honda").unwrap();
            assert_eq!(make.make_id(), Some(474), "{key}");
            assert_eq!(make.identifier(), "474", "{key}");
        }
    }

    #[test]
    fn make_from_manufacturer_endpoint() {
        let make = Make::from_raw(
            raw(json!({"Make_ID": 474, "Make_Name": "HONDA", "Mfr_Name": "HONDA MOTOR CO., LTD"})),
            "honda",
        )
        .unwrap();
        assert_eq!(make.make_name(), Some("HONDA"));
        assert_eq!(make.manufacturer(), Some("HONDA MOTOR CO., LTD"));
        assert_eq!(make.vehicle_type(), None);
    }

    #[test]
    fn make_from_vehicle_type_endpoint() {
        let make = Make::from_raw(
            raw(json!({"MakeId": 440, "MakeName": "ASTON MARTIN", "VehicleTypeId": 2, "VehicleTypeName": "Passenger Car"})),
            "car",
        )
        .unwrap();
        assert_eq!(make.make_id(), Some(440));
        assert_eq!(make.vehicle_type(), Some("Passenger Car"));
        assert_eq!(make.manufacturer(), None);
    }

    #[test]
    fn manufacturer_projects_vehicle_types() {
        let m = Manufacturer::from_raw(
            raw(json!({
                "Country": "UNITED STATES (USA)",
                "Mfr_CommonName": "",
                "Mfr_ID": 1178,
                "Mfr_Name": "3T MFG.",
                "VehicleTypes": [
                    {"IsPrimary": true, "Name": "Trailer"},
                    {"IsPrimary": false, "Name": "Incomplete Vehicle"}
                ]
            })),
            "1",
        )
        .unwrap();
        assert_eq!(m.id(), Some(1178));
        assert_eq!(m.identifier(), "1178");
        assert_eq!(m.common_name(), None);
        assert_eq!(m.vehicle_types(), vec!["Trailer", "Incomplete Vehicle"]);
        assert!(m.manufacturer_types().is_empty());
    }

    #[test]
    fn decoded_wmi_is_identified_by_request() {
        let wmi = Wmi::from_raw(
            raw(json!({"ManufacturerName": "FORD MOTOR COMPANY, USA", "VehicleType": "Incomplete Vehicle", "Make": ""})),
            "1FD",
        )
        .unwrap();
        assert_eq!(wmi.wmi(), "1FD");
        assert_eq!(wmi.named_fields()["wmi"], json!("1FD"));
        assert_eq!(wmi.manufacturer(), Some("FORD MOTOR COMPANY, USA"));
        assert_eq!(wmi.make(), None);
        assert!(!wmi.raw_fields().contains_key("WMI"));
    }

    #[test]
    fn searched_wmi_uses_name_spelling() {
        let wmi = Wmi::from_raw(
            raw(json!({"Country": null, "Name": "HONDA MOTOR CO., LTD", "VehicleType": "Passenger Car", "WMI": "JHM"})),
            "honda",
        )
        .unwrap();
        assert_eq!(wmi.wmi(), "JHM");
        assert_eq!(wmi.manufacturer(), Some("HONDA MOTOR CO., LTD"));
        assert_eq!(wmi.country(), None);
    }

    #[test]
    fn display_names_the_entity() {
        let make = Make::from_raw(raw(json!({"MakeId": 474, "MakeName": "HONDA"})), "honda").unwrap();
        assert!(make.to_string().starts_with("Make:\nmake_id: 474\nmake_name: HONDA"));
    }
}
