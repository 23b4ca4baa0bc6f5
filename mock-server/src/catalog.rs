//! In-memory vPIC data served by the mock.
//!
//! Response objects are rendered with the key spellings each real endpoint
//! uses, which differ between endpoints for the same entity.

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct MakeRow {
    pub make_id: u32,
    pub make_name: &'static str,
    pub mfr_id: u32,
    pub vehicle_types: &'static [&'static str],
    pub first_year: i32,
    pub last_year: i32,
}

#[derive(Debug, Clone)]
pub struct ManufacturerRow {
    pub id: u32,
    pub name: &'static str,
    pub common_name: &'static str,
    pub country: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub state_province: &'static str,
    pub postal_code: &'static str,
    pub contact_email: &'static str,
    pub vehicle_types: &'static [&'static str],
    pub manufacturer_types: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct WmiRow {
    pub wmi: &'static str,
    pub mfr_id: u32,
    pub make: &'static str,
    pub vehicle_type: &'static str,
    pub model: &'static str,
    pub body_class: &'static str,
    pub created_on: &'static str,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub makes: Vec<MakeRow>,
    pub manufacturers: Vec<ManufacturerRow>,
    pub wmis: Vec<WmiRow>,
    pub page_size: usize,
}

/// Model year codes for VIN position 10, starting at 2010.
const YEAR_CODES: &str = "ABCDEFGHJKLMNPRSTVWXY";
const FIRST_CODED_YEAR: i32 = 2010;

impl Default for Catalog {
    fn default() -> Self {
        Self {
            makes: vec![
                MakeRow {
                    make_id: 474,
                    make_name: "HONDA",
                    mfr_id: 987,
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)", "Motorcycle"],
                    first_year: 1960,
                    last_year: 2030,
                },
                MakeRow {
                    make_id: 475,
                    make_name: "ACURA",
                    mfr_id: 987,
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)"],
                    first_year: 1986,
                    last_year: 2030,
                },
                MakeRow {
                    make_id: 441,
                    make_name: "TESLA",
                    mfr_id: 955,
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)"],
                    first_year: 2008,
                    last_year: 2030,
                },
                MakeRow {
                    make_id: 452,
                    make_name: "BMW",
                    mfr_id: 968,
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)", "Motorcycle"],
                    first_year: 1953,
                    last_year: 2030,
                },
                MakeRow {
                    make_id: 460,
                    make_name: "FORD",
                    mfr_id: 976,
                    vehicle_types: &["Passenger Car", "Truck", "Incomplete Vehicle"],
                    first_year: 1953,
                    last_year: 2030,
                },
            ],
            manufacturers: vec![
                ManufacturerRow {
                    id: 987,
                    name: "HONDA MOTOR CO., LTD",
                    common_name: "Honda",
                    country: "JAPAN",
                    address: "2-1-1 Minami-Aoyama",
                    city: "Minato-ku",
                    state_province: "Tokyo",
                    postal_code: "107-8556",
                    contact_email: "",
                    vehicle_types: &["Passenger Car", "Motorcycle"],
                    manufacturer_types: &["Completed Vehicle Manufacturer"],
                },
                ManufacturerRow {
                    id: 955,
                    name: "TESLA, INC.",
                    common_name: "Tesla",
                    country: "UNITED STATES (USA)",
                    address: "1 Tesla Road",
                    city: "Austin",
                    state_province: "TEXAS",
                    postal_code: "78725",
                    contact_email: "",
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)"],
                    manufacturer_types: &["Completed Vehicle Manufacturer"],
                },
                ManufacturerRow {
                    id: 968,
                    name: "BMW OF NORTH AMERICA, LLC",
                    common_name: "BMW",
                    country: "UNITED STATES (USA)",
                    address: "300 Chestnut Ridge Road",
                    city: "Woodcliff Lake",
                    state_province: "NEW JERSEY",
                    postal_code: "07677",
                    contact_email: "",
                    vehicle_types: &["Passenger Car", "Multipurpose Passenger Vehicle (MPV)"],
                    manufacturer_types: &["Completed Vehicle Manufacturer"],
                },
                ManufacturerRow {
                    id: 976,
                    name: "FORD MOTOR COMPANY, USA",
                    common_name: "Ford",
                    country: "UNITED STATES (USA)",
                    address: "1 American Road",
                    city: "Dearborn",
                    state_province: "MICHIGAN",
                    postal_code: "48126",
                    contact_email: "",
                    vehicle_types: &["Passenger Car", "Truck", "Incomplete Vehicle"],
                    manufacturer_types: &["Completed Vehicle Manufacturer", "Incomplete Vehicle Manufacturer"],
                },
            ],
            wmis: vec![
                WmiRow {
                    wmi: "JHM",
                    mfr_id: 987,
                    make: "HONDA",
                    vehicle_type: "Passenger Car",
                    model: "Civic",
                    body_class: "Sedan/Saloon",
                    created_on: "2015-03-26",
                },
                WmiRow {
                    wmi: "5YJ",
                    mfr_id: 955,
                    make: "TESLA",
                    vehicle_type: "Passenger Car",
                    model: "Model S",
                    body_class: "Hatchback/Liftback/Notchback",
                    created_on: "2015-03-26",
                },
                WmiRow {
                    wmi: "5UX",
                    mfr_id: 968,
                    make: "BMW",
                    vehicle_type: "Multipurpose Passenger Vehicle (MPV)",
                    model: "X3",
                    body_class: "Sport Utility Vehicle (SUV)/Multi-Purpose Vehicle (MPV)",
                    created_on: "2015-03-26",
                },
                WmiRow {
                    wmi: "1FD",
                    mfr_id: 976,
                    make: "FORD",
                    vehicle_type: "Incomplete Vehicle",
                    model: "F-350",
                    body_class: "Incomplete - Chassis Cab (Single Cab)",
                    created_on: "2015-03-12",
                },
            ],
            page_size: 2,
        }
    }
}

impl Catalog {
    fn manufacturer(&self, id: u32) -> Option<&ManufacturerRow> {
        self.manufacturers.iter().find(|m| m.id == id)
    }

    /// Manufacturers matching an id, or a case-insensitive name fragment.
    pub fn find_manufacturers(&self, key: &str) -> Vec<&ManufacturerRow> {
        match key.parse::<u32>() {
            Ok(id) => self.manufacturer(id).into_iter().collect(),
            Err(_) => {
                let needle = key.to_lowercase();
                self.manufacturers
                    .iter()
                    .filter(|m| m.name.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    /// `GetMakeForManufacturer` rows.
    pub fn makes_for_manufacturer(&self, key: &str) -> Vec<Value> {
        self.makes_of(key, None)
            .map(|(make, mfr)| {
                json!({
                    "Make_ID": make.make_id,
                    "Make_Name": make.make_name,
                    "Mfr_Name": mfr.name,
                })
            })
            .collect()
    }

    /// `GetMakesForManufacturerAndYear` rows.
    pub fn makes_for_manufacturer_and_year(&self, key: &str, year: i32) -> Vec<Value> {
        self.makes_of(key, Some(year))
            .map(|(make, mfr)| {
                json!({
                    "MakeId": make.make_id,
                    "MakeName": make.make_name,
                    "MfrId": mfr.id,
                    "MfrName": mfr.name,
                })
            })
            .collect()
    }

    /// `GetMakesForVehicleType` rows. Matches a vehicle type name fragment.
    pub fn makes_for_vehicle_type(&self, vehicle_type: &str) -> Vec<Value> {
        let needle = vehicle_type.to_lowercase();
        let mut rows = Vec::new();
        for make in &self.makes {
            for name in make.vehicle_types {
                if name.to_lowercase().contains(&needle) {
                    rows.push(json!({
                        "MakeId": make.make_id,
                        "MakeName": make.make_name,
                        "VehicleTypeId": vehicle_type_id(name),
                        "VehicleTypeName": name,
                    }));
                }
            }
        }
        rows
    }

    fn makes_of<'a>(
        &'a self,
        key: &str,
        year: Option<i32>,
    ) -> impl Iterator<Item = (&'a MakeRow, &'a ManufacturerRow)> + 'a {
        let mfrs = self.find_manufacturers(key);
        self.makes.iter().filter_map(move |make| {
            let mfr = mfrs.iter().find(|m| m.id == make.mfr_id)?;
            match year {
                Some(y) if y < make.first_year || y > make.last_year => None,
                _ => Some((make, *mfr)),
            }
        })
    }

    /// One page of `getallmanufacturers`, optionally filtered by type.
    pub fn manufacturer_page(&self, manufacturer_type: Option<&str>, page: usize) -> Vec<Value> {
        let start = page.saturating_sub(1).saturating_mul(self.page_size);
        self.manufacturers
            .iter()
            .filter(|m| match manufacturer_type {
                Some(t) => m.manufacturer_types.iter().any(|mt| mt.eq_ignore_ascii_case(t)),
                None => true,
            })
            .skip(start)
            .take(self.page_size)
            .map(|m| {
                json!({
                    "Country": m.country,
                    "Mfr_CommonName": m.common_name,
                    "Mfr_ID": m.id,
                    "Mfr_Name": m.name,
                    "VehicleTypes": primary_names(m.vehicle_types),
                })
            })
            .collect()
    }

    /// `GetManufacturerDetails` rows.
    pub fn manufacturer_details(&self, key: &str) -> Vec<Value> {
        self.find_manufacturers(key)
            .into_iter()
            .map(|m| {
                let manufacturer_types: Vec<Value> =
                    m.manufacturer_types.iter().map(|t| json!({"Name": t})).collect();
                json!({
                    "Address": m.address,
                    "Address2": null,
                    "City": m.city,
                    "ContactEmail": m.contact_email,
                    "ContactFax": null,
                    "ContactPhone": null,
                    "Country": m.country,
                    "Mfr_CommonName": m.common_name,
                    "Mfr_ID": m.id,
                    "Mfr_Name": m.name,
                    "ManufacturerTypes": manufacturer_types,
                    "PostalCode": m.postal_code,
                    "StateProvince": m.state_province,
                    "VehicleTypes": primary_names(m.vehicle_types),
                })
            })
            .collect()
    }

    /// `DecodeWMI` rows. Empty when the WMI is unknown.
    pub fn decode_wmi(&self, wmi: &str) -> Vec<Value> {
        let Some(row) = self.wmis.iter().find(|w| w.wmi.eq_ignore_ascii_case(wmi)) else {
            return Vec::new();
        };
        let mfr = self.manufacturer(row.mfr_id);
        vec![json!({
            "CommonName": mfr.map(|m| m.common_name),
            "CreatedOn": row.created_on,
            "DateAvailableToPublic": row.created_on,
            "Make": row.make,
            "ManufacturerName": mfr.map(|m| m.name),
            "ParentCompanyName": "",
            "URL": "",
            "UpdatedOn": null,
            "VehicleType": row.vehicle_type,
        })]
    }

    /// `GetWMIsForManufacturer` rows for a manufacturer name fragment.
    pub fn wmis_for_manufacturer(&self, search: &str) -> Vec<Value> {
        let mfrs = self.find_manufacturers(search);
        self.wmis
            .iter()
            .filter_map(|w| {
                let mfr = mfrs.iter().find(|m| m.id == w.mfr_id)?;
                Some(json!({
                    "Country": mfr.country,
                    "CreatedOn": w.created_on,
                    "DateAvailableToPublic": w.created_on,
                    "Id": mfr.id,
                    "Name": mfr.name,
                    "UpdatedOn": null,
                    "VehicleType": w.vehicle_type,
                    "WMI": w.wmi,
                }))
            })
            .collect()
    }

    /// Flat `DecodeVinValues` object. Unknown WMIs still produce a row,
    /// carrying an error code the way vPIC does.
    pub fn decode_vin(&self, vin: &str, model_year: Option<i32>) -> Value {
        let wmi: String = vin.chars().take(3).collect();
        let row = self.wmis.iter().find(|w| w.wmi.eq_ignore_ascii_case(&wmi));
        let year = model_year.or_else(|| year_from_vin(vin));

        let (error_code, error_text) = match (row, vin.len()) {
            (None, _) => ("7", "7 - Manufacturer is not registered with NHTSA for sale or importation in the U.S. for use on U.S roads"),
            (Some(_), 17) => ("0", "0 - VIN decoded clean. Check Digit (9th position) is correct"),
            (Some(_), _) => ("6", "6 - Incomplete VIN"),
        };
        let mfr = row.and_then(|r| self.manufacturer(r.mfr_id));
        let make_id = row.and_then(|r| self.makes.iter().find(|m| m.make_name == r.make)).map(|m| m.make_id);

        json!({
            "ABS": "",
            "AdditionalErrorText": "",
            "BodyClass": row.map_or("", |r| r.body_class),
            "ErrorCode": error_code,
            "ErrorText": error_text,
            "Make": row.map_or("", |r| r.make),
            "MakeID": make_id.map(|id| id.to_string()).unwrap_or_default(),
            "Manufacturer": mfr.map_or("", |m| m.name),
            "ManufacturerId": mfr.map(|m| m.id.to_string()).unwrap_or_default(),
            "Model": row.map_or("", |r| r.model),
            "ModelYear": year.map(|y| y.to_string()).unwrap_or_default(),
            "PlantCountry": mfr.map_or("", |m| m.country),
            "SuggestedVIN": "",
            "Trim": "",
            "VIN": vin,
            "VehicleType": row.map_or(String::new(), |r| r.vehicle_type.to_uppercase()),
        })
    }
}

fn primary_names(names: &[&str]) -> Vec<Value> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"IsPrimary": i == 0, "Name": name}))
        .collect()
}

fn vehicle_type_id(name: &str) -> u32 {
    match name {
        "Motorcycle" => 1,
        "Passenger Car" => 2,
        "Truck" => 3,
        "Bus" => 5,
        "Trailer" => 6,
        "Multipurpose Passenger Vehicle (MPV)" => 7,
        "Low Speed Vehicle (LSV)" => 9,
        "Incomplete Vehicle" => 10,
        _ => 0,
    }
}

fn year_from_vin(vin: &str) -> Option<i32> {
    let code = vin.chars().nth(9)?.to_ascii_uppercase();
    YEAR_CODES
        .find(code)
        .and_then(|offset| i32::try_from(offset).ok())
        .map(|offset| FIRST_CODED_YEAR + offset)
}
