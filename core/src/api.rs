//! Blocking facade that pairs a `VpicClient` with a `Transport`.
//!
//! Every method validates, builds one request, executes it and parses the
//! response. Validation failures return before the transport is touched.

use tracing::debug;

use crate::client::VpicClient;
use crate::entity::{Make, Manufacturer, Wmi};
use crate::error::ApiError;
use crate::results::Results;
use crate::transport::{Transport, UreqTransport};
use crate::types::{manufacturer_types, MakeQuery, ManufacturerKey, ManufacturerQuery, Vin};
use crate::vehicle::Vehicle;

#[derive(Debug)]
pub struct Vpic<T = UreqTransport> {
    client: VpicClient,
    transport: T,
}

impl Vpic<UreqTransport> {
    /// Facade over `ureq` against `VPIC_BASE_URL`, or the public endpoint.
    pub fn new() -> Self {
        Self::with_transport(VpicClient::from_env(), UreqTransport::new())
    }
}

impl Default for Vpic<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Vpic<T> {
    pub fn with_transport(client: VpicClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &VpicClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Makes for a manufacturer (optionally in a model year) or for a
    /// vehicle type.
    pub fn get_makes(&self, query: &MakeQuery) -> Result<Results<Make>, ApiError> {
        let request = self.client.build_get_makes(query)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_makes(query, response)
    }

    /// One page of the manufacturer list, optionally filtered by type.
    pub fn get_manufacturers(&self, query: &ManufacturerQuery) -> Result<Results<Manufacturer>, ApiError> {
        let request = self.client.build_get_manufacturers(query)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_manufacturers(response)
    }

    pub fn get_manufacturer_details(
        &self,
        manufacturer: impl Into<ManufacturerKey>,
    ) -> Result<Results<Manufacturer>, ApiError> {
        let manufacturer = manufacturer.into();
        let request = self.client.build_get_manufacturer_details(&manufacturer)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_manufacturer_details(&manufacturer, response)
    }

    /// The accepted manufacturer type filters. No request is made.
    pub fn manufacturer_types(&self) -> &'static [&'static str] {
        manufacturer_types()
    }

    pub fn decode_vin(&self, vin: &Vin) -> Result<Vehicle, ApiError> {
        let request = self.client.build_decode_vin(vin)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_decode_vin(vin, response)
    }

    /// Decode several VINs in one POST. Results come back in input order;
    /// any failure after validation is reported as a batch error.
    pub fn decode_vins(&self, vins: &[Vin]) -> Result<Results<Vehicle>, ApiError> {
        let request = self.client.build_decode_vins(vins)?;
        let response = self
            .transport
            .execute(&request)
            .map_err(|e| ApiError::BatchDecode(Box::new(e)))?;
        let vehicles = self.client.parse_decode_vins(vins, response)?;
        debug!(count = vehicles.len(), "decoded batch");
        Ok(vehicles)
    }

    pub fn decode_wmi(&self, wmi: &str) -> Result<Wmi, ApiError> {
        let request = self.client.build_decode_wmi(wmi)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_decode_wmi(wmi, response)
    }

    /// WMIs whose manufacturer name matches `search`.
    pub fn get_wmis(&self, search: &str) -> Result<Results<Wmi>, ApiError> {
        let request = self.client.build_get_wmis(search)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_wmis(search, response)
    }
}

impl Vin {
    /// Decode this VIN through `api`.
    pub fn decode<T: Transport>(&self, api: &Vpic<T>) -> Result<Vehicle, ApiError> {
        api.decode_vin(self)
    }
}
