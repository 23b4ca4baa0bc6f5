//! Synchronous client for the NHTSA vPIC vehicle API.
//!
//! # Overview
//! Looks up makes, manufacturers and WMIs, and decodes full or partial VINs
//! singly or in batches. `VpicClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern); `Vpic` pairs it with a `Transport` to run the round-trip.
//!
//! # Design
//! - `VpicClient` is stateless. It holds only `base_url`.
//! - Each endpoint is split into `build_*` (validates, produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Entities wrap a `Record`: the raw JSON object as returned plus a
//!   projection onto a fixed set of snake_case fields described by a
//!   static `Schema`.
//! - List endpoints return `Results<T>`, which supports indexing, repeated
//!   iteration and tabular export.
//!
//! ```no_run
//! use vpic_core::{MakeQuery, Vpic};
//!
//! let vpic = Vpic::new();
//! let makes = vpic.get_makes(&MakeQuery::manufacturer("honda"))?;
//! println!("{}", makes.to_table(false, true));
//! # Ok::<(), vpic_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod record;
pub mod results;
pub mod table;
pub mod transport;
pub mod types;
pub mod vehicle;

pub use api::Vpic;
pub use client::VpicClient;
pub use entity::{Entity, Make, Manufacturer, Wmi};
pub use error::{ApiError, ValidationError, ValidationKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use record::{FieldSpec, Record, Schema, Source};
pub use results::Results;
pub use table::{Row, Table};
pub use transport::{Transport, UreqTransport};
pub use types::{
    check_model_year, check_wmi, manufacturer_types, MakeQuery, ManufacturerKey, ManufacturerQuery, ModelYear, Vin,
};
pub use vehicle::Vehicle;
