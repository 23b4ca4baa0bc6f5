//! The decoded vehicle returned by `DecodeVinValues` and its batch variant.
//!
//! vPIC reports well over a hundred output variables per decode. They are
//! all declared once in `VEHICLE_SCHEMA`, each mapped to a snake_case
//! logical name; only the handful callers reach for most get typed
//! accessors.

use crate::entity::entity;
use crate::record::{keys, FieldSpec, Record, Schema, Source};

pub const VEHICLE_SCHEMA: Schema = Schema {
    entity: "Vehicle",
    // Decodes are identified by the VIN that was sent, not by anything in
    // the response.
    identifier: &[],
    fields: &[
        FieldSpec {
            name: "full_or_partial_vin",
            source: Source::Identifier,
        },
        keys("abs", &["ABS"]),
        keys("active_safety_sys_note", &["ActiveSafetySysNote"]),
        keys("adaptive_cruise_control", &["AdaptiveCruiseControl"]),
        keys("adaptive_driving_beam", &["AdaptiveDrivingBeam"]),
        keys("adaptive_headlights", &["AdaptiveHeadlights"]),
        keys("additional_error_text", &["AdditionalErrorText"]),
        keys("air_bag_loc_curtain", &["AirBagLocCurtain"]),
        keys("air_bag_loc_front", &["AirBagLocFront"]),
        keys("air_bag_loc_knee", &["AirBagLocKnee"]),
        keys("air_bag_loc_seat_cushion", &["AirBagLocSeatCushion"]),
        keys("air_bag_loc_side", &["AirBagLocSide"]),
        keys("auto_reverse_system", &["AutoReverseSystem"]),
        keys("automatic_pedestrian_alerting_sound", &["AutomaticPedestrianAlertingSound"]),
        keys("axle_configuration", &["AxleConfiguration"]),
        keys("axles", &["Axles"]),
        keys("base_price", &["BasePrice"]),
        keys("battery_a", &["BatteryA"]),
        keys("battery_a_to", &["BatteryA_to"]),
        keys("battery_cells", &["BatteryCells"]),
        keys("battery_info", &["BatteryInfo"]),
        keys("battery_kwh", &["BatteryKWh"]),
        keys("battery_kwh_to", &["BatteryKWh_to"]),
        keys("battery_modules", &["BatteryModules"]),
        keys("battery_packs", &["BatteryPacks"]),
        keys("battery_type", &["BatteryType"]),
        keys("battery_v", &["BatteryV"]),
        keys("battery_v_to", &["BatteryV_to"]),
        keys("bed_length_in", &["BedLengthIN"]),
        keys("bed_type", &["BedType"]),
        keys("blind_spot_mon", &["BlindSpotMon"]),
        keys("body_cab_type", &["BodyCabType"]),
        keys("body_class", &["BodyClass"]),
        keys("brake_system_desc", &["BrakeSystemDesc"]),
        keys("brake_system_type", &["BrakeSystemType"]),
        keys("bus_floor_config_type", &["BusFloorConfigType"]),
        keys("bus_length", &["BusLength"]),
        keys("bus_type", &["BusType"]),
        keys("can_aacn", &["CAN_AACN"]),
        keys("cib", &["CIB"]),
        keys("cash_for_clunkers", &["CashForClunkers"]),
        keys("charger_level", &["ChargerLevel"]),
        keys("charger_power_kw", &["ChargerPowerKW"]),
        keys("cooling_type", &["CoolingType"]),
        keys("curb_weight_lb", &["CurbWeightLB"]),
        keys("custom_motorcycle_type", &["CustomMotorcycleType"]),
        keys("daytime_running_light", &["DaytimeRunningLight"]),
        keys("destination_market", &["DestinationMarket"]),
        keys("displacement_cc", &["DisplacementCC"]),
        keys("displacement_ci", &["DisplacementCI"]),
        keys("displacement_l", &["DisplacementL"]),
        keys("doors", &["Doors"]),
        keys("drive_type", &["DriveType"]),
        keys("driver_assist", &["DriverAssist"]),
        keys("dynamic_brake_support", &["DynamicBrakeSupport"]),
        keys("edr", &["EDR"]),
        keys("esc", &["ESC"]),
        keys("ev_drive_unit", &["EVDriveUnit"]),
        keys("electrification_level", &["ElectrificationLevel"]),
        keys("engine_configuration", &["EngineConfiguration"]),
        keys("engine_cycles", &["EngineCycles"]),
        keys("engine_cylinders", &["EngineCylinders"]),
        keys("engine_hp", &["EngineHP"]),
        keys("engine_hp_to", &["EngineHP_to"]),
        keys("engine_kw", &["EngineKW"]),
        keys("engine_manufacturer", &["EngineManufacturer"]),
        keys("engine_model", &["EngineModel"]),
        keys("entertainment_system", &["EntertainmentSystem"]),
        keys("error_code", &["ErrorCode"]),
        keys("error_text", &["ErrorText"]),
        keys("forward_collision_warning", &["ForwardCollisionWarning"]),
        keys("fuel_injection_type", &["FuelInjectionType"]),
        keys("fuel_type_primary", &["FuelTypePrimary"]),
        keys("fuel_type_secondary", &["FuelTypeSecondary"]),
        keys("gcwr", &["GCWR"]),
        keys("gcwr_to", &["GCWR_to"]),
        keys("gvwr", &["GVWR"]),
        keys("gvwr_to", &["GVWR_to"]),
        keys("keyless_ignition", &["KeylessIgnition"]),
        keys("lane_departure_warning", &["LaneDepartureWarning"]),
        keys("lane_keep_system", &["LaneKeepSystem"]),
        keys("lower_beam_headlamp_light_source", &["LowerBeamHeadlampLightSource"]),
        keys("make", &["Make"]),
        keys("make_id", &["MakeID", "MakeId"]),
        keys("manufacturer", &["Manufacturer"]),
        keys("manufacturer_id", &["ManufacturerId", "ManufacturerID"]),
        keys("model", &["Model"]),
        keys("model_id", &["ModelID", "ModelId"]),
        keys("model_year", &["ModelYear"]),
        keys("motorcycle_chassis_type", &["MotorcycleChassisType"]),
        keys("motorcycle_suspension_type", &["MotorcycleSuspensionType"]),
        keys("ncsa_body_type", &["NCSABodyType"]),
        keys("ncsa_make", &["NCSAMake"]),
        keys("ncsa_map_exc_approved_by", &["NCSAMapExcApprovedBy"]),
        keys("ncsa_map_exc_approved_on", &["NCSAMapExcApprovedOn"]),
        keys("ncsa_mapping_exception", &["NCSAMappingException"]),
        keys("ncsa_model", &["NCSAModel"]),
        keys("ncsa_note", &["NCSANote"]),
        keys("note", &["Note"]),
        keys("other_bus_info", &["OtherBusInfo"]),
        keys("other_engine_info", &["OtherEngineInfo"]),
        keys("other_motorcycle_info", &["OtherMotorcycleInfo"]),
        keys("other_restraint_system_info", &["OtherRestraintSystemInfo"]),
        keys("other_trailer_info", &["OtherTrailerInfo"]),
        keys("park_assist", &["ParkAssist"]),
        keys("pedestrian_automatic_emergency_braking", &["PedestrianAutomaticEmergencyBraking"]),
        keys("plant_city", &["PlantCity"]),
        keys("plant_company_name", &["PlantCompanyName"]),
        keys("plant_country", &["PlantCountry"]),
        keys("plant_state", &["PlantState"]),
        keys("possible_values", &["PossibleValues"]),
        keys("pretensioner", &["Pretensioner"]),
        keys("rear_cross_traffic_alert", &["RearCrossTrafficAlert"]),
        keys("rear_visibility_system", &["RearVisibilitySystem"]),
        keys("sae_automation_level", &["SAEAutomationLevel"]),
        keys("sae_automation_level_to", &["SAEAutomationLevel_to"]),
        keys("seat_belts_all", &["SeatBeltsAll"]),
        keys("seat_rows", &["SeatRows"]),
        keys("seats", &["Seats"]),
        keys("semiautomatic_headlamp_beam_switching", &["SemiautomaticHeadlampBeamSwitching"]),
        keys("series", &["Series"]),
        keys("series2", &["Series2"]),
        keys("steering_location", &["SteeringLocation"]),
        keys("suggested_vin", &["SuggestedVIN"]),
        keys("tpms", &["TPMS"]),
        keys("top_speed_mph", &["TopSpeedMPH"]),
        keys("track_width", &["TrackWidth"]),
        keys("traction_control", &["TractionControl"]),
        keys("trailer_body_type", &["TrailerBodyType"]),
        keys("trailer_length", &["TrailerLength"]),
        keys("trailer_type", &["TrailerType"]),
        keys("transmission_speeds", &["TransmissionSpeeds"]),
        keys("transmission_style", &["TransmissionStyle"]),
        keys("trim", &["Trim"]),
        keys("trim2", &["Trim2"]),
        keys("turbo", &["Turbo"]),
        keys("vin", &["VIN"]),
        keys("valve_train_design", &["ValveTrainDesign"]),
        keys("vehicle_type", &["VehicleType"]),
        keys("wheel_base_long", &["WheelBaseLong"]),
        keys("wheel_base_short", &["WheelBaseShort"]),
        keys("wheel_base_type", &["WheelBaseType"]),
        keys("wheel_size_front", &["WheelSizeFront"]),
        keys("wheel_size_rear", &["WheelSizeRear"]),
        keys("wheels", &["Wheels"]),
        keys("windows", &["Windows"]),
    ],
};

/// One decoded VIN.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle(Record);

entity!(Vehicle, VEHICLE_SCHEMA);

impl Vehicle {
    /// The VIN (or VIN pattern) this vehicle was decoded from.
    pub fn full_or_partial_vin(&self) -> &str {
        self.0.identifier()
    }

    pub fn model_year(&self) -> Option<i64> {
        self.0.integer("model_year")
    }

    pub fn make(&self) -> Option<&str> {
        self.0.text("make")
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.0.text("manufacturer")
    }

    pub fn model(&self) -> Option<&str> {
        self.0.text("model")
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.0.text("vehicle_type")
    }

    pub fn body_class(&self) -> Option<&str> {
        self.0.text("body_class")
    }

    pub fn suggested_vin(&self) -> Option<&str> {
        self.0.text("suggested_vin")
    }

    /// vPIC error code string; `"0"` means the VIN decoded cleanly.
    pub fn error_code(&self) -> Option<&str> {
        self.0.text("error_code")
    }

    pub fn error_text(&self) -> Option<&str> {
        self.0.text("error_text")
    }
}
