//! Category schemas for part specifications.
//!
//! The engine itself tolerates any specification shape. These schemas are for
//! the catalog side: checking part data before it is stored, so that values
//! the evaluators rely on (`socket`, `wattage`, ...) have the expected types.
//! Unknown keys are always allowed; categories without a schema accept any
//! map.

use crate::catalog::{Part, PartType};
use crate::errors::{BluprintError, BluprintResult};
use crate::specs::SpecMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Compiled validators by category. Compilation errors are kept so they
/// surface on use.
static VALIDATORS: OnceLock<HashMap<PartType, Result<jsonschema::Validator, String>>> =
    OnceLock::new();

const MAX_ERRORS: usize = 5;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_MANUFACTURER_CHARS: usize = 100;

fn number(min: u32) -> Value {
    json!({"type": "number", "minimum": min})
}

fn string() -> Value {
    json!({"type": "string"})
}

fn schema(properties: Value) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": true
    })
}

fn category_schema(part_type: &PartType) -> Option<Value> {
    let properties = match part_type {
        PartType::Cpu => json!({
            "socket": string(),
            "core_count": number(1),
            "thread_count": number(1),
            "clock_speed": number(0),
            "boost_clock": number(0),
            "tdp": number(0),
            "power_consumption": number(0),
            "manufacturing_process": string(),
            "integrated_graphics": {"type": "boolean"}
        }),
        PartType::Gpu => json!({
            "memory_size": number(0),
            "memory_type": string(),
            "clock_speed": number(0),
            "boost_clock": number(0),
            "cuda_cores": number(0),
            "tdp": number(0),
            "power_consumption": number(0),
            "pcie_slot": string(),
            "length": number(0),
            "width": number(0)
        }),
        PartType::Ram => json!({
            "memory_size": number(0),
            "speed": number(0),
            "type": string(),
            "cas_latency": number(0),
            "voltage": number(0),
            "form_factor": string(),
            "modules": number(1)
        }),
        PartType::Motherboard => json!({
            "socket": string(),
            "form_factor": string(),
            "chipset": string(),
            "memory_slots": number(0),
            "max_memory": number(0),
            "memory_type": string(),
            "pcie_slots": number(0),
            "sata_ports": number(0),
            "m2_slots": number(0),
            "usb_ports": number(0)
        }),
        PartType::Storage => json!({
            "storage_capacity": number(0),
            "interface": string(),
            "form_factor": string(),
            "read_speed": number(0),
            "write_speed": number(0),
            "rpm": number(0),
            "cache": number(0)
        }),
        PartType::Psu => json!({
            "wattage": number(0),
            "efficiency_rating": string(),
            "modular": {"type": "boolean"},
            "sata_connectors": number(0),
            "pcie_connectors": number(0),
            "cpu_connectors": number(0)
        }),
        PartType::Case => json!({
            "form_factor": string(),
            "max_gpu_length": number(0),
            "max_cpu_cooler_height": number(0),
            "drive_bays": number(0),
            "fan_support": string(),
            "dimensions": string()
        }),
        PartType::Cooler => json!({
            "type": string(),
            "socket_compatibility": {"type": "array", "items": string()},
            "height": number(0),
            "tdp": number(0),
            "noise_level": number(0),
            "fan_size": number(0)
        }),
        PartType::Network | PartType::Other | PartType::Custom(_) => return None,
    };
    Some(schema(properties))
}

fn validators() -> &'static HashMap<PartType, Result<jsonschema::Validator, String>> {
    VALIDATORS.get_or_init(|| {
        PartType::KNOWN
            .into_iter()
            .filter_map(|part_type| {
                let schema = category_schema(&part_type)?;
                let compiled = jsonschema::validator_for(&schema)
                    .map_err(|e| format!("failed to compile {part_type} schema: {e}"));
                Some((part_type, compiled))
            })
            .collect()
    })
}

/// Check a part's specifications against its category schema.
///
/// Reports at most the first few violations in one message.
pub fn validate_specifications(part_type: &PartType, specs: &SpecMap) -> BluprintResult<()> {
    let Some(compiled) = validators().get(part_type) else {
        return Ok(());
    };
    let validator = compiled.as_ref().map_err(|e| BluprintError::SpecValidation {
        part_type: part_type.clone(),
        message: e.clone(),
    })?;

    let instance = serde_json::to_value(specs).map_err(|e| BluprintError::SpecValidation {
        part_type: part_type.clone(),
        message: e.to_string(),
    })?;

    if validator.is_valid(&instance) {
        return Ok(());
    }

    let messages: Vec<String> = validator
        .iter_errors(&instance)
        .take(MAX_ERRORS)
        .map(|e| e.to_string())
        .collect();
    Err(BluprintError::SpecValidation {
        part_type: part_type.clone(),
        message: messages.join("; "),
    })
}

/// Check a part record before it is stored: the record fields first, then
/// the specifications against the category schema.
pub fn validate_part(part: &Part) -> BluprintResult<()> {
    let invalid = |message: &str| BluprintError::PartValidation {
        id: part.id,
        message: message.to_string(),
    };

    if part.name.trim().is_empty() {
        return Err(invalid("Name cannot be empty"));
    }
    if part.name.chars().count() > MAX_NAME_CHARS {
        return Err(invalid("Name cannot exceed 200 characters"));
    }
    if let Some(price) = part.price {
        if !price.is_finite() {
            return Err(invalid("Price must be a number"));
        }
        if price < 0.0 {
            return Err(invalid("Price cannot be negative"));
        }
    }
    if let Some(manufacturer) = &part.manufacturer {
        if manufacturer.chars().count() > MAX_MANUFACTURER_CHARS {
            return Err(invalid("Manufacturer cannot exceed 100 characters"));
        }
    }

    validate_specifications(&part.part_type, &part.specifications)
}

/// Specification keys the category schema knows about, sorted.
pub fn recommended_spec_keys(part_type: &PartType) -> Vec<String> {
    let Some(schema) = category_schema(part_type) else {
        return Vec::new();
    };
    let mut keys: Vec<String> = schema["properties"]
        .as_object()
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
