//! Pure-component property lookups for front ends.

use serde::Serialize;
use vle_props::{
    MolarVolumeProvider, ReferenceData, SaturationPressureProvider, filter_compound_catalog,
    resolve_compound,
};

use crate::error::{AppError, AppResult};

/// Catalog entry as listed to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundSummary {
    pub id: String,
    pub display_name: String,
    pub aliases: Vec<String>,
    pub has_uniquac: bool,
}

/// One property value at one temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    pub compound: String,
    pub temperature_k: f64,
    pub value: f64,
    pub unit: &'static str,
}

/// Catalog entries matching `query` (case-insensitive substring, empty matches all).
pub fn list_compounds(reference: &ReferenceData, query: &str) -> Vec<CompoundSummary> {
    filter_compound_catalog(query)
        .into_iter()
        .map(|entry| CompoundSummary {
            id: entry.canonical_id.to_string(),
            display_name: entry.display_name.to_string(),
            aliases: entry.aliases.iter().map(|a| a.to_string()).collect(),
            has_uniquac: reference.uniquac_species(entry.canonical_id).is_ok(),
        })
        .collect()
}

fn canonical(name: &str) -> AppResult<&'static str> {
    resolve_compound(name)
        .map(|entry| entry.canonical_id)
        .ok_or_else(|| AppError::UnknownCompound(name.to_string()))
}

pub fn saturation_pressure(
    reference: &ReferenceData,
    name: &str,
    temperature_k: f64,
) -> AppResult<PropertyValue> {
    let compound = canonical(name)?;
    Ok(PropertyValue {
        compound: compound.to_string(),
        temperature_k,
        value: reference.psat_kpa(compound, temperature_k)?,
        unit: "kPa",
    })
}

pub fn liquid_molar_volume(
    reference: &ReferenceData,
    name: &str,
    temperature_k: f64,
) -> AppResult<PropertyValue> {
    let compound = canonical(name)?;
    Ok(PropertyValue {
        compound: compound.to_string(),
        temperature_k,
        value: reference.molar_volume_m3(compound, temperature_k)?,
        unit: "m3/mol",
    })
}
