//! The closed set of lookup entity types.
//!
//! Each entity kind maps to exactly one primary-store table and one
//! secondary-index namespace. The mapping is a static configuration table,
//! not discovered at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::index::IndexNamespace;

/// A lookup entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Country reference data (name, ISO code, flag URL).
    Country,
    /// Device reference data (type, manufacturer, model, OS).
    Device,
    /// Educational institution reference data (name).
    EducationalInstitution,
}

impl EntityKind {
    /// All entity kinds, in a stable order.
    ///
    /// Used by maintenance tooling that iterates every lookup table.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Country,
        EntityKind::Device,
        EntityKind::EducationalInstitution,
    ];

    /// The primary-store table holding records of this kind.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Country => "countries",
            EntityKind::Device => "devices",
            EntityKind::EducationalInstitution => "educational_institutions",
        }
    }

    /// The secondary-index namespace (index + document type) for this kind.
    pub fn namespace(&self) -> IndexNamespace {
        match self {
            EntityKind::Country => IndexNamespace::new("countries", "country"),
            EntityKind::Device => IndexNamespace::new("devices", "device"),
            EntityKind::EducationalInstitution => {
                IndexNamespace::new("educational_institutions", "educationalInstitution")
            }
        }
    }

    /// The URL path segment for this kind, e.g. `/lookups/{segment}`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            EntityKind::Country => "countries",
            EntityKind::Device => "devices",
            EntityKind::EducationalInstitution => "educationalInstitutions",
        }
    }

    /// Fields that must be present on create and full update.
    ///
    /// Deeper validation (formats, code lists) is handled upstream.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Country => &["name", "countryCode"],
            EntityKind::Device => &["type", "manufacturer", "model"],
            EntityKind::EducationalInstitution => &["name"],
        }
    }

    /// Optional entity-specific fields.
    pub fn optional_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Country => &["countryFlagUrl"],
            EntityKind::Device => &["operatingSystem", "operatingSystemVersion"],
            EntityKind::EducationalInstitution => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Country => "country",
            EntityKind::Device => "device",
            EntityKind::EducationalInstitution => "educationalInstitution",
        };
        write!(f, "{}", name)
    }
}

/// Error returned when a string does not name a known entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl fmt::Display for UnknownEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity type: {}", self.0)
    }
}

impl std::error::Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Parses either the singular entity name or the route segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" | "countries" => Ok(EntityKind::Country),
            "device" | "devices" => Ok(EntityKind::Device),
            "educationalInstitution" | "educationalInstitutions" => {
                Ok(EntityKind::EducationalInstitution)
            }
            other => Err(UnknownEntityKind(other.to_string())),
        }
    }
}
