//! Entity type resolution from the URL path.

use std::str::FromStr;

use lookup_store::types::EntityKind;

use crate::error::RestError;

/// Resolves a `/lookups/{entityType}` path segment to an entity kind.
///
/// An unknown segment is a 404, matching an API that simply has no such
/// route.
#[derive(Debug, Clone, Copy)]
pub struct EntityPath(pub EntityKind);

impl EntityPath {
    /// Parses the route segment.
    pub fn parse(segment: &str) -> Result<Self, RestError> {
        EntityKind::from_str(segment)
            .map(EntityPath)
            .map_err(|_| RestError::UnknownEntityType {
                segment: segment.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_segments() {
        assert_eq!(EntityPath::parse("countries").unwrap().0, EntityKind::Country);
        assert_eq!(
            EntityPath::parse("educationalInstitutions").unwrap().0,
            EntityKind::EducationalInstitution
        );
    }

    #[test]
    fn test_unknown_segment_is_not_found() {
        let err = EntityPath::parse("widgets").unwrap_err();
        assert!(matches!(err, RestError::UnknownEntityType { .. }));
    }
}
