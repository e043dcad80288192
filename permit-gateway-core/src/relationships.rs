//! Resource relationship listing
//!
//! The gateway currently serves a fixed sample page instead of querying
//! Permit.io for per-resource relations. The page is embedded at compile
//! time and parsed on demand.

use crate::error::Result;
use serde::{Deserialize, Serialize};

const FIXTURE: &str = include_str!("../fixtures/resource_relationships.json");

/// A declared relation between a subject and an object resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRelationship {
    /// Relation id
    pub id: String,
    /// Relation key (e.g. `member_of`, `parent`)
    pub key: String,
    /// Display name
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Subject resource type key
    pub subject_resource: String,
    /// Subject resource type id
    pub subject_resource_id: String,
    /// Object resource type key
    pub object_resource: String,
    /// Object resource type id
    pub object_resource_id: String,
    /// Owning organization
    pub organization_id: String,
    /// Owning project
    pub project_id: String,
    /// Owning environment
    pub environment_id: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// One page of relationship records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipPage {
    /// Records on this page
    pub data: Vec<ResourceRelationship>,
    /// Total number of records across all pages
    pub total_count: u64,
    /// Number of pages
    pub page_count: u64,
}

impl RelationshipPage {
    /// The sample relationship page served by `/resource_relationships`
    pub fn fixture() -> Result<Self> {
        Ok(serde_json::from_str(FIXTURE)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let page = RelationshipPage::fixture().unwrap();
        assert_eq!(page.total_count, 4);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.data.len(), 4);
    }

    #[test]
    fn test_fixture_relations() {
        let page = RelationshipPage::fixture().unwrap();
        let triples: Vec<(&str, &str, &str)> = page
            .data
            .iter()
            .map(|r| {
                (
                    r.subject_resource.as_str(),
                    r.key.as_str(),
                    r.object_resource.as_str(),
                )
            })
            .collect();

        assert_eq!(
            triples,
            vec![
                ("User", "member_of", "Organization"),
                ("Repository", "parent", "Issue"),
                ("Organization", "parent", "Repository"),
                ("User", "member_of", "Repository"),
            ]
        );
    }

    #[test]
    fn test_fixture_serializes_all_fields() {
        let page = RelationshipPage::fixture().unwrap();
        let value = serde_json::to_value(&page).unwrap();
        let raw: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(value, raw);
    }
}
