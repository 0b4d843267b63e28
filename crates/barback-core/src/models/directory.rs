//! Directory read-model.
//!
//! The directory is a flat, denormalized listing of every location the
//! caller may operate, shaped for fast display and grouping. Nothing in
//! it is authoritative beyond the three identifiers — names are display
//! hints that resolution re-verifies against the entity records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized, display-oriented projection of a location.
///
/// Produced by the directory listing, consumed by the switcher UI and
/// handed back to selection. Ephemeral: re-fetched on every directory
/// load and never cached beyond the current listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub brand_id: Uuid,
    /// Display hint only; the authoritative name lives on [`super::brand::Brand`].
    pub brand_name: String,
    pub organization_id: Uuid,
    /// Display hint only, and not unique across organizations.
    pub organization_name: String,
}

/// One organization's locations, in directory order.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationGroup {
    pub organization_id: Uuid,
    pub organization_name: String,
    pub locations: Vec<LocationSummary>,
}

/// Group directory entries by organization for display.
///
/// Groups are keyed by organization id, not by display name; two
/// distinct organizations sharing a name yield two groups. Groups appear
/// in order of first occurrence and locations keep their directory order
/// within each group; the input slice is left untouched, so callers that
/// auto-select "the first location in directory order" are unaffected by
/// grouping.
pub fn group_by_organization(summaries: &[LocationSummary]) -> Vec<OrganizationGroup> {
    let mut groups: Vec<OrganizationGroup> = Vec::new();

    for summary in summaries {
        match groups
            .iter_mut()
            .find(|g| g.organization_id == summary.organization_id)
        {
            Some(group) => group.locations.push(summary.clone()),
            None => groups.push(OrganizationGroup {
                organization_id: summary.organization_id,
                organization_name: summary.organization_name.clone(),
                locations: vec![summary.clone()],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(org: Uuid, org_name: &str, name: &str) -> LocationSummary {
        LocationSummary {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: name.to_lowercase(),
            city: "Lisbon".into(),
            brand_id: Uuid::new_v4(),
            brand_name: "House Brand".into(),
            organization_id: org,
            organization_name: org_name.into(),
        }
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();
        let list = vec![
            summary(org_a, "Meridian", "Dock Bar"),
            summary(org_b, "Solstice", "Tea Loft"),
            summary(org_a, "Meridian", "Roof Bar"),
        ];

        let groups = group_by_organization(&list);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].organization_id, org_a);
        assert_eq!(groups[1].organization_id, org_b);
        assert_eq!(groups[0].locations.len(), 2);
        assert_eq!(groups[0].locations[0].name, "Dock Bar");
        assert_eq!(groups[0].locations[1].name, "Roof Bar");
    }

    #[test]
    fn same_display_name_different_organizations_stay_separate() {
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();
        // Two distinct organizations trading under the same name.
        let list = vec![
            summary(org_a, "Harbor House", "North Pier"),
            summary(org_b, "Harbor House", "South Pier"),
        ];

        let groups = group_by_organization(&list);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].organization_name, groups[1].organization_name);
        assert_ne!(groups[0].organization_id, groups[1].organization_id);
    }

    #[test]
    fn input_order_is_untouched() {
        let org = Uuid::new_v4();
        let list = vec![
            summary(org, "Meridian", "B"),
            summary(org, "Meridian", "A"),
        ];
        let ids: Vec<Uuid> = list.iter().map(|s| s.id).collect();

        let _ = group_by_organization(&list);

        assert_eq!(ids, list.iter().map(|s| s.id).collect::<Vec<_>>());
    }
}
