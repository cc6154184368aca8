//! The fixed table chains this tool migrates.
//!
//! Invitations hang off resources: the primary table is keyed by resource
//! id, and three lookup tables index it by email and token. Principals are
//! keyed by tenant alias, with one lookup table by email.

use crate::spec::{Chain, StageFilter, TableSpec};

/// Seeded by the caller before the invitations chain runs: every resource
/// id owned by the tenant being moved.
pub const ALL_RESOURCE_IDS: &str = "allResourceIds";
pub const ALL_INVITATION_EMAILS: &str = "allInvitationEmails";
pub const ALL_INVITATION_TOKENS: &str = "allInvitationTokens";
pub const TENANT_PRINCIPALS: &str = "tenantPrincipals";

pub fn invitations_chain() -> Chain {
    Chain::new(
        "invitations",
        [ALL_RESOURCE_IDS],
        [
            TableSpec::new(
                "AuthzInvitations",
                StageFilter::in_key_set("resourceId", ALL_RESOURCE_IDS),
                ["resourceId", "email", "inviterUserId", "role"],
            )
            .with_extract("email", ALL_INVITATION_EMAILS),
            TableSpec::new(
                "AuthzInvitationsResourceIdByEmail",
                StageFilter::in_key_set("email", ALL_INVITATION_EMAILS),
                ["email", "resourceId"],
            ),
            TableSpec::new(
                "AuthzInvitationsTokenByEmail",
                StageFilter::in_key_set("email", ALL_INVITATION_EMAILS),
                ["email", "token"],
            )
            .with_extract("token", ALL_INVITATION_TOKENS),
            TableSpec::new(
                "AuthzInvitationsEmailByToken",
                StageFilter::in_key_set("token", ALL_INVITATION_TOKENS),
                ["token", "email"],
            ),
        ],
    )
}

pub fn principals_chain(tenant_alias: &str) -> Chain {
    Chain::new(
        "principals",
        Vec::<String>::new(),
        [
            TableSpec::new(
                "Principals",
                StageFilter::eq("tenantAlias", tenant_alias),
                [
                    "principalId",
                    "acceptedTC",
                    "admin:global",
                    "admin:tenant",
                    "created",
                    "createdBy",
                    "deleted",
                    "description",
                    "displayName",
                    "email",
                    "emailPreference",
                    "joinable",
                    "largePictureUri",
                    "lastModified",
                    "locale",
                    "mediumPictureUri",
                    "notificationsLastRead",
                    "notificationsUnread",
                    "publicAlias",
                    "smallPictureUri",
                    "tenantAlias",
                    "visibility",
                ],
            )
            .with_extract("principalId", TENANT_PRINCIPALS),
            TableSpec::new(
                "PrincipalsByEmail",
                StageFilter::in_key_set("principalId", TENANT_PRINCIPALS),
                ["email", "principalId"],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::StageFilter;

    #[test]
    fn catalog_chains_validate() {
        invitations_chain().validate().unwrap();
        principals_chain("t1").validate().unwrap();
    }

    #[test]
    fn invitations_insert_order_is_pinned() {
        let chain = invitations_chain();
        assert_eq!(
            chain.stages[0].columns,
            vec!["resourceId", "email", "inviterUserId", "role"]
        );
        assert_eq!(chain.stages[1].columns, vec!["email", "resourceId"]);
        assert_eq!(chain.stages[2].columns, vec!["email", "token"]);
        assert_eq!(chain.stages[3].columns, vec!["token", "email"]);
    }

    #[test]
    fn principals_root_filters_by_tenant_alias() {
        let chain = principals_chain("t1");
        assert_eq!(
            chain.stages[0].filter,
            StageFilter::eq("tenantAlias", "t1")
        );
        assert_eq!(chain.stages[0].columns.len(), 22);
    }
}
