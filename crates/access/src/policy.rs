use crate::error::{AccessError, Result};
use crate::types::{Actor, Resource, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    RoleNotPermitted,
    NotOwner,
    SelfReview,
}

impl DenyReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::RoleNotPermitted => "role_not_permitted",
            Self::NotOwner => "not_owner",
            Self::SelfReview => "self_review",
        }
    }

    /// User-facing message.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "You must be logged in to perform this action",
            Self::RoleNotPermitted => "Your account role is not permitted to perform this action",
            Self::NotOwner => "You can only modify resources you own",
            Self::SelfReview => "Business owners cannot review their own business",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Single atomic outcome of a policy check.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Allow,
    Deny(DenyReason),
}

impl Verdict {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    pub const fn reason(self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(AccessError::Denied(reason)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authentication {
    /// Open to anonymous callers
    Public,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerRule {
    None,
    /// Actor must be the resource owner
    MustOwn,
    /// A business owner may not act on a resource they own
    NoSelfReview,
}

/// Declared requirements of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub authentication: Authentication,
    pub required_role: Option<Role>,
    pub owner_rule: OwnerRule,
}

impl AccessPolicy {
    pub const fn public() -> Self {
        Self {
            authentication: Authentication::Public,
            required_role: None,
            owner_rule: OwnerRule::None,
        }
    }

    pub const fn authenticated() -> Self {
        Self {
            authentication: Authentication::Required,
            required_role: None,
            owner_rule: OwnerRule::None,
        }
    }

    pub const fn with_role(self, role: Role) -> Self {
        Self {
            authentication: Authentication::Required,
            required_role: Some(role),
            ..self
        }
    }

    pub const fn owned(self) -> Self {
        Self {
            authentication: Authentication::Required,
            owner_rule: OwnerRule::MustOwn,
            ..self
        }
    }

    pub const fn forbid_self_review(self) -> Self {
        Self {
            authentication: Authentication::Required,
            owner_rule: OwnerRule::NoSelfReview,
            ..self
        }
    }

    /// A role or owner gate implies authentication even if the policy was
    /// declared public.
    pub const fn requires_actor(&self) -> bool {
        matches!(self.authentication, Authentication::Required)
            || self.required_role.is_some()
            || !matches!(self.owner_rule, OwnerRule::None)
    }

    /// Whether the check needs the target resource's owner.
    pub const fn needs_resource(&self) -> bool {
        !matches!(self.owner_rule, OwnerRule::None)
    }

    pub fn evaluate(&self, actor: Option<&Actor>, resource: Option<&Resource>) -> Verdict {
        let verdict = self.check(actor, resource);
        if let Verdict::Deny(reason) = verdict {
            log::debug!(
                "access denied: reason={reason} actor={} role={} required_role={:?}",
                actor.map_or("-", |a| a.id.as_str()),
                actor.map_or("-", |a| a.role.as_str()),
                self.required_role
            );
        }
        verdict
    }

    fn check(&self, actor: Option<&Actor>, resource: Option<&Resource>) -> Verdict {
        let Some(actor) = actor else {
            if self.requires_actor() {
                return Verdict::Deny(DenyReason::Unauthenticated);
            }
            return Verdict::Allow;
        };

        if let Some(required) = self.required_role {
            if actor.role != required {
                return Verdict::Deny(DenyReason::RoleNotPermitted);
            }
        }

        match self.owner_rule {
            OwnerRule::None => {}
            OwnerRule::MustOwn => {
                // An unknown owner can never match.
                if !resource.is_some_and(|r| actor.owns(r)) {
                    return Verdict::Deny(DenyReason::NotOwner);
                }
            }
            OwnerRule::NoSelfReview => {
                if actor.role == Role::BusinessOwner && resource.is_some_and(|r| actor.owns(r)) {
                    return Verdict::Deny(DenyReason::SelfReview);
                }
            }
        }

        Verdict::Allow
    }
}

/// Evaluate `policy` for `actor` against `resource`.
///
/// `actor == None` means the request carried no valid identity.
pub fn authorize(
    actor: Option<&Actor>,
    policy: &AccessPolicy,
    resource: Option<&Resource>,
) -> Verdict {
    policy.evaluate(actor, resource)
}
