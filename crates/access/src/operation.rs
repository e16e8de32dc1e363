use crate::error::AccessError;
use crate::policy::{AccessPolicy, Verdict};
use crate::types::{Actor, Resource, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which subgraph serves an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subgraph {
    Auth,
    Business,
    Community,
}

impl Subgraph {
    pub const fn as_str(self) -> &'static str {
        match self {
            Subgraph::Auth => "auth",
            Subgraph::Business => "business",
            Subgraph::Community => "community",
        }
    }
}

/// Every query and mutation that is gated (or explicitly open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    // auth
    Register,
    Login,
    CurrentUser,
    UpdateAccount,
    DeleteAccount,

    // business
    ListBusinesses,
    ViewBusiness,
    CreateBusiness,
    UpdateBusiness,
    DeleteBusiness,
    ListDeals,
    CreateDeal,
    UpdateDeal,
    DeleteDeal,
    ListReviews,
    CreateReview,
    RespondToReview,

    // community
    ListPosts,
    ViewPost,
    CreatePost,
    UpdatePost,
    DeletePost,
    ListHelpRequests,
    CreateHelpRequest,
    UpdateHelpRequest,
    VolunteerForHelpRequest,
    ListAlerts,
    CreateAlert,
    DeleteAlert,
    ListEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    RsvpEvent,
}

impl Operation {
    pub const ALL: [Operation; 34] = [
        Operation::Register,
        Operation::Login,
        Operation::CurrentUser,
        Operation::UpdateAccount,
        Operation::DeleteAccount,
        Operation::ListBusinesses,
        Operation::ViewBusiness,
        Operation::CreateBusiness,
        Operation::UpdateBusiness,
        Operation::DeleteBusiness,
        Operation::ListDeals,
        Operation::CreateDeal,
        Operation::UpdateDeal,
        Operation::DeleteDeal,
        Operation::ListReviews,
        Operation::CreateReview,
        Operation::RespondToReview,
        Operation::ListPosts,
        Operation::ViewPost,
        Operation::CreatePost,
        Operation::UpdatePost,
        Operation::DeletePost,
        Operation::ListHelpRequests,
        Operation::CreateHelpRequest,
        Operation::UpdateHelpRequest,
        Operation::VolunteerForHelpRequest,
        Operation::ListAlerts,
        Operation::CreateAlert,
        Operation::DeleteAlert,
        Operation::ListEvents,
        Operation::CreateEvent,
        Operation::UpdateEvent,
        Operation::DeleteEvent,
        Operation::RsvpEvent,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::CurrentUser => "current_user",
            Operation::UpdateAccount => "update_account",
            Operation::DeleteAccount => "delete_account",
            Operation::ListBusinesses => "list_businesses",
            Operation::ViewBusiness => "view_business",
            Operation::CreateBusiness => "create_business",
            Operation::UpdateBusiness => "update_business",
            Operation::DeleteBusiness => "delete_business",
            Operation::ListDeals => "list_deals",
            Operation::CreateDeal => "create_deal",
            Operation::UpdateDeal => "update_deal",
            Operation::DeleteDeal => "delete_deal",
            Operation::ListReviews => "list_reviews",
            Operation::CreateReview => "create_review",
            Operation::RespondToReview => "respond_to_review",
            Operation::ListPosts => "list_posts",
            Operation::ViewPost => "view_post",
            Operation::CreatePost => "create_post",
            Operation::UpdatePost => "update_post",
            Operation::DeletePost => "delete_post",
            Operation::ListHelpRequests => "list_help_requests",
            Operation::CreateHelpRequest => "create_help_request",
            Operation::UpdateHelpRequest => "update_help_request",
            Operation::VolunteerForHelpRequest => "volunteer_for_help_request",
            Operation::ListAlerts => "list_alerts",
            Operation::CreateAlert => "create_alert",
            Operation::DeleteAlert => "delete_alert",
            Operation::ListEvents => "list_events",
            Operation::CreateEvent => "create_event",
            Operation::UpdateEvent => "update_event",
            Operation::DeleteEvent => "delete_event",
            Operation::RsvpEvent => "rsvp_event",
        }
    }

    pub const fn subgraph(self) -> Subgraph {
        match self {
            Operation::Register
            | Operation::Login
            | Operation::CurrentUser
            | Operation::UpdateAccount
            | Operation::DeleteAccount => Subgraph::Auth,
            Operation::ListBusinesses
            | Operation::ViewBusiness
            | Operation::CreateBusiness
            | Operation::UpdateBusiness
            | Operation::DeleteBusiness
            | Operation::ListDeals
            | Operation::CreateDeal
            | Operation::UpdateDeal
            | Operation::DeleteDeal
            | Operation::ListReviews
            | Operation::CreateReview
            | Operation::RespondToReview => Subgraph::Business,
            _ => Subgraph::Community,
        }
    }

    /// Requirements declared by the operation's resolver.
    ///
    /// For owner-gated operations the resource is the entity that carries the
    /// owning identity: the account itself, the business (also for its deals
    /// and for responses to its reviews), or the post/request/alert/event
    /// author.
    pub const fn policy(self) -> AccessPolicy {
        match self {
            Operation::Register
            | Operation::Login
            | Operation::ListBusinesses
            | Operation::ViewBusiness
            | Operation::ListDeals
            | Operation::ListReviews
            | Operation::ListPosts
            | Operation::ViewPost
            | Operation::ListHelpRequests
            | Operation::ListAlerts
            | Operation::ListEvents => AccessPolicy::public(),

            Operation::CurrentUser
            | Operation::CreatePost
            | Operation::CreateHelpRequest
            | Operation::VolunteerForHelpRequest
            | Operation::CreateAlert
            | Operation::RsvpEvent => AccessPolicy::authenticated(),

            Operation::UpdateAccount
            | Operation::DeleteAccount
            | Operation::UpdatePost
            | Operation::DeletePost
            | Operation::UpdateHelpRequest
            | Operation::DeleteAlert => AccessPolicy::authenticated().owned(),

            Operation::CreateBusiness => AccessPolicy::authenticated().with_role(Role::BusinessOwner),

            Operation::UpdateBusiness
            | Operation::DeleteBusiness
            | Operation::CreateDeal
            | Operation::UpdateDeal
            | Operation::DeleteDeal
            | Operation::RespondToReview => AccessPolicy::authenticated()
                .with_role(Role::BusinessOwner)
                .owned(),

            Operation::CreateReview => AccessPolicy::authenticated().forbid_self_review(),

            Operation::CreateEvent => {
                AccessPolicy::authenticated().with_role(Role::CommunityOrganizer)
            }

            Operation::UpdateEvent | Operation::DeleteEvent => AccessPolicy::authenticated()
                .with_role(Role::CommunityOrganizer)
                .owned(),
        }
    }

    pub const fn is_mutation(self) -> bool {
        !matches!(
            self,
            Operation::Login
                | Operation::CurrentUser
                | Operation::ListBusinesses
                | Operation::ViewBusiness
                | Operation::ListDeals
                | Operation::ListReviews
                | Operation::ListPosts
                | Operation::ViewPost
                | Operation::ListHelpRequests
                | Operation::ListAlerts
                | Operation::ListEvents
        )
    }

    pub fn authorize(self, actor: Option<&Actor>, resource: Option<&Resource>) -> Verdict {
        self.policy().evaluate(actor, resource)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = AccessError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| AccessError::UnknownOperation(raw.to_string()))
    }
}
