//! The built-in resource catalog.

mod audit_records;
mod billing_invoices;
mod org_billing;
mod org_invoices;
mod org_projects;
mod org_serviceuser_credentials;
mod org_serviceusers;
mod org_tokens;
mod org_users;
mod project_users;
mod prospects;
mod user_orgs;
mod user_projects;

use std::str::FromStr;

use crate::error::CompileError;
use crate::schema::{ResourceSchema, TableRef};

pub(crate) const ORGANIZATIONS: TableRef = TableRef::new("organizations");
pub(crate) const USERS: TableRef = TableRef::new("users");
pub(crate) const POLICIES: TableRef = TableRef::new("policies");
pub(crate) const ROLES: TableRef = TableRef::new("roles");
pub(crate) const PROJECTS: TableRef = TableRef::new("projects");
pub(crate) const SERVICE_USERS: TableRef = TableRef::new("serviceusers");
pub(crate) const BILLING_CUSTOMERS: TableRef = TableRef::new("billing_customers");
pub(crate) const BILLING_INVOICES: TableRef = TableRef::new("billing_invoices");

pub(crate) const NAMESPACE_ORGANIZATION: &str = "app/organization";
pub(crate) const NAMESPACE_PROJECT: &str = "app/project";
pub(crate) const PRINCIPAL_USER: &str = "app/user";
pub(crate) const PRINCIPAL_SERVICE_USER: &str = "app/serviceuser";

/// Names of the built-in resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    OrgInvoices,
    BillingInvoices,
    OrgUsers,
    OrgProjects,
    OrgTokens,
    OrgServiceUsers,
    OrgServiceUserCredentials,
    OrgBilling,
    UserProjects,
    UserOrgs,
    ProjectUsers,
    AuditRecords,
    Prospects,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 13] = [
        Self::OrgInvoices,
        Self::BillingInvoices,
        Self::OrgUsers,
        Self::OrgProjects,
        Self::OrgTokens,
        Self::OrgServiceUsers,
        Self::OrgServiceUserCredentials,
        Self::OrgBilling,
        Self::UserProjects,
        Self::UserOrgs,
        Self::ProjectUsers,
        Self::AuditRecords,
        Self::Prospects,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrgInvoices => "org_invoices",
            Self::BillingInvoices => "billing_invoices",
            Self::OrgUsers => "org_users",
            Self::OrgProjects => "org_projects",
            Self::OrgTokens => "org_tokens",
            Self::OrgServiceUsers => "org_serviceusers",
            Self::OrgServiceUserCredentials => "org_serviceuser_credentials",
            Self::OrgBilling => "org_billing",
            Self::UserProjects => "user_projects",
            Self::UserOrgs => "user_orgs",
            Self::ProjectUsers => "project_users",
            Self::AuditRecords => "audit_records",
            Self::Prospects => "prospects",
        }
    }

    /// Schema of this resource.
    pub fn schema(self) -> ResourceSchema {
        match self {
            Self::OrgInvoices => org_invoices::schema(),
            Self::BillingInvoices => billing_invoices::schema(),
            Self::OrgUsers => org_users::schema(),
            Self::OrgProjects => org_projects::schema(),
            Self::OrgTokens => org_tokens::schema(),
            Self::OrgServiceUsers => org_serviceusers::schema(),
            Self::OrgServiceUserCredentials => org_serviceuser_credentials::schema(),
            Self::OrgBilling => org_billing::schema(),
            Self::UserProjects => user_projects::schema(),
            Self::UserOrgs => user_orgs::schema(),
            Self::ProjectUsers => project_users::schema(),
            Self::AuditRecords => audit_records::schema(),
            Self::Prospects => prospects::schema(),
        }
    }
}

impl AsRef<str> for ResourceKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CompileError::UnknownResource(s.to_owned()))
    }
}

/// Every built-in schema.
pub(crate) fn all() -> Vec<ResourceSchema> {
    ResourceKind::ALL
        .into_iter()
        .map(ResourceKind::schema)
        .collect()
}
