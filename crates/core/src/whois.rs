//! WHOIS search request constructors
//!
//! Every WHOIS operation POSTs to the same /whois/search endpoint with a
//! `search_type` discriminator. The constructors here build the exact body
//! each operation expects; responses are passed through as opaque JSON.

use serde::Serialize;

/// Error type for WHOIS request construction
#[derive(Debug, thiserror::Error)]
pub enum WhoisError {
    #[error("Reverse WHOIS requires at least one of: name, organization, email")]
    EmptyReverseQuery,
}

/// Body of POST /whois/search.
#[derive(Debug, Serialize, Clone)]
pub struct WhoisRequest {
    pub search_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Criteria for a reverse WHOIS lookup.
#[derive(Debug, Default, Clone)]
pub struct ReverseWhoisParams {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl WhoisRequest {
    fn for_domain(search_type: &'static str, domain: String) -> Self {
        Self {
            search_type,
            domain: Some(domain),
            name: None,
            organization: None,
            email: None,
            include: None,
            exclude: None,
        }
    }

    /// Current WHOIS record for a domain.
    pub fn lookup(domain: String) -> Self {
        Self::for_domain("whois", domain)
    }

    /// Historical WHOIS records for a domain.
    pub fn history(domain: String) -> Self {
        Self::for_domain("whois-history", domain)
    }

    /// Domains hosted on an IP address. The API reuses the `domain` field.
    pub fn reverse_ip(ip_address: String) -> Self {
        Self::for_domain("reverse-ip", ip_address)
    }

    /// Domains using an MX server.
    pub fn reverse_mx(mx_server: String) -> Self {
        Self::for_domain("reverse-mx", mx_server)
    }

    /// Domains using a nameserver.
    pub fn reverse_ns(ns_server: String) -> Self {
        Self::for_domain("reverse-ns", ns_server)
    }

    /// Subdomains of a base domain discovered through WHOIS data.
    pub fn subdomain_scan(domain: String) -> Self {
        Self::for_domain("subdomain-scan", domain)
    }

    /// Domains matching registrant criteria.
    pub fn reverse(params: ReverseWhoisParams) -> Result<Self, WhoisError> {
        if params.name.is_none() && params.organization.is_none() && params.email.is_none() {
            return Err(WhoisError::EmptyReverseQuery);
        }

        Ok(Self {
            search_type: "reverse-whois",
            domain: None,
            name: params.name,
            organization: params.organization,
            email: params.email,
            include: params.include,
            exclude: params.exclude,
        })
    }
}
