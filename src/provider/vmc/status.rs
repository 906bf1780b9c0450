//! # VMC HTTP Status Catalogue
//!
//! Descriptions and remediation hints for the status codes VMC returns.

/// Short meaning of a VMC HTTP status code
pub fn status_description(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "The user is not authorized to use the API",
        403 => "The user is forbidden to use the API",
        404 => "Organization or SDDC with this identifier is not found",
        409 => "The request could not be processed due to a conflict",
        429 => "The user has sent too many requests",
        500 => "An unexpected error has occurred while processing the request",
        503 => "Service Unavailable",
        504 => "Gateway Error",
        _ => "Unknown error",
    }
}

/// What the operator can do about a VMC HTTP status code
pub fn remediation(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("The request was improperly formatted or contained an invalid parameter."),
        401 => Some("The API token is likely expired or otherwise incorrect."),
        403 => Some(
            "The API token does not grant sufficient privileges, or the request modifies a read-only property.",
        ),
        404 => Some("Confirm the OrgID and SDDC ID are correct."),
        409 => Some(
            "Another client modified the same entity. Re-fetch the resource, apply the change and reissue the request.",
        ),
        503 => Some(
            "The associated resource could not be reached or is temporarily busy. Confirm the OrgID and SDDC ID are correct.",
        ),
        504 => Some("There is a problem with the network path to VMC."),
        _ => None,
    }
}
