//! Header names and fixed values the portal's front end sends.

/// Anti-forgery token, used both as a header name and as a form field name.
pub const REQUEST_VERIFICATION_TOKEN: &str = "__RequestVerificationToken";

/// Marks a request as issued by the page's own scripts.
pub const X_REQUESTED_WITH: &str = "X-Requested-With";

/// Value of [`X_REQUESTED_WITH`] on every POST.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Content type of every POST body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
