//! Lookups against portal pages.
//!
//! Both lookups are partial: absence is `None`, never an error. The flows
//! decide which absence is fatal.

use std::sync::LazyLock;

use bugyo_protocol::REQUEST_VERIFICATION_TOKEN;
use scraper::{Html, Selector};

static TOKEN_INPUT: LazyLock<Selector> = LazyLock::new(|| {
	Selector::parse(&format!(r#"input[name="{REQUEST_VERIFICATION_TOKEN}"]"#)).expect("TOKEN_INPUT should parse")
});

static APPLICATION_ROOT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#ApplicationRoot").expect("APPLICATION_ROOT should parse"));

/// Value of the first anti-forgery input that carries a `value`.
pub fn find_token_value(html: &Html) -> Option<String> {
	html.select(&TOKEN_INPUT).find_map(|input| input.value().attr("value")).map(str::to_string)
}

/// User code from the application root anchor's `href`.
///
/// The anchor points at `/{tenant}/{userCode}/`. Anything else, including
/// redirected or deeper paths, yields `None` rather than a wrong code.
pub fn find_user_code(html: &Html) -> Option<String> {
	let href = html.select(&APPLICATION_ROOT).next()?.value().attr("href")?;
	user_code_from_href(href).map(str::to_string)
}

fn user_code_from_href(href: &str) -> Option<&str> {
	let path = href.strip_prefix('/')?;
	let path = path.strip_suffix('/').unwrap_or(path);

	let mut segments = path.split('/');
	let (Some(tenant), Some(user_code), None) = (segments.next(), segments.next(), segments.next()) else {
		return None;
	};

	(!tenant.is_empty() && !user_code.is_empty()).then_some(user_code)
}
