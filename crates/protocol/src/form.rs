//! Ordered `application/x-www-form-urlencoded` bodies.

use url::form_urlencoded;

/// Replacement text for masked form values.
pub const REDACTED: &str = "********";

/// An ordered list of form fields.
///
/// Field order is preserved on encoding so bodies look like the ones a
/// browser submits. Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
	fields: Vec<(String, String)>,
}

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces `key`, builder style.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(key, value);
		self
	}

	/// Adds or replaces `key`.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		match self.fields.iter_mut().find(|(k, _)| *k == key) {
			Some(field) => field.1 = value,
			None => self.fields.push((key, value)),
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	pub fn fields(&self) -> &[(String, String)] {
		&self.fields
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Encodes the fields as a url-encoded body.
	pub fn encode(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (key, value) in &self.fields {
			serializer.append_pair(key, value);
		}
		serializer.finish()
	}

	/// Parses a url-encoded body. Later duplicates replace earlier ones.
	pub fn decode(body: &str) -> Self {
		let mut form = Form::new();
		for (key, value) in form_urlencoded::parse(body.as_bytes()) {
			form.set(key, value);
		}
		form
	}

	/// Copy of this form with the values of `keys` replaced by [`REDACTED`].
	#[must_use]
	pub fn redacted(&self, keys: &[&str]) -> Self {
		let fields = self
			.fields
			.iter()
			.map(|(k, v)| {
				if keys.contains(&k.as_str()) {
					(k.clone(), REDACTED.to_string())
				} else {
					(k.clone(), v.clone())
				}
			})
			.collect();
		Self { fields }
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut form = Form::new();
		for (k, v) in iter {
			form.set(k, v);
		}
		form
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn encode_preserves_insertion_order() {
		let form = Form::new().with("OBCiD", "1234").with("isBugyoCloud", "false");
		assert_eq!(form.encode(), "OBCiD=1234&isBugyoCloud=false");
	}

	#[test]
	fn set_replaces_in_place() {
		let form = Form::new().with("a", "1").with("b", "2").with("a", "3");
		assert_eq!(form.encode(), "a=3&b=2");
	}

	#[test]
	fn encode_escapes_reserved_characters() {
		let form = Form::new().with("Password", "p&ss w=rd");
		assert_eq!(form.encode(), "Password=p%26ss+w%3Drd");
		assert_eq!(Form::decode(&form.encode()).get("Password"), Some("p&ss w=rd"));
	}

	#[test]
	fn empty_values_are_kept() {
		let form = Form::new().with("LaborSystemCode", "").with("LaborSystemName", "");
		assert_eq!(form.encode(), "LaborSystemCode=&LaborSystemName=");
	}

	#[test]
	fn redacted_masks_only_named_fields() {
		let form = Form::new().with("OBCiD", "1234").with("Password", "secret");
		let masked = form.redacted(&["Password"]);
		assert_eq!(masked.get("OBCiD"), Some("1234"));
		assert_eq!(masked.get("Password"), Some(REDACTED));
		assert_eq!(form.get("Password"), Some("secret"));
	}
}
