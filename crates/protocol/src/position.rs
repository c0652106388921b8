use serde::{Deserialize, Serialize};

/// Geolocation reported with a punch.
///
/// The portal may geofence punches, so callers should supply the location
/// they actually punch from. [`Position::default`] is the placeholder the
/// portal's reference client sends (Tokyo Station) and is not meant to be
/// relied upon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub latitude: f64,
	pub longitude: f64,
	#[serde(default)]
	pub accuracy: f64,
}

impl Position {
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self {
			latitude,
			longitude,
			accuracy: 0.0,
		}
	}

	#[must_use]
	pub fn with_accuracy(mut self, accuracy: f64) -> Self {
		self.accuracy = accuracy;
		self
	}
}

impl Default for Position {
	fn default() -> Self {
		Self::new(35.6812, 139.7671)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accuracy_defaults_to_zero_when_absent() {
		let pos: Position = serde_json::from_str(r#"{"latitude": 34.7025, "longitude": 135.4959}"#).unwrap();
		assert_eq!(pos, Position::new(34.7025, 135.4959));
		assert_eq!(pos.accuracy, 0.0);
	}
}
