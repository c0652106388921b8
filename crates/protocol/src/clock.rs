use serde::{Deserialize, Serialize};

/// Kind of time-clock event submitted to the punch endpoint.
///
/// Each variant serializes to the literal string the portal expects in the
/// `ClockType` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockType {
	/// Start of the working day.
	ClockIn,
	/// End of the working day.
	ClockOut,
	/// Stepping out during working hours.
	GoOut,
	/// Coming back after [`ClockType::GoOut`].
	Returned,
}

impl ClockType {
	/// All variants in the order the portal lists them.
	pub const ALL: [ClockType; 4] = [ClockType::ClockIn, ClockType::ClockOut, ClockType::GoOut, ClockType::Returned];

	/// Literal wire value for the `ClockType` form field.
	pub fn as_str(self) -> &'static str {
		match self {
			ClockType::ClockIn => "ClockIn",
			ClockType::ClockOut => "ClockOut",
			ClockType::GoOut => "GoOut",
			ClockType::Returned => "Returned",
		}
	}
}

impl std::fmt::Display for ClockType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for ClockType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ClockType::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| format!("unknown clock type: {s}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wire_values_match_variant_names() {
		assert_eq!(ClockType::ClockIn.as_str(), "ClockIn");
		assert_eq!(ClockType::ClockOut.as_str(), "ClockOut");
		assert_eq!(ClockType::GoOut.as_str(), "GoOut");
		assert_eq!(ClockType::Returned.as_str(), "Returned");
	}

	#[test]
	fn serde_uses_wire_values() {
		for kind in ClockType::ALL {
			let json = serde_json::to_string(&kind).unwrap();
			assert_eq!(json, format!("\"{}\"", kind.as_str()));
		}
	}

	#[test]
	fn parses_only_exact_wire_values() {
		assert_eq!("GoOut".parse::<ClockType>(), Ok(ClockType::GoOut));
		assert!("goout".parse::<ClockType>().is_err());
		assert!("Return".parse::<ClockType>().is_err());
	}
}
