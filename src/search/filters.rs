/// Numeric range filters, addressed by name from input handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    MinBedrooms,
    MaxBedrooms,
    MinBathrooms,
    MaxBathrooms,
    MinSqft,
    MaxSqft,
}

impl Bound {
    pub const ALL: [Bound; 6] = [
        Bound::MinBedrooms,
        Bound::MaxBedrooms,
        Bound::MinBathrooms,
        Bound::MaxBathrooms,
        Bound::MinSqft,
        Bound::MaxSqft,
    ];

    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Bound::MinBedrooms => "minBedrooms",
            Bound::MaxBedrooms => "maxBedrooms",
            Bound::MinBathrooms => "minBathrooms",
            Bound::MaxBathrooms => "maxBathrooms",
            Bound::MinSqft => "minSqft",
            Bound::MaxSqft => "maxSqft",
        }
    }
}

/// What the user has typed into the search form.
///
/// Bounds are never checked against each other; `min > max` is allowed and
/// forwarded as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    city: String,
    state: String,
    zip: String,
    min_bedrooms: Option<f64>,
    max_bedrooms: Option<f64>,
    min_bathrooms: Option<f64>,
    max_bathrooms: Option<f64>,
    min_sqft: Option<f64>,
    max_sqft: Option<f64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.city = value.into();
    }

    /// State codes are always stored upper case.
    pub fn set_state(&mut self, value: impl AsRef<str>) {
        self.state = value.as_ref().to_uppercase();
    }

    pub fn set_zip(&mut self, value: impl Into<String>) {
        self.zip = value.into();
    }

    pub fn bound(&self, bound: Bound) -> Option<f64> {
        *self.bound_slot(bound)
    }

    /// Store a bound from raw form input. See [`parse_bound`].
    pub fn set_bound(&mut self, bound: Bound, raw: Option<&str>) {
        *self.bound_slot_mut(bound) = parse_bound(raw);
    }

    /// Store an already-numeric bound (or clear it).
    pub fn set_bound_value(&mut self, bound: Bound, value: Option<f64>) {
        *self.bound_slot_mut(bound) = value;
    }

    /// Either city and state, or zip, must be filled in.
    pub fn can_search(&self) -> bool {
        let has_city_state = !self.city.trim().is_empty() && !self.state.trim().is_empty();
        let has_zip = !self.zip.trim().is_empty();
        has_city_state || has_zip
    }

    fn bound_slot(&self, bound: Bound) -> &Option<f64> {
        match bound {
            Bound::MinBedrooms => &self.min_bedrooms,
            Bound::MaxBedrooms => &self.max_bedrooms,
            Bound::MinBathrooms => &self.min_bathrooms,
            Bound::MaxBathrooms => &self.max_bathrooms,
            Bound::MinSqft => &self.min_sqft,
            Bound::MaxSqft => &self.max_sqft,
        }
    }

    fn bound_slot_mut(&mut self, bound: Bound) -> &mut Option<f64> {
        match bound {
            Bound::MinBedrooms => &mut self.min_bedrooms,
            Bound::MaxBedrooms => &mut self.max_bedrooms,
            Bound::MinBathrooms => &mut self.min_bathrooms,
            Bound::MaxBathrooms => &mut self.max_bathrooms,
            Bound::MinSqft => &mut self.min_sqft,
            Bound::MaxSqft => &mut self.max_sqft,
        }
    }
}

/// Convert raw form input into a bound.
///
/// Missing or empty input means unbounded. Whitespace-only input counts as
/// zero. Anything else that does not parse becomes NaN and is passed along
/// rather than rejected. Parsing follows browser number-input conversion:
/// `0x`/`0o`/`0b` prefixes are accepted and `Infinity` is the only spelling
/// of infinity.
pub fn parse_bound(raw: Option<&str>) -> Option<f64> {
    match raw {
        None | Some("") => None,
        Some(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Some(0.0);
            }
            Some(to_number(text))
        }
    }
}

fn to_number(text: &str) -> f64 {
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
    }

    // f64::from_str also takes "inf", "infinity" and "nan" in any case.
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_location_cannot_search() {
        let mut filters = FilterCriteria::new();
        assert!(!filters.can_search());

        filters.set_city("   ");
        filters.set_state(" ");
        filters.set_zip("\t");
        assert!(!filters.can_search());
    }

    #[test]
    fn city_needs_state() {
        let mut filters = FilterCriteria::new();
        filters.set_city("Austin");
        assert!(!filters.can_search());

        filters.set_state("tx");
        assert!(filters.can_search());
    }

    #[test]
    fn zip_alone_is_enough() {
        let mut filters = FilterCriteria::new();
        filters.set_zip("78701");
        assert!(filters.can_search());

        filters.set_city("Austin");
        assert!(filters.can_search());
    }

    #[test]
    fn state_is_upper_cased() {
        let mut filters = FilterCriteria::new();
        filters.set_state("ca");
        assert_eq!(filters.state(), "CA");
    }

    #[test]
    fn empty_bound_is_absent_not_zero() {
        let mut filters = FilterCriteria::new();
        filters.set_bound(Bound::MinBedrooms, Some("3"));
        assert_eq!(filters.bound(Bound::MinBedrooms), Some(3.0));

        filters.set_bound(Bound::MinBedrooms, Some(""));
        assert_eq!(filters.bound(Bound::MinBedrooms), None);

        filters.set_bound(Bound::MinBedrooms, None);
        assert_eq!(filters.bound(Bound::MinBedrooms), None);
    }

    #[test]
    fn non_numeric_bound_becomes_nan() {
        assert!(parse_bound(Some("three")).unwrap().is_nan());
        assert_eq!(parse_bound(Some(" 2.5 ")), Some(2.5));
        assert_eq!(parse_bound(Some("  ")), Some(0.0));
    }

    #[test]
    fn prefixed_and_infinite_input_follow_form_conversion() {
        assert_eq!(parse_bound(Some("0x10")), Some(16.0));
        assert_eq!(parse_bound(Some("0o17")), Some(15.0));
        assert_eq!(parse_bound(Some("0B101")), Some(5.0));
        assert!(parse_bound(Some("0x")).unwrap().is_nan());
        assert!(parse_bound(Some("-0x10")).unwrap().is_nan());
        assert!(parse_bound(Some("0x1g")).unwrap().is_nan());

        assert_eq!(parse_bound(Some("Infinity")), Some(f64::INFINITY));
        assert_eq!(parse_bound(Some("-Infinity")), Some(f64::NEG_INFINITY));
        assert!(parse_bound(Some("inf")).unwrap().is_nan());
        assert!(parse_bound(Some("infinity")).unwrap().is_nan());
        assert!(parse_bound(Some("NaN")).unwrap().is_nan());

        assert_eq!(parse_bound(Some("1e3")), Some(1000.0));
        assert_eq!(parse_bound(Some(".5")), Some(0.5));
        assert_eq!(parse_bound(Some("+7")), Some(7.0));
    }

    #[test]
    fn inverted_bounds_are_kept() {
        let mut filters = FilterCriteria::new();
        filters.set_bound(Bound::MinSqft, Some("3000"));
        filters.set_bound(Bound::MaxSqft, Some("1000"));
        assert_eq!(filters.bound(Bound::MinSqft), Some(3000.0));
        assert_eq!(filters.bound(Bound::MaxSqft), Some(1000.0));
    }
}
