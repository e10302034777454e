//! Validation utilities for the Agri Advisory Platform

use rust_decimal::Decimal;

/// Validate a phone number is plausible E.164: leading '+', 8-15 digits.
pub fn validate_phone_e164(phone: &str) -> Result<(), &'static str> {
    let Some(digits) = phone.strip_prefix('+') else {
        return Err("Phone number must include a country code (E.164 format)");
    };
    if !(8..=15).contains(&digits.len()) {
        return Err("Phone number must have 8-15 digits");
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number may only contain digits after '+'");
    }
    Ok(())
}

/// Validate GPS coordinates are on the globe.
pub fn validate_coordinates(latitude: Decimal, longitude: Decimal) -> Result<(), &'static str> {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a crop name is usable as a lookup key.
pub fn validate_crop_name(crop: &str) -> Result<(), &'static str> {
    if crop.trim().is_empty() {
        return Err("Crop name cannot be empty");
    }
    if crop.len() > 64 {
        return Err("Crop name too long");
    }
    Ok(())
}

/// Check a risk score is a calibrated probability.
pub fn is_valid_risk_score(score: f64) -> bool {
    (0.0..=1.0).contains(&score) && score.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone_e164("+919876543210").is_ok());
        assert!(validate_phone_e164("+6612345678").is_ok());
    }

    #[test]
    fn test_validate_phone_missing_plus() {
        assert!(validate_phone_e164("919876543210").is_err());
    }

    #[test]
    fn test_validate_phone_bad_characters() {
        assert!(validate_phone_e164("+91-98765-43210").is_err());
        assert!(validate_phone_e164("+91 9876543210").is_err());
    }

    #[test]
    fn test_validate_phone_length() {
        assert!(validate_phone_e164("+1234567").is_err());
        assert!(validate_phone_e164("+1234567890123456").is_err());
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(Decimal::new(19076, 3), Decimal::new(72877, 3)).is_ok());
        assert!(validate_coordinates(Decimal::from(-90), Decimal::from(180)).is_ok());
    }

    #[test]
    fn test_validate_coordinates_out_of_range() {
        assert!(validate_coordinates(Decimal::from(91), Decimal::ZERO).is_err());
        assert!(validate_coordinates(Decimal::ZERO, Decimal::from(-181)).is_err());
    }

    #[test]
    fn test_validate_crop_name() {
        assert!(validate_crop_name("rice").is_ok());
        assert!(validate_crop_name("  ").is_err());
        assert!(validate_crop_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_risk_score_range() {
        assert!(is_valid_risk_score(0.0));
        assert!(is_valid_risk_score(1.0));
        assert!(is_valid_risk_score(0.5));
        assert!(!is_valid_risk_score(-0.01));
        assert!(!is_valid_risk_score(1.01));
        assert!(!is_valid_risk_score(f64::NAN));
    }
}
