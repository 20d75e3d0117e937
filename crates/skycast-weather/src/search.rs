//! City search input validation.

use skycast_core::WeatherError;

pub const MIN_CITY_CHARS: usize = 2;
pub const MAX_CITY_CHARS: usize = 50;

/// Trim and validate a city name typed by the user.
pub fn validate_city(input: &str) -> Result<String, WeatherError> {
    let city = input.trim();
    let chars = city.chars().count();

    if chars == 0 {
        return Err(WeatherError::InvalidQuery("City name is required".into()));
    }
    if chars < MIN_CITY_CHARS {
        return Err(WeatherError::InvalidQuery(format!(
            "City name must be at least {} characters",
            MIN_CITY_CHARS
        )));
    }
    if chars > MAX_CITY_CHARS {
        return Err(WeatherError::InvalidQuery(format!(
            "City name must be less than {} characters",
            MAX_CITY_CHARS
        )));
    }

    Ok(city.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: &str) -> String {
        validate_city(input).unwrap_err().user_message()
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(validate_city("  London \n").unwrap(), "London");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(message(""), "City name is required");
        assert_eq!(message("   "), "City name is required");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(message("X"), "City name must be at least 2 characters");
        assert!(validate_city("Ur").is_ok());
        assert!(validate_city(&"a".repeat(50)).is_ok());
        assert_eq!(message(&"a".repeat(51)), "City name must be less than 50 characters");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(validate_city("Łódź").is_ok());
        assert!(validate_city(&"é".repeat(30)).is_ok());
    }
}
