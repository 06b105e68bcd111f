use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::TravelRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("destination must be at most {max} characters")]
    DestinationTooLong { max: usize },
    #[error("trip length must be between 1 and {max} days, got {days}")]
    DaysOutOfRange { days: u32, max: u32 },
    #[error("party size must be at least 1")]
    EmptyParty,
    #[error("at most {max} style tags are accepted, got {count}")]
    TooManyStyles { count: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_days: u32,
    pub max_destination_len: usize,
    pub max_styles: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_days: 30,
            max_destination_len: 80,
            max_styles: 12,
        }
    }
}

/// Checks a form submission before it reaches the assembler. The assembler
/// itself accepts anything.
pub fn validate_request(request: &TravelRequest, limits: &RequestLimits) -> Result<(), RequestError> {
    let destination = request.destination.trim();
    if destination.is_empty() {
        return Err(RequestError::EmptyDestination);
    }
    if destination.graphemes(true).count() > limits.max_destination_len {
        return Err(RequestError::DestinationTooLong {
            max: limits.max_destination_len,
        });
    }

    if request.days == 0 || request.days > limits.max_days {
        return Err(RequestError::DaysOutOfRange {
            days: request.days,
            max: limits.max_days,
        });
    }

    if request.party_size == 0 {
        return Err(RequestError::EmptyParty);
    }

    if request.styles.len() > limits.max_styles {
        return Err(RequestError::TooManyStyles {
            count: request.styles.len(),
            max: limits.max_styles,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;

    fn request() -> TravelRequest {
        TravelRequest {
            destination: "서울".to_string(),
            party_size: 2,
            gender: String::new(),
            age_bracket: String::new(),
            days: 3,
            budget: "100만원 미만".to_string(),
            styles: Vec::new(),
            locale: Locale::Ko,
        }
    }

    #[test]
    fn accepts_regular_submission() {
        assert_eq!(validate_request(&request(), &RequestLimits::default()), Ok(()));
    }

    #[test]
    fn rejects_blank_destination() {
        let mut req = request();
        req.destination = "   ".to_string();
        assert_eq!(
            validate_request(&req, &RequestLimits::default()),
            Err(RequestError::EmptyDestination)
        );
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        let limits = RequestLimits {
            max_destination_len: 4,
            ..RequestLimits::default()
        };
        let mut req = request();
        req.destination = "제주도청".to_string();
        assert_eq!(validate_request(&req, &limits), Ok(()));

        req.destination = "제주도청사".to_string();
        assert_eq!(
            validate_request(&req, &limits),
            Err(RequestError::DestinationTooLong { max: 4 })
        );
    }

    #[test]
    fn rejects_days_outside_range() {
        let mut req = request();
        req.days = 0;
        assert!(matches!(
            validate_request(&req, &RequestLimits::default()),
            Err(RequestError::DaysOutOfRange { days: 0, max: 30 })
        ));

        req.days = 31;
        assert!(validate_request(&req, &RequestLimits::default()).is_err());
    }

    #[test]
    fn rejects_empty_party() {
        let mut req = request();
        req.party_size = 0;
        assert_eq!(
            validate_request(&req, &RequestLimits::default()),
            Err(RequestError::EmptyParty)
        );
    }
}
