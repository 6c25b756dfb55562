//! Lookup input and output types.

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result};

/// Address components used to build a free-text lookup query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressQuery {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressQuery {
    /// Joins the non-empty components with `", "`.
    ///
    /// Order: street, number, neighborhood, city, state, postal code, country.
    pub fn to_query_string(&self) -> String {
        self.components()
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns whether every component is non-empty.
    pub fn is_complete(&self) -> bool {
        self.components()
            .into_iter()
            .all(|part| !part.trim().is_empty())
    }

    fn components(&self) -> [&str; 7] {
        [
            &self.street,
            &self.number,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
    }
}

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire form of [`Coordinates`].
#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = Error;

    fn try_from(raw: RawCoordinates) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting values outside
    /// `[-90, 90]` x `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::new(ErrorKind::CoordinateOutOfRange)
                .with_message(format!("latitude {latitude} is outside [-90, 90]")));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::new(ErrorKind::CoordinateOutOfRange)
                .with_message(format!("longitude {longitude} is outside [-180, 180]")));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paulista() -> AddressQuery {
        AddressQuery {
            street: "Avenida Paulista".into(),
            number: "1578".into(),
            neighborhood: "Bela Vista".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            postal_code: "01310-200".into(),
            country: "Brasil".into(),
        }
    }

    #[test]
    fn query_string_keeps_component_order() {
        assert_eq!(
            paulista().to_query_string(),
            "Avenida Paulista, 1578, Bela Vista, São Paulo, SP, 01310-200, Brasil"
        );
    }

    #[test]
    fn query_string_skips_empty_components() {
        let query = AddressQuery {
            neighborhood: String::new(),
            postal_code: "  ".into(),
            ..paulista()
        };

        assert_eq!(
            query.to_query_string(),
            "Avenida Paulista, 1578, São Paulo, SP, Brasil"
        );
        assert!(!query.is_complete());
        assert!(paulista().is_complete());
    }

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());

        let coordinates = Coordinates::new(-23.55, -46.63).unwrap();
        assert_eq!(coordinates.latitude(), -23.55);
        assert_eq!(coordinates.longitude(), -46.63);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let error = Coordinates::new(90.5, 0.0).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CoordinateOutOfRange);

        let error = Coordinates::new(0.0, -180.01).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CoordinateOutOfRange);

        let error = Coordinates::new(f64::NAN, 0.0).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CoordinateOutOfRange);
    }

    #[test]
    fn deserialization_checks_range() {
        let coordinates: Coordinates =
            serde_json::from_str(r#"{"latitude":-23.55,"longitude":-46.63}"#).unwrap();
        assert_eq!(coordinates, Coordinates::new(-23.55, -46.63).unwrap());

        let error = serde_json::from_str::<Coordinates>(r#"{"latitude":91.0,"longitude":0.0}"#)
            .unwrap_err();
        assert!(error.to_string().contains("latitude 91 is outside"));

        assert!(
            serde_json::from_str::<Coordinates>(r#"{"latitude":0.0,"longitude":-200.5}"#).is_err()
        );
    }
}
