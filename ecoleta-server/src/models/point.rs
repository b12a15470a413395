//! Collection point creation payload

use super::{ItemIds, ValidationError};

/// Raw text fields of a point registration form, as received.
#[derive(Debug, Clone, Default)]
pub struct NewPointFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
    pub items: Option<String>,
}

impl NewPointFields {
    /// Store a named form field. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "whatsapp" => &mut self.whatsapp,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            "city" => &mut self.city,
            "uf" => &mut self.uf,
            "items" => &mut self.items,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Point ready to be inserted together with its item associations.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoint {
    /// Stored filename of the uploaded image
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub items: ItemIds,
}

impl NewPoint {
    /// Build a point from form fields and the stored image name.
    ///
    /// Only presence and numeric coordinates are checked. Email format,
    /// coordinate ranges and item existence are not; a missing or
    /// malformed `items` field means no associations.
    pub fn new(fields: NewPointFields, image: String) -> Result<Self, ValidationError> {
        let latitude = coordinate("latitude", fields.latitude)?;
        let longitude = coordinate("longitude", fields.longitude)?;

        Ok(Self {
            image: required("image", Some(image))?,
            name: required("name", fields.name)?,
            email: required("email", fields.email)?,
            whatsapp: required("whatsapp", fields.whatsapp)?,
            latitude,
            longitude,
            city: required("city", fields.city)?,
            uf: required("uf", fields.uf)?,
            items: ItemIds::from_optional(fields.items.as_deref()),
        })
    }

    /// Check the text fields without an image, so a bad form can be
    /// rejected before the upload is written to disk.
    pub fn check(fields: &NewPointFields) -> Result<(), ValidationError> {
        Self::new(fields.clone(), "pending".to_owned()).map(|_| ())
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

fn coordinate(field: &'static str, value: Option<String>) -> Result<f64, ValidationError> {
    let raw = required(field, value)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidNumber { field, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewPointFields {
        let mut fields = NewPointFields::default();
        for (name, value) in [
            ("name", "Mercado Verde"),
            ("email", "contato@verde.com"),
            ("whatsapp", "5511999990000"),
            ("latitude", "-23.5505"),
            ("longitude", "-46.6333"),
            ("city", "São Paulo"),
            ("uf", "SP"),
            ("items", "1,2,2"),
        ] {
            assert!(fields.set(name, value.to_owned()));
        }
        fields
    }

    #[test]
    fn builds_point() {
        let point = NewPoint::new(form(), "abc-photo.png".into()).unwrap();
        assert_eq!(point.name, "Mercado Verde");
        assert_eq!(point.latitude, -23.5505);
        assert_eq!(point.items.as_slice(), &[1, 2]);
        assert_eq!(point.image, "abc-photo.png");
    }

    #[test]
    fn missing_items_means_no_associations() {
        let mut fields = form();
        fields.items = None;
        let point = NewPoint::new(fields, "x.png".into()).unwrap();
        assert!(point.items.is_empty());
    }

    #[test]
    fn rejects_missing_field() {
        let mut fields = form();
        fields.email = None;
        let err = NewPoint::new(fields, "x.png".into()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "email" });
    }

    #[test]
    fn rejects_blank_field() {
        let mut fields = form();
        fields.city = Some("   ".into());
        let err = NewPoint::check(&fields).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "city" });
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let mut fields = form();
        fields.longitude = Some("west".into());
        let err = NewPoint::check(&fields).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "longitude", .. }));
    }

    #[test]
    fn out_of_range_coordinates_are_accepted() {
        let mut fields = form();
        fields.latitude = Some("123.0".into());
        assert!(NewPoint::check(&fields).is_ok());
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut fields = NewPointFields::default();
        assert!(!fields.set("color", "green".into()));
    }
}
