//! Donation domain models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::errors::{Result, ValidationError};
use crate::institutions::Institution;
use crate::utils::validation::{required_text, validate_phone, validate_zip_code};

/// Domain model representing a pickup request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    /// Number of bags to pick up
    pub quantity: i32,
    pub institution: Institution,
    pub categories: Vec<Category>,
    pub address: String,
    pub phone_number: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: NaiveTime,
    pub pick_up_comment: Option<String>,
    pub user_id: String,
    pub is_taken: bool,
    pub created_at: NaiveDateTime,
}

/// Pickup request as submitted by the donation form.
///
/// Date and time arrive as text so that malformed values are reported
/// against their field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationForm {
    pub quantity: i32,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub institution_id: String,
    pub address: String,
    pub phone_number: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: String,
    pub pick_up_time: String,
    #[serde(default)]
    pub pick_up_comment: Option<String>,
}

/// Validated input for inserting a donation and its category links.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub quantity: i32,
    pub institution_id: String,
    pub category_ids: Vec<String>,
    pub address: String,
    pub phone_number: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: NaiveTime,
    pub pick_up_comment: Option<String>,
    pub user_id: String,
}

fn parse_pick_up_time(raw: &str) -> std::result::Result<NaiveTime, ValidationError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ValidationError::field("pickUpTime", "expected HH:MM"))
}

impl DonationForm {
    /// Checks every field and produces the insert model for `user_id`.
    ///
    /// `today` is the earliest acceptable pick-up date. Existence of the
    /// institution and categories is checked by the service.
    pub fn into_new_donation(self, user_id: &str, today: NaiveDate) -> Result<NewDonation> {
        if self.quantity < 1 {
            return Err(ValidationError::field("quantity", "must be at least 1").into());
        }

        let mut category_ids: Vec<String> = Vec::with_capacity(self.category_ids.len());
        for raw in &self.category_ids {
            let id = raw.trim();
            if !id.is_empty() && !category_ids.iter().any(|c| c == id) {
                category_ids.push(id.to_string());
            }
        }
        if category_ids.is_empty() {
            return Err(ValidationError::field("categoryIds", "select at least one category").into());
        }

        let institution_id = self.institution_id.trim().to_string();
        if institution_id.is_empty() {
            return Err(ValidationError::MissingField("institutionId".to_string()).into());
        }

        let address = required_text("address", &self.address, 255)?;
        let city = required_text("city", &self.city, 100)?;
        let phone_number = validate_phone("phoneNumber", &self.phone_number)?;
        let zip_code = validate_zip_code("zipCode", &self.zip_code)?;

        let pick_up_date = NaiveDate::parse_from_str(self.pick_up_date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::field("pickUpDate", "expected YYYY-MM-DD"))?;
        if pick_up_date < today {
            return Err(ValidationError::field("pickUpDate", "cannot be in the past").into());
        }
        let pick_up_time = parse_pick_up_time(&self.pick_up_time)?;

        let pick_up_comment = self
            .pick_up_comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(NewDonation {
            quantity: self.quantity,
            institution_id,
            category_ids,
            address,
            phone_number,
            city,
            zip_code,
            pick_up_date,
            pick_up_time,
            pick_up_comment,
            user_id: user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn form() -> DonationForm {
        DonationForm {
            quantity: 3,
            category_ids: vec!["cat-1".into(), " cat-2 ".into(), "cat-1".into(), "".into()],
            institution_id: "inst-1".into(),
            address: "ul. Długa 5".into(),
            phone_number: "600 100 200".into(),
            city: "Kraków".into(),
            zip_code: "31-042".into(),
            pick_up_date: "2024-05-12".into(),
            pick_up_time: "14:30".into(),
            pick_up_comment: Some("  ".into()),
        }
    }

    fn field_of(err: Error) -> Option<String> {
        match err {
            Error::Validation(v) => v.field_name().map(str::to_string),
            _ => None,
        }
    }

    #[test]
    fn test_valid_form() {
        let new = form().into_new_donation("user-1", today()).unwrap();
        assert_eq!(new.category_ids, vec!["cat-1", "cat-2"]);
        assert_eq!(new.pick_up_time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(new.pick_up_comment, None);
        assert_eq!(new.user_id, "user-1");
    }

    #[test]
    fn test_time_with_seconds() {
        let mut f = form();
        f.pick_up_time = "09:15:00".into();
        let new = f.into_new_donation("user-1", today()).unwrap();
        assert_eq!(new.pick_up_time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut f = form();
        f.quantity = 0;
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("quantity")
        );

        let mut f = form();
        f.quantity = 1001;
        assert_eq!(f.into_new_donation("u", today()).unwrap().quantity, 1001);
    }

    #[test]
    fn test_requires_a_category() {
        let mut f = form();
        f.category_ids = vec!["  ".into()];
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("categoryIds")
        );
    }

    #[test]
    fn test_pick_up_date_rules() {
        let mut f = form();
        f.pick_up_date = "2024-05-09".into();
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("pickUpDate")
        );

        let mut f = form();
        f.pick_up_date = "10/05/2024".into();
        assert!(f.into_new_donation("u", today()).is_err());

        let mut f = form();
        f.pick_up_date = "2024-05-10".into();
        assert!(f.into_new_donation("u", today()).is_ok());
    }

    #[test]
    fn test_bad_time() {
        let mut f = form();
        f.pick_up_time = "half past two".into();
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("pickUpTime")
        );
    }

    #[test]
    fn test_bad_phone_and_zip() {
        let mut f = form();
        f.phone_number = "123".into();
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("phoneNumber")
        );
        let mut f = form();
        f.zip_code = "?".into();
        assert_eq!(
            field_of(f.into_new_donation("u", today()).unwrap_err()).as_deref(),
            Some("zipCode")
        );
    }
}
