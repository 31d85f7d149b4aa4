//! Database models for donations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use charity_core::categories::Category;
use charity_core::donations::{Donation, NewDonation};
use charity_core::institutions::Institution;

/// Database model for donations
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationDB {
    pub id: String,
    pub quantity: i32,
    pub institution_id: String,
    pub user_id: String,
    pub address: String,
    pub phone_number: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: NaiveTime,
    pub pick_up_comment: Option<String>,
    pub is_taken: bool,
    pub created_at: NaiveDateTime,
}

/// Link row between a donation and one of its categories
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::donation_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationCategoryDB {
    pub donation_id: String,
    pub category_id: String,
}

impl DonationDB {
    pub fn new_row(new_donation: &NewDonation, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            quantity: new_donation.quantity,
            institution_id: new_donation.institution_id.clone(),
            user_id: new_donation.user_id.clone(),
            address: new_donation.address.clone(),
            phone_number: new_donation.phone_number.clone(),
            city: new_donation.city.clone(),
            zip_code: new_donation.zip_code.clone(),
            pick_up_date: new_donation.pick_up_date,
            pick_up_time: new_donation.pick_up_time,
            pick_up_comment: new_donation.pick_up_comment.clone(),
            is_taken: false,
            created_at: now,
        }
    }

    pub fn into_domain(self, institution: Institution, categories: Vec<Category>) -> Donation {
        Donation {
            id: self.id,
            quantity: self.quantity,
            institution,
            categories,
            address: self.address,
            phone_number: self.phone_number,
            city: self.city,
            zip_code: self.zip_code,
            pick_up_date: self.pick_up_date,
            pick_up_time: self.pick_up_time,
            pick_up_comment: self.pick_up_comment,
            user_id: self.user_id,
            is_taken: self.is_taken,
            created_at: self.created_at,
        }
    }
}
