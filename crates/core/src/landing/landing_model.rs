use serde::Serialize;

use crate::institutions::Institution;
use crate::utils::Page;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    /// Bags pledged across all donations
    pub donation_quantity: i64,
    pub institution_count: i64,
    pub foundations: Page<Institution>,
    pub organizations: Page<Institution>,
    pub local_collections: Page<Institution>,
}
