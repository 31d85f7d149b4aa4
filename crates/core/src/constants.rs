/// Institutions shown per page in each landing page group
pub const INSTITUTIONS_PER_PAGE: i64 = 4;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of first and last names
pub const MAX_NAME_LENGTH: usize = 150;

/// Subject prefix of mails sent through the contact form
pub const CONTACT_SUBJECT_PREFIX: &str = "Charity App mail from";
