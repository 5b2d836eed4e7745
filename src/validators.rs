// Input format checks. The backend client does not call these itself;
// commands apply them to prompt input before making a request.

use std::sync::OnceLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const OTP_PATTERN: &str = r"^[0-9]{6}$";

pub const API_KEY_PREFIX: &str = "sk_outris_";
const API_KEY_MIN_LEN: usize = 21;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static OTP_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex pattern"))
}

fn otp_regex() -> &'static Regex {
    OTP_REGEX.get_or_init(|| Regex::new(OTP_PATTERN).expect("valid regex pattern"))
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Six ASCII digits.
pub fn validate_otp(otp: &str) -> bool {
    otp_regex().is_match(otp)
}

pub fn validate_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX) && key.len() >= API_KEY_MIN_LEN
}
