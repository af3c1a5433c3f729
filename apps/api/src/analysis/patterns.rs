use regex::Regex;

const EMAIL: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}";
const PHONE: &str = r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";

/// Compiled contact patterns. The search variants find a contact anywhere in
/// free text; the exact variants validate an already extracted value.
#[derive(Debug, Clone)]
pub struct ContactPatterns {
    email: Regex,
    phone: Regex,
    email_exact: Regex,
    phone_exact: Regex,
}

impl ContactPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(&format!(r"\b{EMAIL}\b"))?,
            phone: Regex::new(&format!(r"\b{PHONE}\b"))?,
            email_exact: Regex::new(&format!("^{EMAIL}$"))?,
            phone_exact: Regex::new(&format!("^{PHONE}$"))?,
        })
    }

    pub fn find_email<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.email.find(text).map(|m| m.as_str())
    }

    pub fn find_phone<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.phone.find(text).map(|m| m.as_str())
    }

    /// True when `line` contains an email address or a phone number.
    pub fn mentions_contact(&self, line: &str) -> bool {
        self.email.is_match(line) || self.phone.is_match(line)
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_exact.is_match(email)
    }

    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone_exact.is_match(phone)
    }
}
