use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::enums::Sex;

/// Physical address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn full_address(&self) -> String {
        format!(
            "{}\n{}, {} {}",
            self.line1, self.city, self.state, self.postal_code
        )
    }
}

/// Contact person (parent, guardian, emergency contact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Patient demographics. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub given_name: String,
    pub family_name: String,
    pub date_of_birth: NaiveDate,
    pub sex_at_birth: Sex,
    pub race: String,
    pub ethnicity: String,
    pub preferred_language: String,
    pub address: Address,
    pub phone: String,
    pub emergency_contact: Contact,
    /// Present for minors (under 18).
    pub legal_guardian: Option<Contact>,
}

impl Demographics {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Completed years of age on the given date.
    pub fn age_years_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.date_of_birth.year();
        if (date.month(), date.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Completed months of age on the given date.
    pub fn age_months_on(&self, date: NaiveDate) -> u32 {
        let mut months =
            (date.year() - self.date_of_birth.year()) * 12 + date.month() as i32
                - self.date_of_birth.month() as i32;
        if date.day() < self.date_of_birth.day() {
            months -= 1;
        }
        months.max(0) as u32
    }
}

/// Human-readable age phrase: "newborn", "9 month old", "1 year 3 month old",
/// "6 year old".
pub fn age_description(age_months: u32) -> String {
    if age_months == 0 {
        "newborn".to_string()
    } else if age_months < 12 {
        format!("{age_months} month old")
    } else if age_months < 24 {
        let years = age_months / 12;
        let months = age_months % 12;
        if months == 0 {
            format!("{years} year old")
        } else {
            format!("{years} year {months} month old")
        }
    } else {
        format!("{} year old", age_months / 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_demographics(dob: NaiveDate) -> Demographics {
        Demographics {
            given_name: "Olivia".into(),
            family_name: "Nguyen".into(),
            date_of_birth: dob,
            sex_at_birth: Sex::Female,
            race: "Asian".into(),
            ethnicity: "Not Hispanic or Latino".into(),
            preferred_language: "English".into(),
            address: Address {
                line1: "512 Cedar Lane".into(),
                city: "Springfield".into(),
                state: "MN".into(),
                postal_code: "55001".into(),
                country: "US".into(),
            },
            phone: "(555) 212-8890".into(),
            emergency_contact: Contact {
                name: "Mai Nguyen".into(),
                relationship: "Mother".into(),
                phone: "(555) 212-8891".into(),
            },
            legal_guardian: None,
        }
    }

    #[test]
    fn age_in_months_counts_completed_months() {
        let demo = make_demographics(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let on = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(demo.age_months_on(on), 23);
        let on = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(demo.age_months_on(on), 24);
        assert_eq!(demo.age_years_on(on), 2);
    }

    #[test]
    fn age_never_negative() {
        let demo = make_demographics(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let before_birth = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(demo.age_months_on(before_birth), 0);
        assert_eq!(demo.age_years_on(before_birth), 0);
    }

    #[test]
    fn age_description_phrasing() {
        assert_eq!(age_description(0), "newborn");
        assert_eq!(age_description(9), "9 month old");
        assert_eq!(age_description(12), "1 year old");
        assert_eq!(age_description(15), "1 year 3 month old");
        assert_eq!(age_description(72), "6 year old");
    }

    #[test]
    fn full_address_formats_two_lines() {
        let demo = make_demographics(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let addr = demo.address.full_address();
        assert!(addr.contains("512 Cedar Lane"));
        assert!(addr.contains("Springfield, MN 55001"));
    }
}
