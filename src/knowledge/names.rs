//! Name, place, and contact pools for demographics synthesis.

pub static MALE_FIRST_NAMES: &[&str] = &[
    "James", "William", "Oliver", "Benjamin", "Elijah", "Lucas", "Mason", "Ethan",
    "Alexander", "Henry", "Sebastian", "Jack", "Aiden", "Owen", "Samuel", "Ryan",
    "Nathan", "Caleb", "Dylan", "Luke",
];

pub static FEMALE_FIRST_NAMES: &[&str] = &[
    "Olivia", "Emma", "Charlotte", "Amelia", "Sophia", "Isabella", "Mia", "Evelyn",
    "Harper", "Luna", "Camila", "Sofia", "Scarlett", "Elizabeth", "Eleanor", "Emily",
    "Chloe", "Mila", "Violet", "Penelope",
];

pub static FAMILY_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Anderson", "Taylor", "Thomas", "Moore", "Jackson",
    "Martin", "Lee", "Thompson", "White", "Harris",
];

pub static PROVIDER_FIRST_NAMES: &[&str] = &[
    "Sarah", "Michael", "Jennifer", "David", "Emily", "Robert", "Jessica", "William",
    "Amanda", "James",
];

pub static PROVIDER_FAMILY_NAMES: &[&str] = &[
    "Chen", "Patel", "Kim", "Singh", "Johnson", "Williams", "Brown", "Garcia",
    "Miller", "Davis",
];

pub static STREET_NAMES: &[&str] = &["Oak", "Maple", "Cedar", "Pine", "Main", "First", "Park"];

pub static STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Lane", "Drive", "Court"];

pub static CITIES: &[&str] = &["Springfield", "Riverside", "Lakewood", "Fairview", "Madison"];

pub static STATES: &[&str] = &["MN", "WI", "CA", "TX", "NY", "FL", "IL"];

pub static RACES: &[&str] = &[
    "White",
    "Black or African American",
    "Asian",
    "Two or more races",
];

pub static ETHNICITIES: &[&str] = &["Not Hispanic or Latino", "Hispanic or Latino"];
