//! Word pools for human-looking strings: words, names and US addresses.
//!
//! Every pool is ASCII-only and non-empty, so picks never fail and generated
//! emails stay syntactically valid.

use super::numeric::digits;
use rand::Rng;

const WORDS: &[&str] = &[
    "amber", "anchor", "atlas", "autumn", "beacon", "birch", "breeze", "canyon", "cedar",
    "cipher", "cobalt", "comet", "coral", "crystal", "dawn", "delta", "drift", "echo", "ember",
    "falcon", "fern", "fjord", "flint", "forest", "garnet", "glacier", "harbor", "hazel",
    "horizon", "indigo", "island", "jade", "juniper", "lagoon", "lantern", "maple", "meadow",
    "meteor", "mist", "nebula", "north", "oasis", "onyx", "orbit", "pebble", "pine", "prairie",
    "quartz", "raven", "reef", "ridge", "river", "saffron", "sierra", "silver", "spruce",
    "summit", "thistle", "thunder", "tundra", "valley", "willow", "zephyr",
];

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adrian", "Alice", "Amelia", "Andrew", "Aria", "Benjamin", "Bianca",
    "Caleb", "Camila", "Charles", "Chloe", "Daniel", "Delia", "Elena", "Elijah", "Emma", "Ethan",
    "Felix", "Fiona", "Gabriel", "Grace", "Hannah", "Henry", "Isaac", "Isla", "Jack", "Julia",
    "Kevin", "Laura", "Leo", "Lucas", "Maya", "Mia", "Nathan", "Nora", "Oliver", "Olivia",
    "Owen", "Paula", "Quinn", "Rachel", "Ryan", "Sofia", "Samuel", "Tessa", "Thomas", "Uma",
    "Victor", "Wendy", "William", "Xavier", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Baker", "Bennett", "Brooks", "Campbell", "Carter", "Clark", "Collins",
    "Cooper", "Davis", "Edwards", "Evans", "Fisher", "Foster", "Garcia", "Gray", "Hall",
    "Harris", "Hughes", "Jackson", "Jenkins", "Johnson", "Kelly", "King", "Lewis", "Lopez",
    "Martin", "Miller", "Mitchell", "Moore", "Morgan", "Murphy", "Nelson", "Parker", "Perry",
    "Phillips", "Powell", "Reed", "Roberts", "Rogers", "Russell", "Sanders", "Scott", "Smith",
    "Stewart", "Taylor", "Thompson", "Turner", "Walker", "Ward", "Watson", "White", "Wilson",
    "Wood", "Young",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "mail.test",
    "inbox.test",
];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park", "Sunset",
    "Highland", "Church", "Mill", "River", "Spring", "Ridge", "Valley", "Meadow", "Forest",
    "Lincoln",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Boulevard", "Way", "Place", "Terrace",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Clinton", "Fairview", "Salem",
    "Madison", "Georgetown", "Arlington", "Ashland", "Burlington", "Dover", "Hudson", "Kingston",
    "Milton", "Newport", "Oxford", "Jackson", "Lexington",
];

const STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas",
    "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey",
    "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon",
    "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Texas",
    "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

/// A single lowercase word.
pub fn word<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, WORDS)
}

/// Two to four lowercase words separated by single spaces.
pub fn phrase<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(2..=4);
    (0..count).map(|_| word(rng)).collect::<Vec<_>>().join(" ")
}

pub fn first_name<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, FIRST_NAMES)
}

pub fn last_name<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, LAST_NAMES)
}

/// Capitalized "First Last".
pub fn full_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", first_name(rng), last_name(rng))
}

/// Lowercase `first.last<NN>@domain` address.
pub fn email<R: Rng>(rng: &mut R) -> String {
    let first = first_name(rng).to_ascii_lowercase();
    let last = last_name(rng).to_ascii_lowercase();
    let suffix = digits(rng, 2);
    format!("{first}.{last}{suffix}@{}", pick(rng, EMAIL_DOMAINS))
}

/// House number and street, e.g. `"742 Maple Avenue"`.
pub fn street_address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        rng.random_range(1..10_000u32),
        pick(rng, STREET_NAMES),
        pick(rng, STREET_SUFFIXES)
    )
}

pub fn city<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, CITIES)
}

pub fn state<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, STATES)
}

/// Five-digit US postal code.
pub fn zip_code<R: Rng>(rng: &mut R) -> String {
    digits(rng, 5)
}
