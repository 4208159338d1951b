//! Word banks for synthetic people, companies and lorem text.

pub const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Adrian", "Amara", "Benjamin", "Camila", "Carlos", "Chloe", "Daniel", "Diego",
    "Elena", "Ethan", "Fatima", "Gabriel", "Grace", "Hannah", "Hiro", "Isabel", "Jamal", "Jasmine",
    "Jonas", "Kai", "Laila", "Leo", "Lucia", "Marcus", "Maya", "Mohammed", "Nadia", "Noah",
    "Olivia", "Omar", "Priya", "Rafael", "Rosa", "Samuel", "Sofia", "Tariq", "Uma", "Victor",
    "Wen", "Yara", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Abbott", "Alvarez", "Baker", "Bennett", "Chen", "Clarke", "Dubois", "Evans", "Fischer",
    "Garcia", "Hansen", "Haddad", "Ibrahim", "Jensen", "Kim", "Kowalski", "Lopez", "Miller",
    "Nakamura", "Nguyen", "Okafor", "Olsen", "Patel", "Quinn", "Rossi", "Schmidt", "Singh",
    "Tanaka", "Turner", "Usman", "Vargas", "Walker", "Xu", "Yilmaz", "Zimmerman",
];

pub const COMPANIES: &[&str] = &[
    "Acme Corp", "Blue Harbor Labs", "Crescent Logistics", "Delta Health", "Evergreen Retail",
    "Foxglove Finance", "Granite Systems", "Helix Media", "Ironwood Energy", "Juniper Analytics",
];

pub const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

pub const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia", "deserunt",
    "mollit", "anim", "id", "est", "laborum",
];
