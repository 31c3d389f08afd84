//! Curated titles behind the home view and the similar-title fallback

pub struct Bucket {
    pub name: &'static str,
    pub titles: &'static [&'static str],
}

pub const BUCKETS: &[Bucket] = &[
    Bucket {
        name: "Fake Dating",
        titles: &["My Demon", "No Gain No Love", "When the Phone Rings"],
    },
    Bucket {
        name: "Enemies to Lovers",
        titles: &["Doom at Your Service", "Shooting Stars", "The Judge from Hell", "Our Beloved Summer"],
    },
    Bucket {
        name: "Friends to Lovers",
        titles: &["More than Friends", "Fight for My Way", "Love Nextdoor", "Weightlifting Fairy Kim Bok-joo"],
    },
    Bucket {
        name: "Toxic Love",
        titles: &["The Smile has Left Your Eyes", "Doona", "Nevertheless", "Tempted: The Great Seducer"],
    },
    Bucket {
        name: "True Love",
        titles: &["Twinkling Watermelon", "Strong Girl Bong-Soon", "Crash Landing on You", "Descendant of the Sun"],
    },
    Bucket {
        name: "Love at First Sight",
        titles: &["Business Proposal", "Extraordinary You", "Lovestruck in the City", "The Heirs"],
    },
    Bucket {
        name: "Right Person Wrong Time",
        titles: &["Vincenzo", "Vagabond", "Crash Landing on You", "A Time Called You"],
    },
    Bucket {
        name: "Age Gaps",
        titles: &["Backstreet Rookie", "2521", "Something in the Rain", "The Glory"],
    },
];

pub const TRENDING: &[&str] = &[
    "Crash Landing on You",
    "Strong Girl Bong-Soon",
    "Business Proposal",
    "Vincenzo",
    "Descendants of the Sun",
    "My Demon",
    "The Glory",
];

/// Provider genre → bucket names. Some entries name titles rather than buckets
/// and so never resolve; the caller falls back to every bucket.
const GENRE_BUCKETS: &[(&str, &[&str])] = &[
    ("Romance", &["Fake Dating", "Enemies to Lovers", "Friends to Lovers", "Love at First Sight", "True Love"]),
    ("Drama", &["Toxic Love", "Right Person Wrong Time", "Age Gaps"]),
    ("Comedy", &["Fake Dating", "Friends to Lovers", "Love at First Sight"]),
    ("Action", &["Right Person Wrong Time"]),
    ("Thriller", &["Toxic Love", "Right Person Wrong Time"]),
    ("Crime", &["Right Person Wrong Time"]),
    ("Fantasy", &["My Demon", "Doom at Your Service", "Extraordinary You"]),
];

pub fn bucket(name: &str) -> Option<&'static Bucket> {
    BUCKETS.iter().find(|b| b.name == name)
}

/// Buckets mapped from the given genres, in first-seen order without repeats
pub fn buckets_for_genres<'a, I>(genres: I) -> Vec<&'static Bucket>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<&'static Bucket> = Vec::new();
    for genre in genres {
        let Some((_, names)) = GENRE_BUCKETS.iter().find(|(g, _)| g.eq_ignore_ascii_case(genre.trim())) else {
            continue;
        };
        for mapped in names.iter().filter_map(|n| bucket(n)) {
            if !found.iter().any(|b| b.name == mapped.name) {
                found.push(mapped);
            }
        }
    }
    found
}
