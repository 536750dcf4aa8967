use nq_core::NewsSource;

/// Sources polled on every metadata refresh.
pub fn default_sources() -> Vec<NewsSource> {
    vec![NewsSource::new(
        "The Defiant",
        "https://thedefiant.io/feed",
        "https://thedefiant.io",
    )]
}
