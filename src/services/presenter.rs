use crate::models::{
    DisplayCard, EnrichedMovie, MovieRecord, Provider, ProviderBadge, ProviderBadges,
};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_PROVIDERS: &str = "No streaming info available";
const ELLIPSIS: &str = "...";

/// Maps enriched movies to display cards. Pure: no I/O, never fails.
#[derive(Debug, Clone)]
pub struct Presenter {
    poster_base_url: String,
    poster_placeholder_url: String,
    overview_limit: usize,
}

impl Presenter {
    pub fn new(
        poster_base_url: String,
        poster_placeholder_url: String,
        overview_limit: usize,
    ) -> Self {
        Self {
            poster_base_url,
            poster_placeholder_url,
            overview_limit,
        }
    }

    pub fn present(&self, enriched: &EnrichedMovie) -> DisplayCard {
        let movie = &enriched.movie;

        DisplayCard {
            poster_url: self.poster_url(movie),
            title: movie.title.clone(),
            year: release_year(movie),
            rating_text: rating_text(movie),
            overview_text: self.overview_text(movie),
            overview_full: non_empty(movie.overview.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            provider_badges: provider_badges(&enriched.providers),
        }
    }

    pub fn present_all(&self, enriched: &[EnrichedMovie]) -> Vec<DisplayCard> {
        enriched.iter().map(|e| self.present(e)).collect()
    }

    fn poster_url(&self, movie: &MovieRecord) -> String {
        match non_empty(movie.poster_path.as_deref()) {
            Some(path) => format!("{}{}", self.poster_base_url, path),
            None => self.poster_placeholder_url.clone(),
        }
    }

    fn overview_text(&self, movie: &MovieRecord) -> String {
        match non_empty(movie.overview.as_deref()) {
            Some(overview) => truncate(overview, self.overview_limit),
            None => NO_DESCRIPTION.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Year component of a "YYYY-MM-DD" date
fn release_year(movie: &MovieRecord) -> String {
    non_empty(movie.release_date.as_deref())
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .map(|year| year.chars().take(4).collect())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// TMDB reports unrated titles as 0, which is shown the same as a missing rating
fn rating_text(movie: &MovieRecord) -> String {
    match movie.vote_average {
        Some(average) if average > 0.0 && average.is_finite() => one_decimal(average),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One decimal place, exact ties rounded up ("7.25" -> "7.3").
///
/// `{:.1}` rounds the exact binary value, which is right everywhere except on a true tie,
/// where it picks the even digit. A tenths tie is only exactly representable as an odd
/// multiple of 0.25, and scaling by 4 is exact.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        format!("{:.1}", (value * 10.0).ceil() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Cuts on character boundaries, appending an ellipsis only when something was cut
fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn provider_badges(providers: &[Provider]) -> ProviderBadges {
    if providers.is_empty() {
        return ProviderBadges::Unavailable {
            label: NO_PROVIDERS.to_string(),
        };
    }

    ProviderBadges::Logos {
        badges: providers
            .iter()
            .map(|p| ProviderBadge {
                logo_url: p.logo_url.clone(),
                name: p.name.clone(),
                tooltip: format!("Available on {}", p.name),
            })
            .collect(),
    }
}
