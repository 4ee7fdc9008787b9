pub mod aggregator;
pub mod discovery;
pub mod fetcher;
pub mod presenter;
pub mod providers;
pub mod search;
pub mod session;
pub mod tmdb;

pub use aggregator::ResultAggregator;
pub use fetcher::{MovieFetcher, SearchCriteria, SearchQuery};
pub use presenter::Presenter;
pub use providers::ProviderLookup;
pub use search::MovieSearch;
pub use session::{SearchSession, View, ViewState};
pub use tmdb::TmdbClient;
