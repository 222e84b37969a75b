//! Clients of the polling endpoints.

use futures::future::BoxFuture;

use crate::{
    dto::feed::{FinalResponse, ScoresResponse},
    error::FeedResult,
};

#[cfg(feature = "http-feed")]
pub use self::http::HttpScoreFeed;

/// Source of score snapshots and countdown signals.
pub trait ScoreFeed: Send + Sync {
    /// Fetch the current scores and race flag.
    fn fetch_scores(&self) -> BoxFuture<'static, FeedResult<ScoresResponse>>;
    /// Fetch the current countdown signal.
    fn fetch_final(&self) -> BoxFuture<'static, FeedResult<FinalResponse>>;
}

#[cfg(feature = "http-feed")]
mod http {
    use std::sync::Arc;

    use futures::{FutureExt, future::BoxFuture};
    use reqwest::Client;
    use serde::de::DeserializeOwned;

    use super::ScoreFeed;
    use crate::{
        config::FeedConfig,
        dto::feed::{FinalResponse, ScoresResponse},
        error::{FeedError, FeedResult},
    };

    /// [`ScoreFeed`] reading the feed server over HTTP.
    #[derive(Clone)]
    pub struct HttpScoreFeed {
        client: Client,
        base_url: Arc<str>,
    }

    impl HttpScoreFeed {
        /// Build a client for the feed at `config.base_url`.
        pub fn new(config: &FeedConfig) -> FeedResult<Self> {
            let base_url = Arc::<str>::from(config.base_url.trim_end_matches('/'));
            let client = Client::builder()
                .timeout(config.request_timeout)
                .build()
                .map_err(|source| FeedError::Unavailable {
                    url: base_url.to_string(),
                    source: Box::new(source),
                })?;

            Ok(Self { client, base_url })
        }

        fn get_json<T>(&self, path: &str) -> BoxFuture<'static, FeedResult<T>>
        where
            T: DeserializeOwned + Send + 'static,
        {
            let client = self.client.clone();
            let url = format!("{}{}", self.base_url, path);

            async move {
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|source| FeedError::Unavailable {
                        url: url.clone(),
                        source: Box::new(source),
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FeedError::Status {
                        url,
                        status: status.as_u16(),
                    });
                }

                response
                    .json::<T>()
                    .await
                    .map_err(|source| FeedError::Decode {
                        url,
                        source: Box::new(source),
                    })
            }
            .boxed()
        }
    }

    impl ScoreFeed for HttpScoreFeed {
        fn fetch_scores(&self) -> BoxFuture<'static, FeedResult<ScoresResponse>> {
            self.get_json("/api/scores")
        }

        fn fetch_final(&self) -> BoxFuture<'static, FeedResult<FinalResponse>> {
            self.get_json("/api/final")
        }
    }
}
