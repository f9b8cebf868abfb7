//! Transport seam between the client and a search backend.
//!
//! This crate does not hard-wire a network stack. [`SearchClient`] talks to
//! the backend through the [`SearchTransport`] trait, so tests can plug in an
//! in-memory backend and applications can bring their own HTTP stack. The
//! `http` feature ships [`HttpTransport`](crate::HttpTransport) built on
//! `reqwest`.
//!
//! # Example: a canned-response transport
//!
//! ```rust
//! use esquery_client::{ClientResult, Refresh, SearchTransport};
//!
//! struct Canned(String);
//!
//! impl SearchTransport for Canned {
//!     fn info(&self) -> ClientResult<()> {
//!         Ok(())
//!     }
//!
//!     fn search(&self, _index: &str, _body: &str) -> ClientResult<String> {
//!         Ok(self.0.clone())
//!     }
//!
//!     fn index(&self, _index: &str, _body: &str, _refresh: Refresh) -> ClientResult<()> {
//!         Ok(())
//!     }
//! }
//! ```
//!
//! [`SearchClient`]: crate::SearchClient

use crate::error::ClientResult;

/// Visibility directive for writes.
///
/// Controls whether a freshly indexed document is searchable as soon as the
/// write returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    /// Refresh the affected shards immediately.
    True,
    /// Leave refreshing to the backend's schedule.
    #[default]
    False,
    /// Block until the next scheduled refresh has made the write visible.
    WaitFor,
}

impl Refresh {
    /// Returns the query-string value for this directive.
    pub fn as_str(self) -> &'static str {
        match self {
            Refresh::True => "true",
            Refresh::False => "false",
            Refresh::WaitFor => "wait_for",
        }
    }
}

impl std::fmt::Display for Refresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Refresh {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" | "" => Ok(Refresh::True),
            "false" => Ok(Refresh::False),
            "wait_for" => Ok(Refresh::WaitFor),
            other => Err(format!("unknown refresh directive: {other}")),
        }
    }
}

/// A search backend reachable by the client.
///
/// Implementations return raw response bodies; decoding happens in the
/// client. Non-success answers should be reported as
/// [`ClientError::Status`](crate::ClientError::Status) and delivery failures
/// as [`ClientError::Transport`](crate::ClientError::Transport).
pub trait SearchTransport: Send + Sync {
    /// Checks that the backend is reachable.
    fn info(&self) -> ClientResult<()>;

    /// Runs a search on `index` with the given request body.
    ///
    /// Returns the raw response body.
    fn search(&self, index: &str, body: &str) -> ClientResult<String>;

    /// Stores a document in `index`.
    fn index(&self, index: &str, body: &str, refresh: Refresh) -> ClientResult<()>;
}

impl<T: SearchTransport + ?Sized> SearchTransport for Box<T> {
    fn info(&self) -> ClientResult<()> {
        (**self).info()
    }

    fn search(&self, index: &str, body: &str) -> ClientResult<String> {
        (**self).search(index, body)
    }

    fn index(&self, index: &str, body: &str, refresh: Refresh) -> ClientResult<()> {
        (**self).index(index, body, refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_strings() {
        assert_eq!(Refresh::True.as_str(), "true");
        assert_eq!(Refresh::False.to_string(), "false");
        assert_eq!(Refresh::WaitFor.as_str(), "wait_for");
        assert_eq!(Refresh::default(), Refresh::False);
    }

    #[test]
    fn test_refresh_from_str() {
        assert_eq!("true".parse::<Refresh>(), Ok(Refresh::True));
        assert_eq!("".parse::<Refresh>(), Ok(Refresh::True));
        assert_eq!("wait_for".parse::<Refresh>(), Ok(Refresh::WaitFor));
        assert!("sometimes".parse::<Refresh>().is_err());
    }

    #[test]
    fn test_boxed_transport() {
        struct Down;

        impl SearchTransport for Down {
            fn info(&self) -> ClientResult<()> {
                Err(crate::ClientError::Transport("down".to_string()))
            }

            fn search(&self, _index: &str, _body: &str) -> ClientResult<String> {
                Err(crate::ClientError::Transport("down".to_string()))
            }

            fn index(&self, _index: &str, _body: &str, _refresh: Refresh) -> ClientResult<()> {
                Ok(())
            }
        }

        let boxed: Box<dyn SearchTransport> = Box::new(Down);
        assert!(boxed.info().is_err());
        assert!(boxed.index("i", "{}", Refresh::True).is_ok());
    }
}
