#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod config;
mod cycles;
mod error;
mod graph;
mod index;
mod node;
mod publication;
mod revision;

pub use config::GraphConfig;
pub use error::{ErrorKind, GraphError, Result};
pub use graph::CitationGraph;
pub use publication::Publication;
pub use revision::Revision;

#[test]
fn test_send_sync() {
    struct Paper(u32);

    impl Publication for Paper {
        type Id = u32;
        type Error = std::convert::Infallible;

        fn create(id: u32) -> std::result::Result<Self, Self::Error> {
            Ok(Paper(id))
        }

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<CitationGraph<Paper>>();
    assert_sync::<CitationGraph<Paper>>();
}
