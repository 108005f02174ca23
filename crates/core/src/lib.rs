pub mod adapter;
pub mod auth;
pub mod builder;
pub mod error;
pub mod model;
pub mod odata;
pub mod query;
pub mod request;
pub mod store;
pub mod template;

pub use adapter::RequestAdapter;
pub use builder::{ActionRequestBuilder, BaseRequestBuilder, BodyActionRequestBuilder, CountRequestBuilder};
pub use error::{GraphError, Result};
pub use model::{BackedModel, CollectionResponse, Flags, Parsable};
pub use odata::ODataError;
pub use query::{CollectionQuery, CountQuery, ItemQuery, NoQuery, RequestConfiguration};
pub use request::{HttpMethod, RequestInformation};
pub use store::{BackingStore, InMemoryBackingStore};

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
