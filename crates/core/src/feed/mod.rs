pub mod model;
pub mod service;
pub mod store;

pub use model::{FeedItem, FeedItemInput};
pub use service::FeedService;
pub use store::FeedStore;
