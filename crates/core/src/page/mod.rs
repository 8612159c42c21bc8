pub mod model;
pub mod service;
pub mod store;

pub use model::{Page, PageFilter, PageInput, PageWrite};
pub use service::PageService;
pub use store::PageStore;
