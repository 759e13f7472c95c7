pub mod lookup;

pub use lookup::{LookupSource, PortalClient};
