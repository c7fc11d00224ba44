pub mod record;
pub mod registry;

pub use record::DurableRecord;
pub use registry::LockRegistry;
