pub mod pool;
pub mod queries;
pub mod queries_procurement;
pub mod queries_vendor;

pub use pool::create_pool;
pub use queries::*;
pub use queries_procurement::*;
pub use queries_vendor::*;
