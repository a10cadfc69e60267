// The search core: free text -> FilterSpec -> filtered rows -> page window.

pub mod compiler;
pub mod engine;
pub mod paginate;
