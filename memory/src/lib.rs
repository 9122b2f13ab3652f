//! Small JSON-file stores that outlive a single process: the users who
//! pressed `/start` and the art collection served by `/randomart`.

mod file;
pub mod images;
pub mod users;

pub use file::StoreError;
pub use images::ImageStore;
pub use users::UserRegistry;
