pub mod admins;
pub mod menu;
pub mod orders;
pub mod users;

pub use admins::AdminAccounts;
pub use menu::{MenuCatalog, MenuKey};
pub use orders::OrderWorkflow;
pub use users::UserDirectory;
