//! Application command handlers for lectern.
//!
//! One submodule per subcommand. Handlers stay thin: they load configuration,
//! call into the catalog/upload/server modules and shape terminal output.
//!
//! # Commands
//! - `list`: print the local recording catalog
//! - `upload`: stream a recording to the summarization server
//! - `delete`: remove recordings together with their sidecars
//! - `rename`: rewrite a recording's sidecar title
//! - `remote`: inspect and delete lectures already on the server

pub mod delete;
pub mod list;
pub mod remote;
pub mod rename;
pub mod upload;

pub use delete::handle_delete;
pub use list::handle_list;
pub use remote::handle_remote;
pub use rename::handle_rename;
pub use upload::handle_upload;
