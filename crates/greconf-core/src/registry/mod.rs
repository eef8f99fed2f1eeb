//! The registry manager and the two files it maintains.
//!
//! - `<location>/{global,user}.reginfo`: the key last registered for a location
//! - `<root>/<key>.conf`: maps the build identifier to the location
//!
//! Keys are the bare build identifier or `<buildid>_<n>`; exclusive file
//! creation is what keeps them unique.

mod bookkeeping;
mod conf_file;
mod error;
mod manager;

pub use bookkeeping::{BookkeepingFile, MAX_KEY_LEN, REGINFO_FILE_MODE};
pub use conf_file::{
    CONF_EXTENSION, CONF_FILE_MODE, GRE_PATH_KEY, conf_path, create_conf_file, read_gre_path,
    render_conf,
};
pub use error::RegistryError;
pub use manager::{
    Registration, RegistrationStatus, RegistryEntry, RegistryManager, UNIQ_LOOP_LIMIT,
};
