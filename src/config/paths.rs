//! Platform paths used by configuration and logging.

pub mod xdg_root;
