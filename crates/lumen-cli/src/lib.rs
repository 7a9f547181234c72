//! Command implementations behind the `lumen` binary.

#![deny(missing_docs)]

/// One module per subcommand.
pub mod commands {
    pub mod config;
    pub mod replay;
}
