//! Log capture for hosts that own the terminal.
//!
//! The engine logs through the `log` facade. A host that draws to the terminal cannot let records
//! hit stderr mid-frame, so it installs a [`ChannelLogger`] and drains the receiver wherever it
//! wants the messages shown.

mod channel;

use crossbeam::channel::Receiver;
use log::{LevelFilter, SetLoggerError};

pub use channel::{ChannelLogger, LogMessage};

/// Install a [`ChannelLogger`] as the global logger, passing records up to `level`, and return the
/// receiving end of its channel.
///
/// Fails if another logger is already installed.
pub fn init(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(receiver)
}
