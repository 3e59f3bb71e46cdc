use crate::runtime::error::{self, ErrorKind, ScriptError};
use libc::{
    BRKINT, CS8, ECHO, ICANON, ICRNL, IEXTEN, INPCK, ISTRIP, IXON, STDIN_FILENO, TCSANOW, VMIN,
    VTIME, isatty, tcgetattr, tcsetattr, termios,
};
use std::{io::Error, mem::zeroed};

/// Holds the terminal in raw mode until dropped, then puts the original settings back.
///
/// Signals stay enabled so that ctrl-c still interrupts a runaway program.
pub struct RawMode {
    original: termios,
}

impl RawMode {
    /// Switch stdin into raw mode.  Returns `None` when stdin isn't a terminal, there is nothing to
    /// switch then.
    pub fn enter() -> error::Result<Option<RawMode>> {
        unsafe {
            if isatty(STDIN_FILENO) == 0 {
                return Ok(None);
            }

            let mut original: termios = zeroed();

            if tcgetattr(STDIN_FILENO, &mut original) == -1 {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::Io,
                    format!(
                        "Could not get terminal mode information: {}",
                        Error::last_os_error()
                    ),
                );
            }

            let mut raw = original;

            raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
            raw.c_cflag |= CS8;
            raw.c_lflag &= !(ECHO | ICANON | IEXTEN);
            raw.c_cc[VMIN] = 1;
            raw.c_cc[VTIME] = 0;

            if tcsetattr(STDIN_FILENO, TCSANOW, &raw) == -1 {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::Io,
                    format!("Could not set terminal mode: {}", Error::last_os_error()),
                );
            }

            Ok(Some(RawMode { original }))
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            let _ = tcsetattr(STDIN_FILENO, TCSANOW, &self.original);
        }
    }
}
