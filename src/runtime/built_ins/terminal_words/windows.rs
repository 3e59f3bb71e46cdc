use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::io::Error;
use winapi::{
    shared::minwindef::DWORD,
    um::{
        consoleapi::{GetConsoleMode, SetConsoleMode},
        handleapi::INVALID_HANDLE_VALUE,
        processenv::GetStdHandle,
        winbase::STD_INPUT_HANDLE,
        wincon::{ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT},
        winnt::HANDLE,
    },
};

/// Holds the console without line buffering or echo until dropped, then puts the original mode
/// back.
pub struct RawMode {
    handle: HANDLE,
    original: DWORD,
}

impl RawMode {
    /// Switch the console input into raw mode.  Returns `None` when stdin isn't a console, for
    /// example when it is redirected from a file or a pipe.
    pub fn enter() -> error::Result<Option<RawMode>> {
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE);

            if handle == INVALID_HANDLE_VALUE || handle.is_null() {
                return Ok(None);
            }

            let mut original: DWORD = 0;

            if GetConsoleMode(handle, &mut original) == 0 {
                return Ok(None);
            }

            let raw = original & !(ENABLE_ECHO_INPUT | ENABLE_LINE_INPUT);

            if SetConsoleMode(handle, raw) == 0 {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::Io,
                    format!("Set console input mode failed: {}", Error::last_os_error()),
                );
            }

            Ok(Some(RawMode { handle, original }))
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            let _ = SetConsoleMode(self.handle, self.original);
        }
    }
}
