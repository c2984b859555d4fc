// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Debug-build forwarding of driver messages to the `log` facade.

use gl::types::*;
use owo_colors::OwoColorize;
use std::ffi::{c_void, CStr};

/// Routes `KHR_debug` messages to the `log` facade when the driver
/// exposes the extension. Silently does nothing otherwise.
pub fn setup_opengl_debugging() {
    if !supports_debug_extension() {
        log::debug!("GL debug output unavailable");
        return;
    }
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            std::ptr::null(),
            gl::TRUE,
        );
    }
}

fn supports_debug_extension() -> bool {
    if !gl::GetStringi::is_loaded() || !gl::DebugMessageCallback::is_loaded() {
        return false;
    }

    let mut num_extensions = 0;
    unsafe { gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions) };

    (0..num_extensions.max(0) as u32).any(|i| {
        let ptr = unsafe { gl::GetStringi(gl::EXTENSIONS, i) };
        if ptr.is_null() {
            return false;
        }
        let extension = unsafe { CStr::from_ptr(ptr as *const _) }.to_string_lossy();
        extension == "GL_KHR_debug" || extension == "GL_ARB_debug_output"
    })
}

/// Log level for a driver message, or `None` for notifications.
fn message_level(severity: GLenum) -> Option<log::Level> {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => Some(log::Level::Warn),
        gl::DEBUG_SEVERITY_NOTIFICATION => None,
        _ => Some(log::Level::Debug),
    }
}

extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    // Notifications fire for every buffer reallocation on some drivers.
    let Some(level) = message_level(severity) else {
        return;
    };
    if message.is_null() {
        return;
    }
    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };
    log::log!(
        level,
        "{} source={source:#06x}, type={type_:#06x}, id={id}: {msg}",
        "[GL DEBUG]".white().bold(),
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_message_level() {
        assert_eq!(message_level(gl::DEBUG_SEVERITY_HIGH), Some(log::Level::Warn));
        assert_eq!(message_level(gl::DEBUG_SEVERITY_MEDIUM), Some(log::Level::Debug));
        assert_eq!(message_level(gl::DEBUG_SEVERITY_LOW), Some(log::Level::Debug));
        assert_eq!(message_level(gl::DEBUG_SEVERITY_NOTIFICATION), None);
    }
}
