//! OpenGL error checking around individual calls.
//!
//! [`gl_check!`](crate::gl_check) drains the error queue, runs the call and
//! drains the queue again, logging whatever the call left behind. Debug
//! builds also assert that nothing was left. Release builds only run the call.

use glow::HasContext;

// Guards against drivers that keep reporting an error forever after a lost context.
const MAX_DRAINED_ERRORS: usize = 32;

/// Runs a GL call and checks the error queue around it.
///
/// ```ignore
/// unsafe { gl_check!(gl, gl.clear(glow::COLOR_BUFFER_BIT)) };
/// ```
#[macro_export]
macro_rules! gl_check {
    ($gl:expr, $call:expr) => {{
        #[cfg(debug_assertions)]
        $crate::abs::debug::clear_errors(&*$gl);
        let result = $call;
        #[cfg(debug_assertions)]
        {
            let clean = $crate::abs::debug::log_errors(&*$gl, stringify!($call), file!(), line!());
            debug_assert!(clean, "OpenGL error in `{}`", stringify!($call));
        }
        result
    }};
}

/// Discards every pending GL error.
pub fn clear_errors(gl: &glow::Context) {
    for _ in 0..MAX_DRAINED_ERRORS {
        if unsafe { gl.get_error() } == glow::NO_ERROR {
            break;
        }
    }
}

/// Logs every pending GL error against `call`. Returns `true` if there
/// were none.
pub fn log_errors(gl: &glow::Context, call: &str, file: &str, line: u32) -> bool {
    let mut clean = true;
    for _ in 0..MAX_DRAINED_ERRORS {
        let error = unsafe { gl.get_error() };
        if error == glow::NO_ERROR {
            break;
        }
        log::error!(
            "OpenGL error 0x{:04X} ({}) in `{}` at {}:{}",
            error,
            error_name(error),
            call,
            file,
            line
        );
        clean = false;
    }
    clean
}

/// The GL name of an error code.
pub fn error_name(error: u32) -> &'static str {
    match error {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(glow::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(error_name(glow::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0xDEAD), "unknown");
    }
}
