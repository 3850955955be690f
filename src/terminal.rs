use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::io;
use std::sync::OnceLock;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

/// Exit status after Ctrl-C, following the shell's 128 + SIGINT convention.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

// The attributes to put back, reachable from the signal handler.
static ORIGINAL: OnceLock<Termios> = OnceLock::new();

/// Holds stdin in non-canonical, no-echo mode so single keystrokes reach GETC and the keyboard
/// status register. The previous attributes are restored on drop and on SIGINT.
pub struct TerminalGuard {
    original: Option<Termios>,
}

impl TerminalGuard {
    /// Does nothing when stdin is not a terminal, e.g. when input is piped in.
    pub fn acquire() -> io::Result<TerminalGuard> {
        if !nix::unistd::isatty(libc::STDIN_FILENO).unwrap_or(false) {
            tracing::debug!("stdin is not a terminal, leaving input buffering alone");
            return Ok(TerminalGuard { original: None });
        }

        let original = Termios::from_fd(libc::STDIN_FILENO)?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);

        let _ = ORIGINAL.set(original);
        install_interrupt_handler()?;
        tcsetattr(libc::STDIN_FILENO, TCSANOW, &raw)?;
        tracing::debug!("disabled input buffering");

        Ok(TerminalGuard {
            original: Some(original),
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            match tcsetattr(libc::STDIN_FILENO, TCSANOW, &original) {
                Ok(()) => tracing::debug!("restored terminal attributes"),
                Err(e) => tracing::warn!("unable to restore terminal attributes: {}", e),
            }
        }
    }
}

fn install_interrupt_handler() -> io::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(handle_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // The handler only calls tcsetattr and _exit, both async-signal-safe.
    unsafe { sigaction(Signal::SIGINT, &action) }
        .map(|_| ())
        .map_err(io::Error::from)
}

extern "C" fn handle_interrupt(_: libc::c_int) {
    if let Some(original) = ORIGINAL.get() {
        let _ = tcsetattr(libc::STDIN_FILENO, TCSANOW, original);
    }

    unsafe { libc::_exit(INTERRUPTED_EXIT_CODE) }
}
