use nix::errno::Errno;
use nix::sys::select::{select, FdSet};
use nix::sys::time::{TimeVal, TimeValLike};
use nix::unistd;
use std::io::{self, Write};

/// The host side of the VM's console I/O: the keyboard device registers and the TRAP service
/// routines only talk to the outside world through this trait.
pub trait Console {
    /// Returns a pending keystroke without blocking, or `None` if no key is ready.
    fn poll_key(&mut self) -> io::Result<Option<u8>>;

    /// Blocks until a keystroke is available.
    fn read_key(&mut self) -> io::Result<u8>;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Messages from the VM itself rather than the guest program, e.g. the halt notice.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Guest output goes to stdout. Host notices go to stderr so stdout carries only what the
/// program printed.
#[derive(Debug, Default)]
pub struct HostConsole;

impl HostConsole {
    pub fn new() -> Self {
        HostConsole
    }
}

impl Console for HostConsole {
    /// End of input counts as no key ready.
    fn poll_key(&mut self) -> io::Result<Option<u8>> {
        if check_key() {
            read_byte()
        } else {
            Ok(None)
        }
    }

    fn read_key(&mut self) -> io::Result<u8> {
        read_byte()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        io::stdout().write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "{}", message)?;
        handle.flush()
    }
}

fn check_key() -> bool {
    let mut readfds = FdSet::new();
    readfds.insert(libc::STDIN_FILENO);

    match select(None, &mut readfds, None, None, &mut TimeVal::zero()) {
        Ok(value) => value == 1,
        Err(_) => false,
    }
}

// Reads fd 0 directly. Going through io::stdin() would buffer bytes that select can no longer
// see, leaving KBSR clear while keys are waiting.
fn read_byte() -> io::Result<Option<u8>> {
    let mut buffer = [0; 1];

    loop {
        match unistd::read(libc::STDIN_FILENO, &mut buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
pub(crate) use self::buffer::BufferConsole;

#[cfg(test)]
mod buffer {
    use super::Console;
    use std::collections::VecDeque;
    use std::io;

    /// Scripted keyboard and captured output.
    #[derive(Debug, Default)]
    pub(crate) struct BufferConsole {
        pub input: VecDeque<u8>,
        pub output: Vec<u8>,
        pub notices: Vec<String>,
        pub flushes: usize,
    }

    impl BufferConsole {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_input(input: &[u8]) -> Self {
            Self {
                input: input.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn output_str(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }
    }

    impl Console for BufferConsole {
        fn poll_key(&mut self) -> io::Result<Option<u8>> {
            Ok(self.input.pop_front())
        }

        fn read_key(&mut self) -> io::Result<u8> {
            self.input
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
            self.output.extend_from_slice(bytes);
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }

        fn notify(&mut self, message: &str) -> io::Result<()> {
            self.notices.push(message.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_console_poll_does_not_block_when_empty() {
        let mut console = BufferConsole::new();

        assert_eq!(console.poll_key().unwrap(), None);
    }

    #[test]
    fn buffer_console_read_key_in_order() {
        let mut console = BufferConsole::with_input(b"ab");

        assert_eq!(console.read_key().unwrap(), b'a');
        assert_eq!(console.poll_key().unwrap(), Some(b'b'));
        assert_eq!(
            console.read_key().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn buffer_console_captures_output() {
        let mut console = BufferConsole::new();
        console.write(b"Hi").unwrap();
        console.flush().unwrap();

        assert_eq!(console.output_str(), "Hi");
        assert_eq!(console.flushes, 1);
    }
}
