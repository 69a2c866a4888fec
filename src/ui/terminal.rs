//! Cursor control sequences for the render loop.

use crossterm::cursor::{Hide, RestorePosition, SavePosition, Show};
use crossterm::queue;
use std::io::{self, Write};

pub fn save_cursor(w: &mut impl Write) -> io::Result<()> {
    queue!(w, SavePosition)
}

pub fn restore_cursor(w: &mut impl Write) -> io::Result<()> {
    queue!(w, RestorePosition)
}

pub fn hide_cursor(w: &mut impl Write) -> io::Result<()> {
    queue!(w, Hide)
}

pub fn show_cursor(w: &mut impl Write) -> io::Result<()> {
    queue!(w, Show)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_sequences_are_distinct() {
        let ops: [fn(&mut Vec<u8>) -> io::Result<()>; 4] =
            [save_cursor, restore_cursor, hide_cursor, show_cursor];
        let mut outputs = Vec::new();
        for op in ops {
            let mut buf: Vec<u8> = Vec::new();
            op(&mut buf).unwrap();
            assert!(buf.starts_with(b"\x1b"));
            outputs.push(buf);
        }
        outputs.sort();
        outputs.dedup();
        assert_eq!(outputs.len(), 4);
    }

    #[test]
    fn test_hide_and_show_cursor() {
        let mut buf: Vec<u8> = Vec::new();
        hide_cursor(&mut buf).unwrap();
        show_cursor(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b[?25l\x1b[?25h");
    }
}
